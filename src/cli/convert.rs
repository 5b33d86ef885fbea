//! Convert command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::format::Format;
use crate::tree::ConfigTree;

#[derive(Args)]
pub struct ConvertArgs {
    /// Path to the input configuration file
    #[arg(value_name = "SRC")]
    pub input_file: PathBuf,

    /// Path for the converted configuration file
    #[arg(value_name = "DST")]
    pub output_file: PathBuf,

    /// Target format (inferred from the output extension when omitted)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<Format>,
}

pub fn run(args: ConvertArgs) -> Result<()> {
    let tree = ConfigTree::from_file(&args.input_file)?;
    tree.save(Some(&args.output_file), args.format)?;
    println!(
        "converted {} to {}",
        args.input_file.display(),
        args.output_file.display()
    );
    Ok(())
}
