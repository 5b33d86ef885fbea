//! Validate command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::parse_csv;
use crate::tree::ConfigTree;

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to the configuration file
    #[arg(value_name = "FILE")]
    pub config_file: PathBuf,

    /// Comma-separated list of required dot-paths
    #[arg(long, value_name = "KEYS")]
    pub required: Option<String>,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let required = parse_csv(&args.required).unwrap_or_default();

    ConfigTree::builder()
        .path(&args.config_file)
        .required(required.clone())
        .load()?;

    println!("{} is valid", args.config_file.display());
    if !required.is_empty() {
        println!("all required keys present: {}", required.join(", "));
    }
    Ok(())
}
