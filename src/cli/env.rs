//! Env command implementation

use anyhow::Result;
use clap::Args;

use super::utils::render;
use crate::format::Format;
use crate::tree::ConfigTree;

#[derive(Args)]
pub struct EnvArgs {
    /// Environment variable prefix, e.g. APP_
    #[arg(value_name = "PREFIX")]
    pub prefix: String,

    /// Output format (yaml, json, or ini); plain text when omitted
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<Format>,
}

pub fn run(args: EnvArgs) -> Result<()> {
    let tree = ConfigTree::from_env(&args.prefix);
    println!("{}", render(tree.root(), args.format)?);
    Ok(())
}
