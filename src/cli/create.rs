//! Create command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::format::{json, Format};
use crate::tree::ConfigTree;
use crate::value::Map;

#[derive(Args)]
pub struct CreateArgs {
    /// Path for the new configuration file
    #[arg(value_name = "FILE")]
    pub output_file: PathBuf,

    /// Output format (inferred from the extension when omitted)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<Format>,

    /// Existing config file to copy initial values from
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// JSON object of dotted keys to set, e.g. '{"server.port": 9000}'
    #[arg(long, value_name = "JSON")]
    pub vars: Option<String>,
}

pub fn run(args: CreateArgs) -> Result<()> {
    let mut tree = match &args.template {
        Some(template) => ConfigTree::from_file(template)?,
        None => ConfigTree::from_value(Map::new()),
    };

    if let Some(vars) = &args.vars {
        let parsed = json::parse(vars).context("invalid JSON in --vars")?;
        for (key, value) in parsed {
            tree.set(&key, value);
        }
    }

    tree.save(Some(&args.output_file), args.format)?;
    println!("created {}", args.output_file.display());
    Ok(())
}
