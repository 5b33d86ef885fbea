//! Get command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::render;
use crate::env::coerce;
use crate::error::ConfigError;
use crate::format::Format;
use crate::tree::ConfigTree;

#[derive(Args)]
pub struct GetArgs {
    /// Path to the configuration file
    #[arg(value_name = "FILE")]
    pub config_file: PathBuf,

    /// Dot-path key to retrieve (prints the whole config when omitted)
    #[arg(value_name = "KEY")]
    pub key: Option<String>,

    /// Value to fall back on when the key is absent
    #[arg(long, value_name = "VALUE")]
    pub default: Option<String>,

    /// Output format (yaml, json, or ini); plain text when omitted
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<Format>,
}

pub fn run(args: GetArgs) -> Result<()> {
    let tree = ConfigTree::from_file(&args.config_file)?;

    let value = match &args.key {
        None => tree.root().clone(),
        Some(key) => match tree.get(key) {
            Some(found) => found.clone(),
            None => match &args.default {
                Some(raw) => coerce(raw),
                None => {
                    return Err(ConfigError::KeyNotFound { path: key.clone() }.into());
                }
            },
        },
    };

    println!("{}", render(&value, args.format)?);
    Ok(())
}
