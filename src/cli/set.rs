//! Set command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use crate::env::coerce;
use crate::error::ConfigError;
use crate::tree::ConfigTree;
use crate::value::Map;

#[derive(Args)]
pub struct SetArgs {
    /// Path to the configuration file
    #[arg(value_name = "FILE")]
    pub config_file: PathBuf,

    /// Dot-path key to set (e.g. server.port)
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Value to set; coerced to bool/int/float when it parses as one
    #[arg(value_name = "VALUE")]
    pub value: String,

    /// Create the file if it does not exist
    #[arg(long)]
    pub create: bool,
}

pub fn run(args: SetArgs) -> Result<()> {
    let exists = args.config_file.exists();
    if !exists && !args.create {
        return Err(ConfigError::FileNotFound {
            path: args.config_file.clone(),
        }
        .into());
    }

    let mut tree = if exists {
        ConfigTree::from_file(&args.config_file)?
    } else {
        ConfigTree::from_value(Map::new())
    };

    let value = coerce(&args.value);
    info!("setting {} = {value} in {}", args.key, args.config_file.display());
    tree.set(&args.key, value);
    tree.save(Some(&args.config_file), None)?;
    Ok(())
}
