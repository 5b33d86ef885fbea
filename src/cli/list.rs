//! List command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::{render, render_plain};
use crate::error::ConfigError;
use crate::format::Format;
use crate::tree::ConfigTree;
use crate::value::{Map, Value};

#[derive(Args)]
pub struct ListArgs {
    /// Path to the configuration file
    #[arg(value_name = "FILE")]
    pub config_file: PathBuf,

    /// Only list this section (dot-path)
    #[arg(long, value_name = "SECTION")]
    pub section: Option<String>,

    /// Output format (yaml, json, or ini); plain text when omitted
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<Format>,
}

pub fn run(args: ListArgs) -> Result<()> {
    let tree = ConfigTree::from_file(&args.config_file)?;

    let Some(section) = &args.section else {
        println!("{}", render(tree.root(), args.format)?);
        return Ok(());
    };

    let items = tree.section_items(section);
    if items.is_empty() {
        return Err(ConfigError::KeyNotFound {
            path: section.clone(),
        }
        .into());
    }
    let value = Value::Mapping(items.into_iter().collect());

    match args.format {
        Some(_) => {
            // Keep the section name as the enclosing key so the output is a
            // valid document in the requested format.
            let mut wrapper = Map::new();
            wrapper.insert(section.clone(), value);
            println!("{}", render(&Value::Mapping(wrapper), args.format)?);
        }
        None => {
            println!("{section}:");
            println!("{}", render_plain(&value, 2));
        }
    }
    Ok(())
}
