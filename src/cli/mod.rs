//! Command-line interface for confstack
//!
//! One module per subcommand. Errors print to stderr and map to distinct
//! exit codes per class: file errors 2, format errors 3, validation errors
//! 4, everything else 1.

use clap::{ArgAction, Parser, Subcommand};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::ConfigError;

mod convert;
mod create;
mod env;
mod get;
mod list;
mod set;
mod utils;
mod validate;

/// Inspect and manipulate layered configuration files
#[derive(Parser)]
#[command(name = "confstack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one value or the whole config
    Get(get::GetArgs),

    /// Set a value and write the file back
    Set(set::SetArgs),

    /// Create a new configuration file
    Create(create::CreateArgs),

    /// Check that required keys are present
    Validate(validate::ValidateArgs),

    /// Convert a config file to another format
    Convert(convert::ConvertArgs),

    /// List configuration values
    List(list::ListArgs),

    /// Show configuration derived from environment variables
    Env(env::EnvArgs),
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // Wire -v counts to the tracing log level.
    // RUST_LOG in the environment always takes precedence.
    let default_level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let filter = EnvFilter::from_default_env().add_directive(default_level.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let result = match cli.command {
        Commands::Get(args) => get::run(args),
        Commands::Set(args) => set::run(args),
        Commands::Create(args) => create::run(args),
        Commands::Validate(args) => validate::run(args),
        Commands::Convert(args) => convert::run(args),
        Commands::List(args) => list::run(args),
        Commands::Env(args) => env::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ConfigError>()
        .map(ConfigError::exit_code)
        .unwrap_or(1)
}
