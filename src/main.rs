//! confstack: inspect and manipulate layered configuration files

use std::process::ExitCode;

fn main() -> ExitCode {
    confstack::cli::run()
}
