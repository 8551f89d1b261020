//! CLI module for opsgate
//!
//! Thin front end over the access module:
//! - roles / current: inspect the catalog and session role
//! - switch: change and persist the session role
//! - can: capability gate
//! - meets / highest: classification gate

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{execute, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{error_envelope, success_envelope, write_error, write_response};
