//! CLI module for PizzaStore
//!
//! Provides command-line interface for:
//! - serve: Open the store and serve HTTP
//! - openapi: Print the API document

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{print_openapi, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
