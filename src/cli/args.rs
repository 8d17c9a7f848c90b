//! CLI argument definitions using clap
//!
//! Commands:
//! - pizzastore serve --config <path> [--port <port>]
//! - pizzastore openapi

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// PizzaStore - Making the Pizzas you love
#[derive(Parser, Debug)]
#[command(name = "pizzastore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file (defaults apply when it does not exist)
        #[arg(long, default_value = "./pizzastore.json")]
        config: PathBuf,

        /// Port to listen on, overriding the configuration file
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the OpenAPI document and exit
    Openapi,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
