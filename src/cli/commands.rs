//! CLI command implementations

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::db::PizzaDb;
use crate::http_server::docs::openapi;
use crate::http_server::HttpServer;
use crate::observability::init_logging;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&config, port),
        Command::Openapi => print_openapi(&mut io::stdout()),
    }
}

/// Boot logging and the store, then serve HTTP until Ctrl-C
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load_or_default(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let connection = config.pizzas_connection()?;

    init_logging(&config.logging)?;
    tracing::info!(config = %config_path.display(), "event=boot status=start");

    let db = Arc::new(PizzaDb::connect(&connection)?);
    let server = HttpServer::with_config(config.http, db);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Write the OpenAPI document as pretty JSON
pub fn print_openapi<W: Write>(out: &mut W) -> CliResult<()> {
    let json = serde_json::to_string_pretty(&openapi())?;
    writeln!(out, "{}", json)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_openapi() {
        let mut out = Vec::new();
        print_openapi(&mut out).unwrap();

        let doc: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(doc["info"]["title"], "PizzaStore API");
        assert!(doc["paths"]["/pizzas/{id}"]["delete"].is_object());
    }

    #[test]
    fn test_serve_rejects_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pizzastore.json");
        std::fs::write(&path, r#"{"connection_strings": {"pizzas": "nonsense"}}"#).unwrap();

        let err = serve(&path, None).unwrap_err();
        assert!(
            err.code_str() == "PIZZA_CLI_CONFIG_ERROR",
            "unexpected error: {err}"
        );
    }
}
