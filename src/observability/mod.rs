//! Observability for the pizza store
//!
//! Logging goes through `tracing`. The CLI installs the subscriber once at
//! startup; library code only emits events.
//!
//! # Usage
//!
//! ```ignore
//! use pizzastore::observability::{init_logging, LoggingConfig};
//!
//! init_logging(&LoggingConfig::default())?;
//! tracing::info!(id = 1, "event=pizza_create status=ok");
//! ```

mod logger;

pub use logger::{init_logging, LogFormat, LoggingConfig, LoggingError};
