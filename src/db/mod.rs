//! # Pizza Store Persistence
//!
//! SQLite storage for pizza records.
//!
//! - [`ConnectionString`] parses the configured data source
//! - [`PizzaDb`] hands out connections scoped to a single request
//! - [`migrations`] creates and versions the `Pizzas` table

mod connection;
mod errors;
pub mod migrations;

pub use connection::{ConnectionString, DataSource, PizzaDb, DEFAULT_CONNECTION_STRING};
pub use errors::{DbError, DbResult};
