//! pizzastore - A minimal pizza CRUD service over SQLite
//!
//! Five JSON endpoints over a single `Pizzas` table, with OpenAPI
//! documentation and a configurable CORS policy.

pub mod cli;
pub mod config;
pub mod db;
pub mod http_server;
pub mod observability;
pub mod pizza;
