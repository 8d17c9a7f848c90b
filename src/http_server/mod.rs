//! # PizzaStore HTTP Server Module
//!
//! Axum server exposing pizza CRUD endpoints and their documentation.
//!
//! # Endpoints
//!
//! - `/` - Plain-text greeting
//! - `/pizzas`, `/pizzas/{id}` - Pizza CRUD
//! - `/swagger` - Swagger UI, document at `/swagger/v1/swagger.json`

pub mod config;
pub mod docs;
pub mod errors;
pub mod pizza_routes;
pub mod root_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::{build_router, HttpServer};
