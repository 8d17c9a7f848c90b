//! # Pizza Records
//!
//! The pizza entity and the repository performing its CRUD operations.

mod model;
mod repository;

pub use model::{Pizza, PizzaId};
pub use repository::{PizzaRepository, SqlitePizzaRepository};
