//! Pizza HTTP Routes
//!
//! CRUD endpoints under `/pizzas`. Each handler decodes its inputs through
//! axum extractors, runs one repository operation on a blocking worker with
//! a connection scoped to the request, and encodes the outcome.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::db::{DbResult, PizzaDb};
use crate::pizza::{Pizza, PizzaId, PizzaRepository, SqlitePizzaRepository};

use super::errors::{ApiError, ApiResult, ErrorResponse};

/// Pizza state shared across handlers
pub struct PizzaState {
    pub db: Arc<PizzaDb>,
}

impl PizzaState {
    pub fn new(db: Arc<PizzaDb>) -> Self {
        Self { db }
    }

    /// Run `op` against a connection opened for this call only.
    ///
    /// The connection is closed when the worker finishes, whether `op`
    /// succeeds, fails or panics.
    async fn in_unit_of_work<T, F>(&self, op: F) -> ApiResult<T>
    where
        F: FnOnce(&SqlitePizzaRepository<'_>) -> DbResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        let result = tokio::task::spawn_blocking(move || {
            let conn = db.open()?;
            op(&SqlitePizzaRepository::new(&conn))
        })
        .await?;
        Ok(result?)
    }
}

/// Create pizza routes
pub fn pizza_routes(state: Arc<PizzaState>) -> Router {
    Router::new()
        .route("/pizzas", get(list_pizzas).post(create_pizza))
        .route(
            "/pizzas/:id",
            get(get_pizza).put(update_pizza).delete(delete_pizza),
        )
        .with_state(state)
}

/// Location of a freshly created pizza
pub fn created_location(id: PizzaId) -> String {
    format!("/pizza/{id}")
}

/// List every pizza
#[utoipa::path(
    get,
    path = "/pizzas",
    tag = "pizzas",
    responses(
        (status = 200, description = "All pizzas", body = [Pizza]),
    ),
)]
pub async fn list_pizzas(State(state): State<Arc<PizzaState>>) -> ApiResult<Json<Vec<Pizza>>> {
    let pizzas = state.in_unit_of_work(|repo| repo.list()).await?;
    Ok(Json(pizzas))
}

/// Create a pizza; any id in the body is ignored
#[utoipa::path(
    post,
    path = "/pizzas",
    tag = "pizzas",
    request_body = Pizza,
    responses(
        (status = 201, description = "Pizza created", body = Pizza,
            headers(("Location" = String, description = "Path of the new pizza"))),
    ),
)]
pub async fn create_pizza(
    State(state): State<Arc<PizzaState>>,
    Json(candidate): Json<Pizza>,
) -> ApiResult<impl IntoResponse> {
    let pizza = state
        .in_unit_of_work(move |repo| repo.create(&candidate))
        .await?;
    let location = created_location(pizza.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(pizza)))
}

/// Fetch a pizza by id
#[utoipa::path(
    get,
    path = "/pizzas/{id}",
    tag = "pizzas",
    params(("id" = i64, Path, description = "Pizza id")),
    responses(
        (status = 200, description = "The pizza", body = Pizza),
        (status = 404, description = "No pizza with this id", body = ErrorResponse),
    ),
)]
pub async fn get_pizza(
    State(state): State<Arc<PizzaState>>,
    Path(id): Path<PizzaId>,
) -> ApiResult<Json<Pizza>> {
    let pizza = state.in_unit_of_work(move |repo| repo.get(id)).await?;
    pizza.map(Json).ok_or(ApiError::NotFound(id))
}

/// Replace the name and description of a pizza
#[utoipa::path(
    put,
    path = "/pizzas/{id}",
    tag = "pizzas",
    params(("id" = i64, Path, description = "Pizza id")),
    request_body = Pizza,
    responses(
        (status = 204, description = "Pizza updated"),
        (status = 404, description = "No pizza with this id", body = ErrorResponse),
    ),
)]
pub async fn update_pizza(
    State(state): State<Arc<PizzaState>>,
    Path(id): Path<PizzaId>,
    Json(patch): Json<Pizza>,
) -> ApiResult<StatusCode> {
    state
        .in_unit_of_work(move |repo| repo.update(id, &patch))
        .await?
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(ApiError::NotFound(id))
}

/// Delete a pizza
#[utoipa::path(
    delete,
    path = "/pizzas/{id}",
    tag = "pizzas",
    params(("id" = i64, Path, description = "Pizza id")),
    responses(
        (status = 200, description = "Pizza deleted"),
        (status = 404, description = "No pizza with this id", body = ErrorResponse),
    ),
)]
pub async fn delete_pizza(
    State(state): State<Arc<PizzaState>>,
    Path(id): Path<PizzaId>,
) -> ApiResult<StatusCode> {
    state
        .in_unit_of_work(move |repo| repo.delete(id))
        .await?
        .map(|_| StatusCode::OK)
        .ok_or(ApiError::NotFound(id))
}
