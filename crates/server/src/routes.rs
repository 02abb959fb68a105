use axum::{http::StatusCode, routing::get, Json, Router};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use common::types::Health;
use service::AnimalService;

use crate::observability;

pub mod animals;

/// Shared handler state: the record service and, through it, the store handle.
#[derive(Clone)]
pub struct AppState {
    pub animals: AnimalService,
}

impl AppState {
    pub fn new(animals: AnimalService) -> Self {
        Self { animals }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn metrics() -> (StatusCode, String) {
    observability::encode_metrics()
}

/// Build the full application router: animal pages plus health and metrics.
pub fn build_router(state: AppState) -> Router {
    observability::init_metrics();

    let animal_routes = Router::new()
        .route("/animals", get(animals::list_animals))
        .route(
            "/animals/create",
            get(animals::show_create_form).post(animals::create_animal),
        )
        .route(
            "/animals/update/:id",
            get(animals::show_update_form).post(animals::update_animal),
        )
        .route(
            "/animals/delete/:id",
            get(animals::show_delete_confirmation).post(animals::delete_animal),
        );

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    animal_routes
        .merge(ops)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
