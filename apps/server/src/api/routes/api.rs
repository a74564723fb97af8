//! JSON terminology API routes, mounted under `/api`

use crate::api::handlers::{encounter, mapping, terminology};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/namaste-codes", get(terminology::namaste_codes))
        .route("/search", get(terminology::search))
        .route("/lookup", get(terminology::lookup))
        .route("/groups/:id", get(terminology::group))
        .route("/translate", post(terminology::translate))
        .route("/mappings", post(mapping::generate_mappings))
        .route("/import", post(mapping::import))
        .route("/encounter/upload", post(encounter::upload))
}
