pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::answers::handlers as answers;
use crate::generation::handlers as generation;
use crate::layout::handlers as layout;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Core: layout and answer packing
        .route("/api/v1/layout", post(layout::handle_layout))
        .route("/api/v1/answers/estimate", post(answers::handle_estimate))
        .route("/api/v1/answers/pack", post(answers::handle_pack))
        // Registry-backed sheet assembly
        .route("/api/v1/generators", get(generation::handle_list_generators))
        .route("/api/v1/sheets", post(generation::handle_build_sheet))
        .with_state(state)
}
