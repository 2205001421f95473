pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/roles", get(handlers::handle_list_roles))
        .route("/api/v1/questions", post(handlers::handle_fetch_questions))
        .route("/api/v1/evaluate", post(handlers::handle_evaluate))
        .route("/api/v1/final-report", post(handlers::handle_final_report))
        .route("/api/v1/reset", post(handlers::handle_reset))
        .with_state(state)
}
