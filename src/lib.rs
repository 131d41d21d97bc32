//! HTTP service wiring for the invoice composer.
//!
//! The pipeline crates (`invoicepress-store`, `-aggregate`, `-compose`,
//! `-render`) do the actual work; this crate owns configuration, shared
//! state, and the axum surface that turns a row id into `application/pdf`.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use axum::{routing::get, Router};
use state::AppState;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/invoice", get(api::get_invoice))
        .route("/health", get(api::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
