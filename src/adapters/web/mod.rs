//! HTTP adapter.
//!
//! Exposes the market operations as a small JSON API over axum.

mod error;
mod handlers;

pub use error::WebError;
pub use handlers::*;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::domain::market::Market;

pub struct AppState {
    pub market: Arc<Market>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/stocks", get(handlers::list_stocks))
        .route("/stocks/{symbol}/dividend-yield", get(handlers::dividend_yield))
        .route("/stocks/{symbol}/pe-ratio", get(handlers::pe_ratio))
        .route("/stocks/{symbol}/vwsp", get(handlers::vwsp))
        .route("/trades", post(handlers::record_trade))
        .route("/market/gbce", get(handlers::gbce_index))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
