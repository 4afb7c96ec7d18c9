//! HTTP JSON API adapter.
//!
//! Thin boundary over the domain: handlers decode parameters into typed
//! criteria and hand off to the trade store. No auth, no sessions.

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::*;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::domain::store::TradeStore;

pub struct AppState {
    pub store: Arc<TradeStore>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/trades",
            post(handlers::add_trade).get(handlers::list_trades),
        )
        .route("/trades/search", get(handlers::search_trades))
        .route("/trades/filter", get(handlers::filter_trades))
        .route("/trades/{id}", get(handlers::get_trade))
        .with_state(Arc::new(state))
}
