pub mod api;
pub mod pages;

use std::sync::Arc;

use axum::Router;

use crate::store::ListingStore;

/// Shared handler state: everything goes through the store trait object.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ListingStore>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(pages::router())
        .merge(api::router())
        .with_state(state)
}
