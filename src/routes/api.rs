use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::models::{ListingPatch, NewListing};
use crate::routes::AppState;
use crate::store::StoreError;
use crate::validate::{validate_new, validate_patch, FieldError};

/// JSON API used by the edit and delete flows. Mutations answer with the
/// stored row; clients re-fetch the full list afterwards instead of
/// patching local state.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/properties", get(list_properties).post(create_property))
        .route(
            "/api/properties/{id}",
            get(get_property)
                .patch(update_property)
                .delete(delete_property),
        )
}

#[derive(Deserialize)]
struct ListQuery {
    limit: Option<usize>,
}

fn store_error_response(err: StoreError) -> Response {
    match err {
        StoreError::NotFound => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": "not_found" }))).into_response()
        }
        other => {
            error!("store operation failed: {other}");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "store_error", "message": other.to_string() })),
            )
                .into_response()
        }
    }
}

fn invalid_response(errors: Vec<FieldError>) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": "invalid", "fields": errors })),
    )
        .into_response()
}

async fn list_properties(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    match state.store.list(query.limit).await {
        Ok(properties) => Json(properties).into_response(),
        Err(err) => store_error_response(err),
    }
}

async fn get_property(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.get(&id).await {
        Ok(property) => Json(property).into_response(),
        Err(err) => store_error_response(err),
    }
}

async fn create_property(
    State(state): State<AppState>,
    Json(listing): Json<NewListing>,
) -> Response {
    let errors = validate_new(&listing);
    if !errors.is_empty() {
        return invalid_response(errors);
    }
    match state.store.insert(listing).await {
        Ok(property) => (StatusCode::CREATED, Json(property)).into_response(),
        Err(err) => store_error_response(err),
    }
}

async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ListingPatch>,
) -> Response {
    let errors = validate_patch(&patch);
    if !errors.is_empty() {
        return invalid_response(errors);
    }
    match state.store.update(&id, patch).await {
        Ok(property) => Json(property).into_response(),
        Err(err) => store_error_response(err),
    }
}

async fn delete_property(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.delete(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => store_error_response(err),
    }
}
