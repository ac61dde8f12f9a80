use askama::Template;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;
use tracing::error;

use crate::models::{NewListing, Property};
use crate::routes::AppState;
use crate::store::StoreError;
use crate::validate::{validate_new, FieldError};
use crate::video;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/properties", get(properties))
        .route("/properties/{id}", get(property_detail))
        .route("/add-property", get(add_property).post(submit_property))
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    properties: Vec<Property>,
}

#[derive(Template)]
#[template(path = "properties.html")]
struct PropertiesTemplate {
    properties: Vec<Property>,
}

#[derive(Template)]
#[template(path = "property.html")]
struct DetailTemplate {
    property: Property,
    embed_url: Option<String>,
}

#[derive(Template)]
#[template(path = "add_property.html")]
struct AddPropertyTemplate {
    form: ListingForm,
    errors: Vec<FieldError>,
    store_error: Option<String>,
}

impl AddPropertyTemplate {
    fn error_for(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate;

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    message: String,
}

/// Raw form input, kept as strings so a failed submission re-renders with
/// whatever the user typed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListingForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub location: String,
    pub bedrooms: String,
    pub area: String,
    pub image_url: String,
    pub rera_id: String,
    pub video_url: String,
}

impl ListingForm {
    /// Parse the form into a write payload, collecting field-level errors.
    fn to_listing(&self) -> (NewListing, Vec<FieldError>) {
        let mut errors = Vec::new();
        let bedrooms = match self.bedrooms.trim().parse::<u32>() {
            Ok(n) => n,
            Err(_) => {
                errors.push(FieldError {
                    field: "bedrooms",
                    message: "Bedrooms (BHK) must be a whole number (0 or more).",
                });
                0
            }
        };
        let listing = NewListing {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price.trim().to_string(),
            location: self.location.trim().to_string(),
            bedrooms,
            area: self.area.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
            rera_id: none_if_empty(&self.rera_id),
            video_url: none_if_empty(&self.video_url),
        };
        errors.extend(validate_new(&listing));
        (listing, errors)
    }
}

fn none_if_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Render a template, logging instead of silently serving a blank page if
/// rendering ever fails.
fn render_or_log<T: Template>(template: T) -> String {
    template.render().unwrap_or_else(|err| {
        error!("template render failed: {err}");
        String::new()
    })
}

fn not_found_page() -> Response {
    (StatusCode::NOT_FOUND, Html(render_or_log(NotFoundTemplate))).into_response()
}

fn store_error_page(err: StoreError) -> Response {
    error!("store operation failed: {err}");
    let content = render_or_log(ErrorTemplate {
        message: err.to_string(),
    });
    (StatusCode::BAD_GATEWAY, Html(content)).into_response()
}

async fn home(State(state): State<AppState>) -> Response {
    match state.store.list(Some(6)).await {
        Ok(properties) => Html(render_or_log(IndexTemplate { properties })).into_response(),
        Err(err) => store_error_page(err),
    }
}

async fn properties(State(state): State<AppState>) -> Response {
    match state.store.list(None).await {
        Ok(properties) => Html(render_or_log(PropertiesTemplate { properties })).into_response(),
        Err(err) => store_error_page(err),
    }
}

async fn property_detail(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.get(&id).await {
        Ok(property) => {
            let embed_url = video::embed_url(property.video_url.as_deref());
            Html(render_or_log(DetailTemplate {
                property,
                embed_url,
            }))
            .into_response()
        }
        Err(StoreError::NotFound) => not_found_page(),
        Err(err) => store_error_page(err),
    }
}

async fn add_property() -> Response {
    Html(render_or_log(AddPropertyTemplate {
        form: ListingForm::default(),
        errors: Vec::new(),
        store_error: None,
    }))
    .into_response()
}

async fn submit_property(
    State(state): State<AppState>,
    Form(form): Form<ListingForm>,
) -> Response {
    let (listing, errors) = form.to_listing();
    if !errors.is_empty() {
        let content = render_or_log(AddPropertyTemplate {
            form,
            errors,
            store_error: None,
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, Html(content)).into_response();
    }

    match state.store.insert(listing).await {
        Ok(property) => Redirect::to(&format!("/properties/{}", property.id)).into_response(),
        Err(err) => {
            error!("failed to add property: {err}");
            let content = render_or_log(AddPropertyTemplate {
                form,
                errors: Vec::new(),
                store_error: Some(err.to_string()),
            });
            (StatusCode::BAD_GATEWAY, Html(content)).into_response()
        }
    }
}
