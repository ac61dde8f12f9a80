use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use urban_abode::routes::{router, AppState};
use urban_abode::store::MemoryStore;

fn app() -> Router {
    router(AppState {
        store: Arc::new(MemoryStore::new()),
    })
}

fn valid_listing() -> Value {
    json!({
        "title": "3 BHK Apartment in Indiranagar",
        "description": "East-facing apartment with balcony and covered parking.",
        "price": "1,45,00,000",
        "location": "Indiranagar, Bengaluru",
        "bedrooms": 3,
        "area": "1800 sqft",
        "image_url": "https://img.example/flat.png",
        "video_url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn create_then_get_roundtrip() {
    let app = app();

    let (status, created) = send(&app, json_request("POST", "/api/properties", valid_listing())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["bedrooms"], json!(3));
    assert!(created["created_at"].is_string());

    let (status, fetched) = send(&app, get_request(&format!("/api/properties/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], created["title"]);
}

#[tokio::test]
async fn create_rejects_invalid_fields() {
    let app = app();
    let mut listing = valid_listing();
    listing["title"] = json!("Flat");
    listing["image_url"] = json!("not a url");

    let (status, body) = send(&app, json_request("POST", "/api/properties", listing)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], json!("invalid"));
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"image_url"));
}

#[tokio::test]
async fn patch_merges_partial_fields() {
    let app = app();
    let (_, created) = send(&app, json_request("POST", "/api/properties", valid_listing())).await;
    let id = created["id"].as_str().unwrap();

    let patch = json!({ "price": "Price on Request", "bedrooms": 4 });
    let (status, updated) =
        send(&app, json_request("PATCH", &format!("/api/properties/{id}"), patch)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], json!("Price on Request"));
    assert_eq!(updated["bedrooms"], json!(4));
    assert_eq!(updated["title"], created["title"]);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let app = app();
    let (_, created) = send(&app, json_request("POST", "/api/properties", valid_listing())).await;
    let id = created["id"].as_str().unwrap();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/properties/{id}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, get_request(&format!("/api/properties/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("not_found"));
}

#[tokio::test]
async fn mutations_on_missing_ids_are_not_found() {
    let app = app();

    let (status, _) = send(&app, json_request("PATCH", "/api/properties/99", json!({ "price": "1" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/properties/99")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_respects_limit_query() {
    let app = app();
    for i in 0..4 {
        let mut listing = valid_listing();
        listing["title"] = json!(format!("Listing number {i}"));
        send(&app, json_request("POST", "/api/properties", listing)).await;
    }

    let (status, body) = send(&app, get_request("/api/properties?limit=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = send(&app, get_request("/api/properties")).await;
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn pages_render() {
    let app = app();

    for uri in ["/", "/properties", "/add-property"] {
        let response = app.clone().oneshot(get_request(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }

    let response = app
        .clone()
        .oneshot(get_request("/properties/999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_property_form_redirects_to_new_listing() {
    let app = app();
    let body = "title=3+BHK+Apartment+in+Indiranagar\
                &description=East-facing+apartment+with+balcony+and+covered+parking.\
                &price=1%2C45%2C00%2C000\
                &location=Indiranagar%2C+Bengaluru\
                &bedrooms=3\
                &area=1800+sqft\
                &image_url=https%3A%2F%2Fimg.example%2Fflat.png\
                &rera_id=&video_url=";
    let request = Request::builder()
        .method("POST")
        .uri("/add-property")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("/properties/"));

    let response = app.clone().oneshot(get_request(location)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn detail_page_exposes_edit_and_delete_controls() {
    let app = app();
    let (_, created) = send(&app, json_request("POST", "/api/properties", valid_listing())).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(get_request(&format!("/properties/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();

    // The page carries the controls and script that drive the JSON API.
    assert!(html.contains("id=\"delete-listing\""));
    assert!(html.contains("id=\"edit-form\""));
    assert!(html.contains(&format!("data-id=\"{id}\"")));
    assert!(html.contains("/static/app.js"));
}

#[tokio::test]
async fn non_numeric_bedrooms_get_a_clear_message() {
    let app = app();
    let body = "title=3+BHK+Apartment+in+Indiranagar\
                &description=East-facing+apartment+with+balcony+and+covered+parking.\
                &price=1%2C45%2C00%2C000\
                &location=Indiranagar%2C+Bengaluru\
                &bedrooms=abc\
                &area=1800+sqft\
                &image_url=https%3A%2F%2Fimg.example%2Fflat.png\
                &rera_id=&video_url=";
    let request = Request::builder()
        .method("POST")
        .uri("/add-property")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Bedrooms (BHK) must be a whole number (0 or more)."));
}

#[tokio::test]
async fn add_property_form_rerenders_with_errors() {
    let app = app();
    let body = "title=Hut&description=short&price=&location=x&bedrooms=0&area=&image_url=nope";
    let request = Request::builder()
        .method("POST")
        .uri("/add-property")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Title must be at least 5 characters long."));
    // The typed values survive the round trip.
    assert!(html.contains("value=\"Hut\""));
}
