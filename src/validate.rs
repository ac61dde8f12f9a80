use serde::Serialize;
use url::Url;

use crate::models::{ListingPatch, NewListing};

/// A single failed field check, rendered next to the form field or
/// returned in the API error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

fn err(field: &'static str, message: &'static str) -> FieldError {
    FieldError { field, message }
}

/// Write-time checks for a full listing, mirroring the add/edit form
/// schema. Reads are never validated; `bedrooms` is unsigned by type.
pub fn validate_new(listing: &NewListing) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_title(&mut errors, &listing.title);
    check_description(&mut errors, &listing.description);
    check_price(&mut errors, &listing.price);
    check_location(&mut errors, &listing.location);
    check_area(&mut errors, &listing.area);
    check_image_url(&mut errors, &listing.image_url);
    if let Some(video_url) = &listing.video_url {
        check_video_url(&mut errors, video_url);
    }
    errors
}

/// Same rules, applied only to the fields a patch actually carries.
pub fn validate_patch(patch: &ListingPatch) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if let Some(title) = &patch.title {
        check_title(&mut errors, title);
    }
    if let Some(description) = &patch.description {
        check_description(&mut errors, description);
    }
    if let Some(price) = &patch.price {
        check_price(&mut errors, price);
    }
    if let Some(location) = &patch.location {
        check_location(&mut errors, location);
    }
    if let Some(area) = &patch.area {
        check_area(&mut errors, area);
    }
    if let Some(image_url) = &patch.image_url {
        check_image_url(&mut errors, image_url);
    }
    if let Some(video_url) = &patch.video_url {
        check_video_url(&mut errors, video_url);
    }
    errors
}

fn check_title(errors: &mut Vec<FieldError>, title: &str) {
    if title.trim().chars().count() < 5 {
        errors.push(err("title", "Title must be at least 5 characters long."));
    }
}

fn check_description(errors: &mut Vec<FieldError>, description: &str) {
    if description.trim().chars().count() < 20 {
        errors.push(err(
            "description",
            "Description must be at least 20 characters long.",
        ));
    }
}

fn check_price(errors: &mut Vec<FieldError>, price: &str) {
    if price.trim().is_empty() {
        errors.push(err(
            "price",
            "Price is required (e.g., \"50,00,000\", \"3600/sq.ft.\", or \"Price on Request\").",
        ));
    }
}

fn check_location(errors: &mut Vec<FieldError>, location: &str) {
    if location.trim().chars().count() < 3 {
        errors.push(err("location", "Location is required."));
    }
}

fn check_area(errors: &mut Vec<FieldError>, area: &str) {
    if area.trim().is_empty() {
        errors.push(err("area", "Area is required (e.g., \"1800 sqft\")."));
    }
}

fn check_image_url(errors: &mut Vec<FieldError>, image_url: &str) {
    if Url::parse(image_url).is_err() {
        errors.push(err("image_url", "Must be a valid URL for the image."));
    }
}

fn check_video_url(errors: &mut Vec<FieldError>, video_url: &str) {
    if !video_url.is_empty() && Url::parse(video_url).is_err() {
        errors.push(err("video_url", "Must be a valid URL for the video."));
    }
}
