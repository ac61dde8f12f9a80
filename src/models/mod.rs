use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shown for listings without an uploaded image. Applied once, in
/// [`RawListing::normalize`], so every page renders the same thing.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x400.png?text=Property";

/// Canonical listing shape used everywhere past the store boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Display string: numeric text, a per-unit rate, or "Price on request".
    pub price: String,
    pub location: String,
    pub bedrooms: u32,
    /// Value plus unit, e.g. "1800 sqft"; "N/A" when the row has none.
    pub area: String,
    pub image_url: String,
    pub video_url: Option<String>,
    pub rera_id: Option<String>,
    /// Only used for newest-first ordering.
    pub created_at: Option<DateTime<Utc>>,
}

/// A row as the backing store returns it. Older clients wrote inconsistent
/// column names and types (`bhk` vs `bedrooms`, numeric vs string price and
/// id), so every field is optional and the ambiguous ones come in as raw
/// JSON values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawListing {
    pub id: Option<Value>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Value>,
    pub location: Option<String>,
    pub bhk: Option<i64>,
    pub bedrooms: Option<i64>,
    pub area: Option<Value>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub rera_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl RawListing {
    /// Reshape a raw row into the canonical [`Property`]. Reads are never
    /// validated; missing fields get their documented defaults.
    pub fn normalize(self) -> Property {
        let bedrooms = self.bhk.or(self.bedrooms).unwrap_or(0).max(0) as u32;
        Property {
            id: self.id.and_then(non_null).map(value_to_string).unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            price: display_price(self.price),
            location: self.location.unwrap_or_default(),
            bedrooms,
            area: self
                .area
                .and_then(non_null)
                .map(value_to_string)
                .unwrap_or_else(|| "N/A".to_string()),
            image_url: match self.image_url {
                Some(url) if !url.is_empty() => url,
                _ => PLACEHOLDER_IMAGE_URL.to_string(),
            },
            video_url: self.video_url,
            rera_id: self.rera_id,
            created_at: self.created_at,
        }
    }

    /// Row id coerced to a string, the same way `normalize` reports it.
    pub fn id_text(&self) -> Option<String> {
        self.id.clone().and_then(non_null).map(value_to_string)
    }
}

/// Payload for inserting a listing. Serializes with the store's column
/// names; note `bedrooms` maps to the `bhk` column. This is the single
/// mapping table between app names and store names for writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub price: String,
    pub location: String,
    #[serde(rename = "bhk", alias = "bedrooms")]
    pub bedrooms: u32,
    pub area: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rera_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

/// Partial update. Unset fields serialize as absent, so the store merges
/// only what the caller provided.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "bhk", alias = "bedrooms", default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rera_id: Option<String>,
}

fn non_null(value: Value) -> Option<Value> {
    if value.is_null() {
        None
    } else {
        Some(value)
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn display_price(price: Option<Value>) -> String {
    match price.and_then(non_null) {
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        Some(Value::Number(n)) => group_thousands(&n.to_string()),
        _ => "Price on request".to_string(),
    }
}

/// "12500000" -> "12,500,000"; a fractional part is carried through.
fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3);
    let len = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && c.is_ascii_digit() && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}
