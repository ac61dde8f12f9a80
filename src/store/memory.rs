use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use crate::models::{ListingPatch, NewListing, Property, RawListing};
use crate::store::traits::ListingStore;
use crate::store::StoreError;

/// In-memory listing backend for local development and tests. Ids are
/// assigned from a counter and stored as numbers, so the adapter's
/// string-coercion path is exercised exactly as it is against the hosted
/// table.
pub struct MemoryStore {
    rows: RwLock<Vec<RawListing>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// A store pre-filled with sample listings, so the pages have content
    /// on a fresh checkout.
    pub fn seeded() -> Self {
        info!("📋 seeding in-memory store with sample listings");
        let now = Utc::now();
        let samples = sample_listings();
        let count = samples.len();
        let mut rows = Vec::with_capacity(count);
        for (i, mut row) in samples.into_iter().enumerate() {
            row.id = Some(Value::from((i + 1) as u64));
            // Stagger timestamps so newest-first ordering is visible.
            row.created_at = Some(now - Duration::minutes((count - i) as i64));
            rows.push(row);
        }
        Self {
            rows: RwLock::new(rows),
            next_id: AtomicU64::new((count + 1) as u64),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingStore for MemoryStore {
    async fn list(&self, limit: Option<usize>) -> Result<Vec<Property>, StoreError> {
        let mut rows = self.rows.read().await.clone();
        // Newest first; ties broken by the assigned id so insertion order
        // within the same instant stays deterministic.
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| id_number(b).cmp(&id_number(a)))
        });
        if let Some(n) = limit {
            rows.truncate(n);
        }
        Ok(rows.into_iter().map(RawListing::normalize).collect())
    }

    async fn get(&self, id: &str) -> Result<Property, StoreError> {
        let rows = self.rows.read().await;
        rows.iter()
            .find(|row| row.id_text().as_deref() == Some(id))
            .cloned()
            .map(RawListing::normalize)
            .ok_or(StoreError::NotFound)
    }

    async fn insert(&self, listing: NewListing) -> Result<Property, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let row = RawListing {
            id: Some(Value::from(id)),
            title: Some(listing.title),
            description: Some(listing.description),
            price: Some(Value::String(listing.price)),
            location: Some(listing.location),
            bhk: Some(listing.bedrooms as i64),
            bedrooms: None,
            area: Some(Value::String(listing.area)),
            image_url: Some(listing.image_url),
            video_url: listing.video_url,
            rera_id: listing.rera_id,
            created_at: Some(Utc::now()),
        };
        self.rows.write().await.push(row.clone());
        Ok(row.normalize())
    }

    async fn update(&self, id: &str, patch: ListingPatch) -> Result<Property, StoreError> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|row| row.id_text().as_deref() == Some(id))
            .ok_or(StoreError::NotFound)?;

        if let Some(title) = patch.title {
            row.title = Some(title);
        }
        if let Some(description) = patch.description {
            row.description = Some(description);
        }
        if let Some(price) = patch.price {
            row.price = Some(Value::String(price));
        }
        if let Some(location) = patch.location {
            row.location = Some(location);
        }
        if let Some(bedrooms) = patch.bedrooms {
            // Writes always land in the `bhk` column.
            row.bhk = Some(bedrooms as i64);
            row.bedrooms = None;
        }
        if let Some(area) = patch.area {
            row.area = Some(Value::String(area));
        }
        if let Some(image_url) = patch.image_url {
            row.image_url = Some(image_url);
        }
        if let Some(video_url) = patch.video_url {
            row.video_url = Some(video_url);
        }
        if let Some(rera_id) = patch.rera_id {
            row.rera_id = Some(rera_id);
        }

        Ok(row.clone().normalize())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id_text().as_deref() != Some(id));
        if rows.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

fn id_number(row: &RawListing) -> u64 {
    row.id.as_ref().and_then(Value::as_u64).unwrap_or(0)
}

fn sample_listings() -> Vec<RawListing> {
    vec![
        RawListing {
            title: Some("3 BHK Apartment in Indiranagar".to_string()),
            description: Some(
                "Spacious east-facing apartment with a private balcony, covered parking \
                 and a clubhouse. Walking distance to the metro."
                    .to_string(),
            ),
            price: Some(Value::String("1,45,00,000".to_string())),
            location: Some("Indiranagar, Bengaluru".to_string()),
            bhk: Some(3),
            area: Some(Value::String("1800 sqft".to_string())),
            image_url: Some("https://images.unsplash.com/photo-1560448204-e02f11c3d0e2".to_string()),
            video_url: Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string()),
            rera_id: Some("PRM/KA/RERA/1251/446/PR/210101/003999".to_string()),
            ..Default::default()
        },
        RawListing {
            title: Some("2 BHK Flat near Hinjewadi Phase 1".to_string()),
            description: Some(
                "Ready-to-move flat in a gated society with gym and children's play \
                 area. Ideal for IT professionals working in the park."
                    .to_string(),
            ),
            price: Some(Value::String("72,50,000".to_string())),
            location: Some("Hinjewadi, Pune".to_string()),
            bhk: Some(2),
            area: Some(Value::String("1050 sqft".to_string())),
            image_url: Some("https://images.unsplash.com/photo-1512917774080-9991f1c4c750".to_string()),
            ..Default::default()
        },
        RawListing {
            title: Some("Sea-view Plot at Alibaug".to_string()),
            description: Some(
                "Clear-title plot a short drive from the jetty. Price quoted per \
                 square foot; layout plan available on request."
                    .to_string(),
            ),
            price: Some(Value::String("3600/sq.ft.".to_string())),
            location: Some("Alibaug, Maharashtra".to_string()),
            area: Some(Value::String("4200 sqft".to_string())),
            ..Default::default()
        },
    ]
}
