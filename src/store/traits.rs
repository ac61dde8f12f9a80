use crate::models::{ListingPatch, NewListing, Property};
use crate::store::StoreError;
use async_trait::async_trait;

/// Common trait for listing backends. The web layer only ever talks to the
/// store through this seam, so the hosted table and the in-memory backend
/// are interchangeable.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// All listings, newest first, optionally limited to the first `limit`.
    async fn list(&self, limit: Option<usize>) -> Result<Vec<Property>, StoreError>;

    /// Single listing by id.
    async fn get(&self, id: &str) -> Result<Property, StoreError>;

    /// Persist a new listing. The returned row carries the assigned id and
    /// creation timestamp.
    async fn insert(&self, listing: NewListing) -> Result<Property, StoreError>;

    /// Merge the provided fields into an existing row, leaving the rest
    /// untouched.
    async fn update(&self, id: &str, patch: ListingPatch) -> Result<Property, StoreError>;

    /// Remove the row.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Name of the backend, for logs.
    fn backend_name(&self) -> &'static str;
}
