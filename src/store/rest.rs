use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::{debug, warn};

use crate::models::{ListingPatch, NewListing, Property, RawListing};
use crate::store::traits::ListingStore;
use crate::store::StoreError;

/// Adapter for the hosted datastore's REST dialect: filtered
/// select/insert/update/delete against the `properties` table, with
/// `Prefer: return=representation` on mutations so the affected rows come
/// back in the response and an empty result can be mapped to `NotFound`.
pub struct RestStore {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl RestStore {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(StoreError::Request)?;

        Ok(Self {
            client,
            endpoint: format!("{}/rest/v1/properties", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        })
    }

    fn request(&self, method: Method, query: &[(&str, String)]) -> RequestBuilder {
        self.client
            .request(method, &self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(query)
    }

    /// Decode a row-set response, turning error statuses into
    /// `StoreError::Backend`.
    async fn rows(&self, response: Response) -> Result<Vec<RawListing>, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("store returned {status}: {body}");
            return Err(StoreError::Backend(format!("{status}: {body}")));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ListingStore for RestStore {
    async fn list(&self, limit: Option<usize>) -> Result<Vec<Property>, StoreError> {
        let mut query = vec![
            ("select", "*".to_string()),
            ("order", "created_at.desc".to_string()),
        ];
        if let Some(n) = limit {
            query.push(("limit", n.to_string()));
        }
        debug!(?limit, "listing properties");

        let response = self.request(Method::GET, &query).send().await?;
        let rows = self.rows(response).await?;
        Ok(rows.into_iter().map(RawListing::normalize).collect())
    }

    async fn get(&self, id: &str) -> Result<Property, StoreError> {
        let query = [("select", "*".to_string()), ("id", format!("eq.{id}"))];
        let response = self.request(Method::GET, &query).send().await?;
        let rows = self.rows(response).await?;
        rows.into_iter()
            .next()
            .map(RawListing::normalize)
            .ok_or(StoreError::NotFound)
    }

    async fn insert(&self, listing: NewListing) -> Result<Property, StoreError> {
        let response = self
            .request(Method::POST, &[("select", "*".to_string())])
            .header("Prefer", "return=representation")
            .json(&listing)
            .send()
            .await?;
        let rows = self.rows(response).await?;
        rows.into_iter()
            .next()
            .map(RawListing::normalize)
            .ok_or_else(|| StoreError::Backend("insert returned no row".to_string()))
    }

    async fn update(&self, id: &str, patch: ListingPatch) -> Result<Property, StoreError> {
        let query = [("select", "*".to_string()), ("id", format!("eq.{id}"))];
        let response = self
            .request(Method::PATCH, &query)
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await?;
        let rows = self.rows(response).await?;
        rows.into_iter()
            .next()
            .map(RawListing::normalize)
            .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let query = [("id", format!("eq.{id}"))];
        let response = self
            .request(Method::DELETE, &query)
            .header("Prefer", "return=representation")
            .send()
            .await?;
        let rows = self.rows(response).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "rest"
    }
}
