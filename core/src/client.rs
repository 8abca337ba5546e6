//! Stateless request builder and response parser for the delivery API.
//!
//! # Design
//! `ContentfulClient` is built from a complete `ContentfulConfig` and holds
//! nothing else that changes between calls. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`; the caller executes the round-trip in
//! between.

use serde_json::Value;
use tracing::warn;

use crate::config::{ContentfulConfig, DELIVERY_BASE_URL};
use crate::error::ContentfulError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ContentTypeCollection, Entry, EntryCollection};

/// Number of entries requested per fetch. There is no pagination beyond it.
pub const ENTRIES_PAGE_SIZE: u32 = 100;

/// Synchronous, stateless client for one space/environment of the
/// delivery API.
#[derive(Debug, Clone)]
pub struct ContentfulClient {
    base_url: String,
    config: ContentfulConfig,
}

impl ContentfulClient {
    pub fn new(config: ContentfulConfig) -> Self {
        Self::with_base_url(DELIVERY_BASE_URL, config)
    }

    pub fn with_base_url(base_url: &str, config: ContentfulConfig) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            config,
        }
    }

    pub fn config(&self) -> &ContentfulConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn space_url(&self) -> String {
        format!("{}/spaces/{}", self.base_url, self.config.space_id)
    }

    fn environment_url(&self) -> String {
        format!(
            "{}/environments/{}",
            self.space_url(),
            self.config.environment()
        )
    }

    fn authorization(&self) -> (String, String) {
        (
            "authorization".to_string(),
            format!("Bearer {}", self.config.access_token),
        )
    }

    fn listing_request(&self, endpoint: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{endpoint}", self.environment_url()),
            headers: vec![
                self.authorization(),
                ("content-type".to_string(), "application/json".to_string()),
            ],
            body: None,
        }
    }

    /// Space metadata probe. Not scoped to an environment.
    pub fn build_get_space(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.space_url(),
            headers: vec![self.authorization()],
            body: None,
        }
    }

    pub fn build_list_entries(&self, limit: u32) -> HttpRequest {
        self.listing_request(&format!("/entries?limit={limit}"))
    }

    pub fn build_list_content_types(&self) -> HttpRequest {
        self.listing_request("/content_types")
    }

    /// Any 2xx means the space is reachable; the body is not inspected.
    pub fn parse_get_space(&self, response: HttpResponse) -> Result<(), ContentfulError> {
        check_status(response)?;
        Ok(())
    }

    pub fn parse_list_entries(&self, response: HttpResponse) -> Result<Vec<Entry>, ContentfulError> {
        let body = check_status(response)?;
        let collection: EntryCollection =
            serde_json::from_str(&body).map_err(|e| ContentfulError::Decode(e.to_string()))?;

        let returned = collection.items.len() as u64;
        if let Some(total) = collection.total.filter(|total| *total > returned) {
            warn!(
                total,
                returned,
                space = %self.config.space_id,
                "entry listing truncated; remaining entries are not fetched"
            );
        }

        Ok(collection.items.into_iter().map(Entry::from).collect())
    }

    pub fn parse_list_content_types(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<Value>, ContentfulError> {
        let body = check_status(response)?;
        let collection: ContentTypeCollection =
            serde_json::from_str(&body).map_err(|e| ContentfulError::Decode(e.to_string()))?;
        Ok(collection.items)
    }
}

/// Map non-2xx responses to `ContentfulError::Http`, otherwise hand back the
/// body.
pub(crate) fn check_status(response: HttpResponse) -> Result<String, ContentfulError> {
    if response.is_success() {
        return Ok(response.body);
    }
    Err(ContentfulError::Http {
        status: response.status,
        body: response.body,
    })
}
