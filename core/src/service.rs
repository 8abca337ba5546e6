//! `ContentfulService`: configuration holder plus one-request operations.
//!
//! # Design
//! The service owns a `Transport` and at most one `ContentfulClient`.
//! `configure` swaps the client wholesale and takes `&mut self`, so it cannot
//! overlap an in-flight fetch; each operation works off the client it
//! borrowed when it started. Hosts that want independent targets construct
//! one service per configuration.
//!
//! Every operation issues at most one request and surfaces exactly one
//! outcome. There is no retry, timeout or de-duplication here.

use serde_json::Value;
use tracing::{debug, warn};

use crate::client::{ContentfulClient, ENTRIES_PAGE_SIZE};
use crate::config::ContentfulConfig;
use crate::error::ContentfulError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{ConnectionResult, Entry};

/// Delivery API service bound to a transport.
#[derive(Debug)]
pub struct ContentfulService<T> {
    transport: T,
    base_url: Option<String>,
    client: Option<ContentfulClient>,
}

impl<T: Transport> ContentfulService<T> {
    /// An unconfigured service.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            base_url: None,
            client: None,
        }
    }

    pub fn with_config(transport: T, config: ContentfulConfig) -> Self {
        let mut service = Self::new(transport);
        service.configure(config);
        service
    }

    /// Point requests at a different API root, e.g. a local mock.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        if let Some(client) = self.client.take() {
            self.client = Some(self.make_client(client.config().clone()));
        }
        self
    }

    fn make_client(&self, config: ContentfulConfig) -> ContentfulClient {
        match &self.base_url {
            Some(base_url) => ContentfulClient::with_base_url(base_url, config),
            None => ContentfulClient::new(config),
        }
    }

    /// Replace the held configuration. Contents are not validated.
    pub fn configure(&mut self, config: ContentfulConfig) {
        debug!(space = %config.space_id, environment = config.environment(), "configured");
        self.client = Some(self.make_client(config));
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn config(&self) -> Option<&ContentfulConfig> {
        self.client.as_ref().map(ContentfulClient::config)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn client(&self) -> Result<&ContentfulClient, ContentfulError> {
        self.client.as_ref().ok_or(ContentfulError::NotConfigured)
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ContentfulError> {
        debug!(method = request.method.as_str(), path = %request.path, "request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, path = %request.path, "response");
        Ok(response)
    }

    /// Probe the space metadata endpoint.
    pub fn check_connection(&self) -> Result<(), ContentfulError> {
        let client = self.client()?;
        let response = self.send(&client.build_get_space())?;
        client.parse_get_space(response)
    }

    /// `check_connection` reported as a `ConnectionResult`.
    pub fn test_connection(&self) -> ConnectionResult {
        match self.check_connection() {
            Ok(()) => ConnectionResult::connected(),
            Err(err) => {
                warn!(error = %err, "connection test failed");
                ConnectionResult::failed(err.connection_message())
            }
        }
    }

    /// Fetch up to `ENTRIES_PAGE_SIZE` entries in upstream order.
    pub fn fetch_entries(&self) -> Result<Vec<Entry>, ContentfulError> {
        let client = self.client()?;
        let result = self
            .send(&client.build_list_entries(ENTRIES_PAGE_SIZE))
            .and_then(|response| client.parse_list_entries(response))
            .map_err(|err| err.or_fallback("Failed to fetch entries"));
        if let Err(err) = &result {
            warn!(error = %err, "fetching entries failed");
        }
        result
    }

    /// Fetch the raw content type descriptors.
    pub fn fetch_content_types(&self) -> Result<Vec<Value>, ContentfulError> {
        let client = self.client()?;
        let result = self
            .send(&client.build_list_content_types())
            .and_then(|response| client.parse_list_content_types(response))
            .map_err(|err| err.or_fallback("Failed to fetch content types"));
        if let Err(err) = &result {
            warn!(error = %err, "fetching content types failed");
        }
        result
    }
}
