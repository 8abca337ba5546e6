//! Content management API: create and publish content types and entries.
//!
//! # Design
//! `ManagementClient` follows the same build/parse split as the delivery
//! client. `ModelProvisioner` sequences the round-trips the schema-creation
//! command needs (create, then publish with the returned version) over a
//! `Transport`. Each step is one request; the first failure stops the run.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::client::check_status;
use crate::config::{DEFAULT_ENVIRONMENT, MANAGEMENT_BASE_URL};
use crate::error::ContentfulError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::templates::ContentTypeTemplate;

const MANAGEMENT_CONTENT_TYPE: &str = "application/vnd.contentful.management.v1+json";

/// Space metadata as returned by `GET /spaces/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpaceSummary {
    pub sys: ResourceSys,
    pub name: String,
}

/// Identity and revision of a management resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceSys {
    pub id: String,
    #[serde(default)]
    pub version: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Resource {
    sys: ResourceSys,
}

/// A resource id with the version a follow-up publish must quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceVersion {
    pub id: String,
    pub version: u64,
}

#[derive(Serialize)]
struct EntryPayload<'a> {
    fields: &'a Map<String, Value>,
}

/// Request builder and response parser for one space environment.
#[derive(Debug, Clone)]
pub struct ManagementClient {
    base_url: String,
    token: String,
    space_id: String,
    environment: String,
}

impl ManagementClient {
    pub fn new(token: &str, space_id: &str, environment: &str) -> Self {
        Self::with_base_url(MANAGEMENT_BASE_URL, token, space_id, environment)
    }

    pub fn with_base_url(base_url: &str, token: &str, space_id: &str, environment: &str) -> Self {
        let environment = match environment.trim() {
            "" => DEFAULT_ENVIRONMENT,
            env => env,
        };
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            space_id: space_id.to_string(),
            environment: environment.to_string(),
        }
    }

    pub fn space_id(&self) -> &str {
        &self.space_id
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    fn space_url(&self) -> String {
        format!("{}/spaces/{}", self.base_url, self.space_id)
    }

    fn environment_url(&self) -> String {
        format!("{}/environments/{}", self.space_url(), self.environment)
    }

    fn request(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: vec![(
                "authorization".to_string(),
                format!("Bearer {}", self.token),
            )],
            body: None,
        }
    }

    fn with_json(mut request: HttpRequest, body: String) -> HttpRequest {
        request
            .headers
            .push(("content-type".to_string(), MANAGEMENT_CONTENT_TYPE.to_string()));
        request.body = Some(body);
        request
    }

    fn with_version(mut request: HttpRequest, version: u64) -> HttpRequest {
        request
            .headers
            .push(("x-contentful-version".to_string(), version.to_string()));
        request
    }

    pub fn build_get_space(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.space_url())
    }

    pub fn build_create_content_type(
        &self,
        template: &ContentTypeTemplate,
    ) -> Result<HttpRequest, ContentfulError> {
        let body =
            serde_json::to_string(template).map_err(|e| ContentfulError::Encode(e.to_string()))?;
        let path = format!("{}/content_types/{}", self.environment_url(), template.id);
        Ok(Self::with_json(self.request(HttpMethod::Put, path), body))
    }

    pub fn build_publish_content_type(&self, id: &str, version: u64) -> HttpRequest {
        let path = format!("{}/content_types/{id}/published", self.environment_url());
        Self::with_version(self.request(HttpMethod::Put, path), version)
    }

    pub fn build_create_entry(
        &self,
        content_type_id: &str,
        fields: &Map<String, Value>,
    ) -> Result<HttpRequest, ContentfulError> {
        let body = serde_json::to_string(&EntryPayload { fields })
            .map_err(|e| ContentfulError::Encode(e.to_string()))?;
        let path = format!("{}/entries", self.environment_url());
        let mut request = Self::with_json(self.request(HttpMethod::Post, path), body);
        request
            .headers
            .push(("x-contentful-content-type".to_string(), content_type_id.to_string()));
        Ok(request)
    }

    pub fn build_publish_entry(&self, id: &str, version: u64) -> HttpRequest {
        let path = format!("{}/entries/{id}/published", self.environment_url());
        Self::with_version(self.request(HttpMethod::Put, path), version)
    }

    pub fn parse_get_space(&self, response: HttpResponse) -> Result<SpaceSummary, ContentfulError> {
        let body = check_status(response)?;
        serde_json::from_str(&body).map_err(|e| ContentfulError::Decode(e.to_string()))
    }

    /// Parse any create/publish response into the resource's id and version.
    pub fn parse_resource(&self, response: HttpResponse) -> Result<ResourceVersion, ContentfulError> {
        let body = check_status(response)?;
        let resource: Resource =
            serde_json::from_str(&body).map_err(|e| ContentfulError::Decode(e.to_string()))?;
        let version = resource.sys.version.ok_or_else(|| {
            ContentfulError::Decode(format!("resource {} has no sys.version", resource.sys.id))
        })?;
        Ok(ResourceVersion {
            id: resource.sys.id,
            version,
        })
    }
}

/// What `ModelProvisioner::create_content_type` reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedContentType {
    pub id: String,
    pub name: String,
    pub field_ids: Vec<String>,
    pub version: u64,
}

/// Runs management round-trips over a transport.
pub struct ModelProvisioner<T> {
    client: ManagementClient,
    transport: T,
}

impl<T: Transport> ModelProvisioner<T> {
    pub fn new(client: ManagementClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &ManagementClient {
        &self.client
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ContentfulError> {
        Ok(self.transport.execute(&request)?)
    }

    /// Check the credentials by reading the space.
    pub fn verify_space(&self) -> Result<SpaceSummary, ContentfulError> {
        let response = self.send(self.client.build_get_space())?;
        let space = self.client.parse_get_space(response)?;
        info!(space = %space.sys.id, name = %space.name, "connected to space");
        Ok(space)
    }

    /// Create the content type and publish the version the upstream returns.
    pub fn create_content_type(
        &self,
        template: &ContentTypeTemplate,
    ) -> Result<ProvisionedContentType, ContentfulError> {
        info!(content_type = template.id, "creating content type");
        let created = self.send(self.client.build_create_content_type(template)?)?;
        let created = self.client.parse_resource(created)?;

        let published = self.send(
            self.client
                .build_publish_content_type(&created.id, created.version),
        )?;
        let published = self.client.parse_resource(published)?;
        info!(content_type = %published.id, version = published.version, "published content type");

        Ok(ProvisionedContentType {
            id: published.id,
            name: template.name.to_string(),
            field_ids: template.field_ids().into_iter().map(String::from).collect(),
            version: published.version,
        })
    }

    /// Create an entry of `content_type_id` and publish it. Returns the entry id.
    pub fn create_sample_entry(
        &self,
        content_type_id: &str,
        fields: &Map<String, Value>,
    ) -> Result<String, ContentfulError> {
        info!(content_type = content_type_id, "creating sample entry");
        let created = self.send(self.client.build_create_entry(content_type_id, fields)?)?;
        let created = self.client.parse_resource(created)?;

        let published = self.send(self.client.build_publish_entry(&created.id, created.version))?;
        let published = self.client.parse_resource(published)?;
        info!(entry = %published.id, "published sample entry");
        Ok(published.id)
    }
}
