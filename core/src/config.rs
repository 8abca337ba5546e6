//! Connection configuration for a Contentful space.

use serde::{Deserialize, Serialize};

/// Environment used when none is configured.
pub const DEFAULT_ENVIRONMENT: &str = "master";

/// Key under which hosts persist the configuration.
pub const CONFIG_STORE_KEY: &str = "contentful-config";

/// Root of the content delivery API.
pub const DELIVERY_BASE_URL: &str = "https://cdn.contentful.com";

/// Root of the content management API.
pub const MANAGEMENT_BASE_URL: &str = "https://api.contentful.com";

/// Credentials and target environment for the delivery API.
///
/// Serialized with camelCase keys, matching the persisted shape
/// `{"spaceId": .., "accessToken": .., "environment": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentfulConfig {
    pub space_id: String,
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

impl ContentfulConfig {
    pub fn new(space_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            space_id: space_id.into(),
            access_token: access_token.into(),
            environment: None,
        }
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// The environment to address; blank or absent means `master`.
    pub fn environment(&self) -> &str {
        self.environment
            .as_deref()
            .map(str::trim)
            .filter(|env| !env.is_empty())
            .unwrap_or(DEFAULT_ENVIRONMENT)
    }

    /// Both credentials are present. Anything less counts as not configured.
    pub fn is_complete(&self) -> bool {
        !self.space_id.trim().is_empty() && !self.access_token.trim().is_empty()
    }

    /// Trimmed copy with the environment made explicit.
    pub fn normalized(&self) -> Self {
        Self {
            space_id: self.space_id.trim().to_string(),
            access_token: self.access_token.trim().to_string(),
            environment: Some(self.environment().to_string()),
        }
    }
}
