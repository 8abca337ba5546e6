//! Domain and wire types for the delivery API.
//!
//! # Design
//! Wire types (`EntryCollection`, `RawEntry`, ...) mirror just enough of the
//! upstream JSON to extract what `Entry` needs. They are defined
//! independently from the mock-server's payloads; integration tests catch
//! drift between the two.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A normalized entry, rebuilt from scratch on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub content_type: String,
    pub created_at: String,
    pub updated_at: String,
    /// Schema-defined payload, passed through untouched.
    pub fields: Map<String, Value>,
}

impl From<RawEntry> for Entry {
    fn from(raw: RawEntry) -> Self {
        Entry {
            id: raw.sys.id,
            content_type: raw.sys.content_type.sys.id,
            created_at: raw.sys.created_at,
            updated_at: raw.sys.updated_at,
            fields: raw.fields,
        }
    }
}

/// A listing response from `/entries`.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryCollection {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub skip: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    pub items: Vec<RawEntry>,
}

/// One item of an entry listing as the upstream sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEntry {
    pub sys: EntrySys,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySys {
    pub id: String,
    pub content_type: Link,
    pub created_at: String,
    pub updated_at: String,
}

/// A `{"sys": {"id": ..}}` reference to another resource.
#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub sys: LinkSys,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkSys {
    pub id: String,
}

/// A listing response from `/content_types`. Items are kept raw.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentTypeCollection {
    pub items: Vec<Value>,
}

/// Outcome of a connection probe: `{success: true}` or
/// `{success: false, error: "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionResult {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ConnectionResult {
    pub fn connected() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Connection state as presented to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
    Loading,
    Error,
}

impl ConnectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Disconnected => "Not Connected",
            ConnectionStatus::Loading => "Connecting...",
            ConnectionStatus::Error => "Error",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&ConnectionResult> for ConnectionStatus {
    fn from(result: &ConnectionResult) -> Self {
        if result.is_success() {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Error
        }
    }
}
