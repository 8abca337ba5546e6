//! Synchronous client core for a Contentful space.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values for the
//! content delivery and content management APIs. Network I/O happens behind
//! the `Transport` trait, which the host implements; everything else is
//! deterministic and testable without a network.
//!
//! # Design
//! - `ContentfulClient` / `ManagementClient` are stateless builders and
//!   parsers (`build_*` produces a request, `parse_*` consumes a response).
//! - `ContentfulService` holds at most one configuration and runs the
//!   one-request operations: connection test, entry fetch, content types.
//! - Every fallible operation returns `Result<_, ContentfulError>`.
//! - Wire types are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod management;
pub mod service;
pub mod templates;
pub mod types;

pub use client::{ContentfulClient, ENTRIES_PAGE_SIZE};
pub use config::{ContentfulConfig, CONFIG_STORE_KEY, DEFAULT_ENVIRONMENT};
pub use error::ContentfulError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use management::{ManagementClient, ModelProvisioner, ProvisionedContentType, SpaceSummary};
pub use service::ContentfulService;
pub use templates::ContentTypeTemplate;
pub use types::{ConnectionResult, ConnectionStatus, Entry};
