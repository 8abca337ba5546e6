//! End-to-end tests against the live mock server.
//!
//! Starts the mock server on a random port and drives `ContentfulService`
//! and `ModelProvisioner` over real HTTP using ureq, so request building and
//! response parsing are checked against an actual server.

mod common;

use common::{dead_endpoint, start_mock, UreqTransport};
use contentful_core::templates::{sample_blog_post_fields, AUTHOR, BLOG_POST};
use contentful_core::{
    ConnectionResult, ContentfulConfig, ContentfulError, ContentfulService, ManagementClient,
    ModelProvisioner,
};
use mock_server::{MockSpace, SeedEntry};
use serde_json::{json, Map};

fn seed(id: &str, title: &str) -> SeedEntry {
    let mut fields = Map::new();
    fields.insert("title".to_string(), json!(title));
    SeedEntry {
        id: id.to_string(),
        content_type: "blogPost".to_string(),
        created_at: "2024-01-01T00:00:00.000Z".to_string(),
        updated_at: "2024-01-02T00:00:00.000Z".to_string(),
        fields,
    }
}

#[test]
fn connection_and_fetch_lifecycle() {
    // Step 1: start a space with two published entries.
    let base = start_mock(
        MockSpace::new("space1", "delivery", "management")
            .with_entry(seed("e1", "A"))
            .with_entry(seed("e2", "B")),
    );
    let mut service = ContentfulService::new(UreqTransport::new()).with_base_url(&base);

    // Step 2: unconfigured.
    assert!(!service.is_configured());
    assert_eq!(
        service.test_connection(),
        ConnectionResult::failed("Client not configured")
    );
    assert_eq!(service.fetch_entries().unwrap_err(), ContentfulError::NotConfigured);

    // Step 3: wrong token.
    service.configure(ContentfulConfig::new("space1", "wrong"));
    let result = service.test_connection();
    assert!(!result.is_success());
    let error = result.error().unwrap();
    assert!(error.starts_with("Connection failed: 401 - "), "{error}");
    assert!(error.contains("AccessTokenInvalid"), "{error}");

    // Step 4: right token.
    service.configure(ContentfulConfig::new("space1", "delivery"));
    assert_eq!(service.test_connection(), ConnectionResult::connected());

    // Step 5: entries arrive normalized and in order.
    let entries = service.fetch_entries().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "e1");
    assert_eq!(entries[1].id, "e2");
    assert_eq!(entries[0].content_type, "blogPost");
    assert_eq!(entries[0].created_at, "2024-01-01T00:00:00.000Z");
    assert_eq!(entries[0].updated_at, "2024-01-02T00:00:00.000Z");
    assert_eq!(entries[1].fields["title"], "B");

    // Step 6: nothing published as a content type yet.
    assert!(service.fetch_content_types().unwrap().is_empty());
}

#[test]
fn unknown_environment_surfaces_status_and_body() {
    let base = start_mock(MockSpace::new("space1", "delivery", "management"));
    let service = ContentfulService::with_config(
        UreqTransport::new(),
        ContentfulConfig::new("space1", "delivery").with_environment("staging"),
    )
    .with_base_url(&base);

    // The probe is not environment-scoped.
    assert!(service.test_connection().is_success());

    let err = service.fetch_entries().unwrap_err();
    assert!(matches!(err, ContentfulError::Http { status: 404, .. }), "{err}");
    assert!(err.to_string().contains("NotFound"), "{err}");
}

#[test]
fn dead_endpoint_is_a_transport_fault() {
    let service = ContentfulService::with_config(
        UreqTransport::new(),
        ContentfulConfig::new("space1", "delivery"),
    )
    .with_base_url(&dead_endpoint());

    let result = service.test_connection();
    assert!(!result.is_success());
    assert!(!result.error().unwrap().is_empty());

    let err = service.fetch_entries().unwrap_err();
    assert!(matches!(err, ContentfulError::Transport(_)), "{err}");
}

#[test]
fn provisioned_models_become_deliverable() {
    let base = start_mock(
        MockSpace::new("space1", "delivery", "management").with_name("Provisioning Space"),
    );

    // Step 1: verify credentials.
    let provisioner = ModelProvisioner::new(
        ManagementClient::with_base_url(&base, "management", "space1", "master"),
        UreqTransport::new(),
    );
    let space = provisioner.verify_space().unwrap();
    assert_eq!(space.name, "Provisioning Space");

    // Step 2: create and publish two content types.
    let blog = provisioner.create_content_type(&BLOG_POST).unwrap();
    assert_eq!(blog.id, "blogPost");
    assert_eq!(blog.field_ids.len(), 9);
    provisioner.create_content_type(&AUTHOR).unwrap();

    // Step 3: creating the same type again conflicts.
    let err = provisioner.create_content_type(&BLOG_POST).unwrap_err();
    assert!(matches!(err, ContentfulError::Http { status: 409, .. }), "{err}");

    // Step 4: sample entry.
    let fields = sample_blog_post_fields("en-US", "2024-05-01T00:00:00.000Z");
    let entry_id = provisioner.create_sample_entry("blogPost", &fields).unwrap();

    // Step 5: the delivery side sees both.
    let service = ContentfulService::with_config(
        UreqTransport::new(),
        ContentfulConfig::new("space1", "delivery"),
    )
    .with_base_url(&base);

    let types = service.fetch_content_types().unwrap();
    let ids: Vec<_> = types.iter().map(|t| t["sys"]["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["blogPost", "author"]);

    let entries = service.fetch_entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, entry_id);
    assert_eq!(entries[0].content_type, "blogPost");
    assert_eq!(entries[0].fields["title"], "My First Blog Post");
    assert_eq!(entries[0].fields["tags"], json!(["welcome", "first-post"]));
}

#[test]
fn delivery_token_cannot_provision() {
    let base = start_mock(MockSpace::new("space1", "delivery", "management"));
    let provisioner = ModelProvisioner::new(
        ManagementClient::with_base_url(&base, "delivery", "space1", ""),
        UreqTransport::new(),
    );
    // Reading the space is allowed; writing is not.
    assert!(provisioner.verify_space().is_ok());
    let err = provisioner.create_content_type(&AUTHOR).unwrap_err();
    assert!(matches!(err, ContentfulError::Http { status: 401, .. }), "{err}");
}
