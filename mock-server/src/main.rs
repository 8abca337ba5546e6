use mock_server::{MockSpace, SeedEntry};
use serde_json::{json, Map};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn demo_entry() -> SeedEntry {
    let mut fields = Map::new();
    fields.insert("title".to_string(), json!("Hello from the mock space"));
    fields.insert("slug".to_string(), json!("hello-from-the-mock-space"));
    fields.insert("tags".to_string(), json!(["demo"]));
    SeedEntry {
        id: "demoEntry1".to_string(),
        content_type: "blogPost".to_string(),
        created_at: "2024-01-01T00:00:00.000Z".to_string(),
        updated_at: "2024-01-01T00:00:00.000Z".to_string(),
        fields,
    }
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let port = env_or("PORT", "3000");
    let space = MockSpace::new(
        &env_or("MOCK_SPACE_ID", "demo"),
        &env_or("MOCK_DELIVERY_TOKEN", "delivery-token"),
        &env_or("MOCK_MANAGEMENT_TOKEN", "management-token"),
    )
    .with_name("Demo Space")
    .with_entry(demo_entry());

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!("listening on {addr}");
    mock_server::run(listener, space).await
}
