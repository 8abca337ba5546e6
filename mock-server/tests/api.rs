use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, MockSpace, SeedEntry};
use serde_json::{json, Map, Value};
use tower::ServiceExt;

const DELIVERY: &str = "Bearer delivery";
const MANAGEMENT: &str = "Bearer management";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

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

fn space() -> MockSpace {
    MockSpace::new("space1", "delivery", "management")
        .with_name("Test Space")
        .with_entry(seed("e1", "A"))
        .with_entry(seed("e2", "B"))
}

fn get(uri: &str, auth: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::AUTHORIZATION, auth)
        .body(String::new())
        .unwrap()
}

fn management(method: &str, uri: &str, headers: &[(&str, &str)], body: &str) -> Request<String> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, MANAGEMENT)
        .header(
            http::header::CONTENT_TYPE,
            "application/vnd.contentful.management.v1+json",
        );
    for (key, value) in headers {
        builder = builder.header(*key, *value);
    }
    builder.body(body.to_string()).unwrap()
}

// --- space ---

#[tokio::test]
async fn get_space_with_delivery_token() {
    let resp = app(space())
        .oneshot(get("/spaces/space1", DELIVERY))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["sys"]["id"], "space1");
    assert_eq!(body["name"], "Test Space");
}

#[tokio::test]
async fn get_space_bad_token_returns_401() {
    let resp = app(space())
        .oneshot(get("/spaces/space1", "Bearer nope"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["sys"]["id"], "AccessTokenInvalid");
}

#[tokio::test]
async fn get_space_unknown_space_returns_404() {
    let resp = app(space())
        .oneshot(get("/spaces/other", DELIVERY))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delivery listings ---

#[tokio::test]
async fn list_entries_in_seed_order() {
    let resp = app(space())
        .oneshot(get(
            "/spaces/space1/environments/master/entries?limit=100",
            DELIVERY,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["limit"], 100);
    assert_eq!(body["items"][0]["sys"]["id"], "e1");
    assert_eq!(body["items"][1]["sys"]["id"], "e2");
    assert_eq!(body["items"][0]["fields"], json!({"title": "A"}));
    assert_eq!(
        body["items"][0]["sys"]["contentType"]["sys"]["id"],
        "blogPost"
    );
}

#[tokio::test]
async fn list_entries_limit_truncates_but_reports_total() {
    let resp = app(space())
        .oneshot(get(
            "/spaces/space1/environments/master/entries?limit=1",
            DELIVERY,
        ))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn list_entries_limit_too_large_returns_400() {
    let resp = app(space())
        .oneshot(get(
            "/spaces/space1/environments/master/entries?limit=5000",
            DELIVERY,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_entries_unknown_environment_returns_404() {
    let resp = app(space())
        .oneshot(get("/spaces/space1/environments/nope/entries", DELIVERY))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_entries_without_token_returns_401() {
    let resp = app(space())
        .oneshot(
            Request::builder()
                .uri("/spaces/space1/environments/master/entries")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn content_types_empty_until_published() {
    let resp = app(space())
        .oneshot(get(
            "/spaces/space1/environments/master/content_types",
            DELIVERY,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["items"], json!([]));
}

// --- management ---

#[tokio::test]
async fn delivery_token_cannot_write() {
    let resp = app(space())
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/spaces/space1/environments/master/content_types/author")
                .header(http::header::AUTHORIZATION, DELIVERY)
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(r#"{"name":"Author","fields":[]}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn publish_with_stale_version_returns_409() {
    use tower::Service;

    let mut app = app(space()).into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(management(
            "PUT",
            "/spaces/space1/environments/master/content_types/author",
            &[],
            r#"{"name":"Author","displayField":"name","fields":[]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(management(
            "PUT",
            "/spaces/space1/environments/master/content_types/author/published",
            &[("x-contentful-version", "7")],
            "",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn entry_for_unpublished_content_type_returns_422() {
    let resp = app(space())
        .oneshot(management(
            "POST",
            "/spaces/space1/environments/master/entries",
            &[("x-contentful-content-type", "missing")],
            r#"{"fields":{}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- full provisioning lifecycle ---

#[tokio::test]
async fn provisioning_lifecycle() {
    use tower::Service;

    let mut app = app(MockSpace::new("space1", "delivery", "management")).into_service();

    // create content type
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(management(
            "PUT",
            "/spaces/space1/environments/master/content_types/blogPost",
            &[],
            r#"{"name":"Blog Post","displayField":"title","description":"","fields":[{"id":"title","name":"Title","type":"Symbol","required":true}]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    assert_eq!(created["sys"]["version"], 1);
    assert_eq!(created["name"], "Blog Post");

    // re-create without version conflicts
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(management(
            "PUT",
            "/spaces/space1/environments/master/content_types/blogPost",
            &[],
            r#"{"name":"Blog Post","fields":[]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // publish content type
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(management(
            "PUT",
            "/spaces/space1/environments/master/content_types/blogPost/published",
            &[("x-contentful-version", "1")],
            "",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let published = body_json(resp).await;
    assert_eq!(published["sys"]["version"], 2);
    assert_eq!(published["sys"]["publishedVersion"], 1);

    // create entry
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(management(
            "POST",
            "/spaces/space1/environments/master/entries",
            &[("x-contentful-content-type", "blogPost")],
            r#"{"fields":{"title":{"en-US":"Hello"}}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let entry = body_json(resp).await;
    let entry_id = entry["sys"]["id"].as_str().unwrap().to_string();
    assert_eq!(entry["sys"]["version"], 1);

    // not delivered before publishing
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/spaces/space1/environments/master/entries", DELIVERY))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["total"], 0);

    // publish entry
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(management(
            "PUT",
            &format!("/spaces/space1/environments/master/entries/{entry_id}/published"),
            &[("x-contentful-version", "1")],
            "",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // delivered with the default locale resolved
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/spaces/space1/environments/master/entries", DELIVERY))
        .await
        .unwrap();
    let listing = body_json(resp).await;
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["items"][0]["sys"]["id"], entry_id.as_str());
    assert_eq!(listing["items"][0]["fields"], json!({"title": "Hello"}));

    // content type is now listed by the delivery API
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(
            "/spaces/space1/environments/master/content_types",
            DELIVERY,
        ))
        .await
        .unwrap();
    let types = body_json(resp).await;
    assert_eq!(types["items"][0]["sys"]["id"], "blogPost");
    assert_eq!(types["items"][0]["displayField"], "title");
}
