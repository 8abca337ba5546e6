//! In-memory stand-in for the Contentful delivery and management APIs.
//!
//! Serves a single space. Delivery routes return published content with the
//! default locale resolved; management routes create and publish content
//! types and entries with Contentful's optimistic versioning.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const DEFAULT_LOCALE: &str = "en-US";
const DEFAULT_LIMIT: usize = 100;
const MAX_LIMIT: usize = 1000;

/// An entry preloaded into the space, already published.
#[derive(Clone, Debug)]
pub struct SeedEntry {
    pub id: String,
    pub content_type: String,
    pub created_at: String,
    pub updated_at: String,
    /// Field values for the default locale.
    pub fields: Map<String, Value>,
}

#[derive(Clone, Debug)]
struct ContentTypeRecord {
    id: String,
    definition: Map<String, Value>,
    version: u64,
    published_version: Option<u64>,
    created_at: String,
    updated_at: String,
}

#[derive(Clone, Debug)]
struct EntryRecord {
    id: String,
    content_type: String,
    /// Localized: `{"title": {"en-US": "..."}}`.
    fields: Map<String, Value>,
    version: u64,
    published_version: Option<u64>,
    created_at: String,
    updated_at: String,
}

#[derive(Clone, Debug, Default)]
struct EnvironmentData {
    content_types: Vec<ContentTypeRecord>,
    entries: Vec<EntryRecord>,
}

/// The single space the mock serves.
#[derive(Clone, Debug)]
pub struct MockSpace {
    id: String,
    name: String,
    delivery_token: String,
    management_token: String,
    environments: HashMap<String, EnvironmentData>,
}

impl MockSpace {
    /// A space with an empty `master` environment.
    pub fn new(id: &str, delivery_token: &str, management_token: &str) -> Self {
        let mut environments = HashMap::new();
        environments.insert("master".to_string(), EnvironmentData::default());
        Self {
            id: id.to_string(),
            name: format!("Space {id}"),
            delivery_token: delivery_token.to_string(),
            management_token: management_token.to_string(),
            environments,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_environment(mut self, environment: &str) -> Self {
        self.environments.entry(environment.to_string()).or_default();
        self
    }

    /// Seed a published entry into `master`.
    pub fn with_entry(self, entry: SeedEntry) -> Self {
        self.with_entry_in("master", entry)
    }

    pub fn with_entry_in(mut self, environment: &str, entry: SeedEntry) -> Self {
        let fields = entry
            .fields
            .into_iter()
            .map(|(key, value)| {
                let mut localized = Map::new();
                localized.insert(DEFAULT_LOCALE.to_string(), value);
                (key, Value::Object(localized))
            })
            .collect();
        self.environments
            .entry(environment.to_string())
            .or_default()
            .entries
            .push(EntryRecord {
                id: entry.id,
                content_type: entry.content_type,
                fields,
                version: 2,
                published_version: Some(1),
                created_at: entry.created_at,
                updated_at: entry.updated_at,
            });
        self
    }
}

pub type Db = Arc<RwLock<MockSpace>>;

/// Contentful-style error body.
#[derive(Debug)]
pub struct MockError {
    status: StatusCode,
    id: &'static str,
    message: String,
}

impl MockError {
    fn new(status: StatusCode, id: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            id,
            message: message.into(),
        }
    }

    fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "AccessTokenInvalid",
            "The access token you sent could not be found or is invalid.",
        )
    }

    fn not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "NotFound",
            "The resource could not be found.",
        )
    }

    fn version_mismatch() -> Self {
        Self::new(StatusCode::CONFLICT, "VersionMismatch", "Version mismatch")
    }
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let body = json!({
            "sys": {"type": "Error", "id": self.id},
            "message": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Access {
    Read,
    Manage,
}

fn authorize(space: &MockSpace, headers: &HeaderMap, access: Access) -> Result<(), MockError> {
    let token = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(MockError::unauthorized)?;
    let allowed = match access {
        Access::Read => token == space.delivery_token || token == space.management_token,
        Access::Manage => token == space.management_token,
    };
    if allowed {
        Ok(())
    } else {
        Err(MockError::unauthorized())
    }
}

fn environment<'a>(
    space: &'a MockSpace,
    space_id: &str,
    env: &str,
) -> Result<&'a EnvironmentData, MockError> {
    if space.id != space_id {
        return Err(MockError::not_found());
    }
    space.environments.get(env).ok_or_else(MockError::not_found)
}

fn environment_mut<'a>(
    space: &'a mut MockSpace,
    space_id: &str,
    env: &str,
) -> Result<&'a mut EnvironmentData, MockError> {
    if space.id != space_id {
        return Err(MockError::not_found());
    }
    space
        .environments
        .get_mut(env)
        .ok_or_else(MockError::not_found)
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn link(link_type: &str, id: &str) -> Value {
    json!({"sys": {"type": "Link", "linkType": link_type, "id": id}})
}

fn expected_version(headers: &HeaderMap) -> Option<u64> {
    headers
        .get("x-contentful-version")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

fn collection(total: usize, skip: usize, limit: usize, items: Vec<Value>) -> Value {
    json!({
        "sys": {"type": "Array"},
        "total": total,
        "skip": skip,
        "limit": limit,
        "items": items,
    })
}

impl ContentTypeRecord {
    fn to_json(&self, space_id: &str) -> Value {
        let mut body = self.definition.clone();
        body.insert(
            "sys".to_string(),
            json!({
                "type": "ContentType",
                "id": self.id,
                "space": link("Space", space_id),
                "version": self.version,
                "publishedVersion": self.published_version,
                "createdAt": self.created_at,
                "updatedAt": self.updated_at,
            }),
        );
        Value::Object(body)
    }
}

impl EntryRecord {
    fn management_json(&self, space_id: &str) -> Value {
        json!({
            "sys": {
                "type": "Entry",
                "id": self.id,
                "space": link("Space", space_id),
                "contentType": link("ContentType", &self.content_type),
                "version": self.version,
                "publishedVersion": self.published_version,
                "createdAt": self.created_at,
                "updatedAt": self.updated_at,
            },
            "fields": self.fields,
        })
    }

    /// Delivery shape: default locale resolved, management-only sys dropped.
    fn delivery_json(&self, space_id: &str, env: &str) -> Value {
        let fields: Map<String, Value> = self
            .fields
            .iter()
            .filter_map(|(key, localized)| {
                localized
                    .get(DEFAULT_LOCALE)
                    .map(|value| (key.clone(), value.clone()))
            })
            .collect();
        json!({
            "sys": {
                "type": "Entry",
                "id": self.id,
                "space": link("Space", space_id),
                "environment": link("Environment", env),
                "contentType": link("ContentType", &self.content_type),
                "revision": self.published_version.unwrap_or_default(),
                "createdAt": self.created_at,
                "updatedAt": self.updated_at,
                "locale": DEFAULT_LOCALE,
            },
            "fields": fields,
        })
    }
}

pub fn app(space: MockSpace) -> Router {
    let db: Db = Arc::new(RwLock::new(space));
    Router::new()
        .route("/spaces/{space_id}", get(get_space))
        .route(
            "/spaces/{space_id}/environments/{env}/entries",
            get(list_entries).post(create_entry),
        )
        .route(
            "/spaces/{space_id}/environments/{env}/entries/{id}/published",
            put(publish_entry),
        )
        .route(
            "/spaces/{space_id}/environments/{env}/content_types",
            get(list_content_types),
        )
        .route(
            "/spaces/{space_id}/environments/{env}/content_types/{id}",
            put(upsert_content_type),
        )
        .route(
            "/spaces/{space_id}/environments/{env}/content_types/{id}/published",
            put(publish_content_type),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener, space: MockSpace) -> Result<(), std::io::Error> {
    axum::serve(listener, app(space)).await
}

async fn get_space(
    State(db): State<Db>,
    Path(space_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, MockError> {
    let space = db.read().await;
    authorize(&space, &headers, Access::Read)?;
    if space.id != space_id {
        return Err(MockError::not_found());
    }
    Ok(Json(json!({
        "sys": {"type": "Space", "id": space.id},
        "name": space.name,
        "locales": [{"code": DEFAULT_LOCALE, "default": true, "name": "English (United States)"}],
    })))
}

#[derive(Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
    pub skip: Option<usize>,
}

async fn list_entries(
    State(db): State<Db>,
    Path((space_id, env)): Path<(String, String)>,
    Query(params): Query<ListParams>,
    headers: HeaderMap,
) -> Result<Json<Value>, MockError> {
    let space = db.read().await;
    authorize(&space, &headers, Access::Read)?;
    let data = environment(&space, &space_id, &env)?;

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    if limit > MAX_LIMIT {
        return Err(MockError::new(
            StatusCode::BAD_REQUEST,
            "BadRequest",
            format!("limit must not exceed {MAX_LIMIT}"),
        ));
    }
    let skip = params.skip.unwrap_or(0);

    let published: Vec<&EntryRecord> = data
        .entries
        .iter()
        .filter(|entry| entry.published_version.is_some())
        .collect();
    let items = published
        .iter()
        .skip(skip)
        .take(limit)
        .map(|entry| entry.delivery_json(&space.id, &env))
        .collect();
    Ok(Json(collection(published.len(), skip, limit, items)))
}

async fn list_content_types(
    State(db): State<Db>,
    Path((space_id, env)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Value>, MockError> {
    let space = db.read().await;
    authorize(&space, &headers, Access::Read)?;
    let data = environment(&space, &space_id, &env)?;

    let items: Vec<Value> = data
        .content_types
        .iter()
        .filter(|ct| ct.published_version.is_some())
        .map(|ct| ct.to_json(&space.id))
        .collect();
    Ok(Json(collection(items.len(), 0, DEFAULT_LIMIT, items)))
}

async fn upsert_content_type(
    State(db): State<Db>,
    Path((space_id, env, id)): Path<(String, String, String)>,
    headers: HeaderMap,
    Json(definition): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<Value>), MockError> {
    let mut space = db.write().await;
    authorize(&space, &headers, Access::Manage)?;
    let owner = space.id.clone();
    let data = environment_mut(&mut space, &space_id, &env)?;

    if let Some(existing) = data.content_types.iter_mut().find(|ct| ct.id == id) {
        if expected_version(&headers) != Some(existing.version) {
            return Err(MockError::version_mismatch());
        }
        existing.definition = definition;
        existing.version += 1;
        existing.updated_at = now();
        return Ok((StatusCode::OK, Json(existing.to_json(&owner))));
    }

    let timestamp = now();
    let record = ContentTypeRecord {
        id,
        definition,
        version: 1,
        published_version: None,
        created_at: timestamp.clone(),
        updated_at: timestamp,
    };
    let body = record.to_json(&owner);
    data.content_types.push(record);
    Ok((StatusCode::CREATED, Json(body)))
}

async fn publish_content_type(
    State(db): State<Db>,
    Path((space_id, env, id)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Result<Json<Value>, MockError> {
    let mut space = db.write().await;
    authorize(&space, &headers, Access::Manage)?;
    let owner = space.id.clone();
    let data = environment_mut(&mut space, &space_id, &env)?;

    let record = data
        .content_types
        .iter_mut()
        .find(|ct| ct.id == id)
        .ok_or_else(MockError::not_found)?;
    if expected_version(&headers) != Some(record.version) {
        return Err(MockError::version_mismatch());
    }
    record.published_version = Some(record.version);
    record.version += 1;
    record.updated_at = now();
    Ok(Json(record.to_json(&owner)))
}

#[derive(Deserialize)]
pub struct EntryInput {
    #[serde(default)]
    pub fields: Map<String, Value>,
}

async fn create_entry(
    State(db): State<Db>,
    Path((space_id, env)): Path<(String, String)>,
    headers: HeaderMap,
    Json(input): Json<EntryInput>,
) -> Result<(StatusCode, Json<Value>), MockError> {
    let mut space = db.write().await;
    authorize(&space, &headers, Access::Manage)?;
    let owner = space.id.clone();
    let data = environment_mut(&mut space, &space_id, &env)?;

    let content_type = headers
        .get("x-contentful-content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let known = data
        .content_types
        .iter()
        .any(|ct| ct.id == content_type && ct.published_version.is_some());
    if !known {
        return Err(MockError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "UnknownContentType",
            format!("content type {content_type:?} is not published"),
        ));
    }

    let timestamp = now();
    let record = EntryRecord {
        id: Uuid::new_v4().simple().to_string(),
        content_type,
        fields: input.fields,
        version: 1,
        published_version: None,
        created_at: timestamp.clone(),
        updated_at: timestamp,
    };
    let body = record.management_json(&owner);
    data.entries.push(record);
    Ok((StatusCode::CREATED, Json(body)))
}

async fn publish_entry(
    State(db): State<Db>,
    Path((space_id, env, id)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Result<Json<Value>, MockError> {
    let mut space = db.write().await;
    authorize(&space, &headers, Access::Manage)?;
    let owner = space.id.clone();
    let data = environment_mut(&mut space, &space_id, &env)?;

    let record = data
        .entries
        .iter_mut()
        .find(|entry| entry.id == id)
        .ok_or_else(MockError::not_found)?;
    if expected_version(&headers) != Some(record.version) {
        return Err(MockError::version_mismatch());
    }
    record.published_version = Some(record.version);
    record.version += 1;
    record.updated_at = now();
    Ok(Json(record.management_json(&owner)))
}
