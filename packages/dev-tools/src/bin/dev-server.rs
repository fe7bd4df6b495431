//! In-memory stub of the Orkestria REST backend
//!
//! Serves the full endpoint contract the dashboard core consumes, backed by
//! nothing but process memory, so the core (and the pages on top of it) can
//! be developed without the real backend running. Ids are assigned
//! server-side as UUIDs; unknown collections and ids answer 404.
//!
//! Local development only: permissive CORS, no authentication, state is
//! gone when the process exits.
//!
//! ```bash
//! PORT=8080 cargo run --bin dev-server
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use orkestria_core::models::{NewReservation, NewTask};

/// Collections the real backend exposes under `/api`
const COLLECTIONS: &[&str] = &[
    "projects",
    "tasks",
    "users",
    "resource-groups",
    "resource-items",
    "reservations",
    "employee-schedules",
];

#[derive(Clone, Default)]
struct AppState {
    // collection name -> (id -> entity)
    collections: Arc<RwLock<HashMap<String, HashMap<String, Value>>>>,
}

fn known(collection: &str) -> bool {
    COLLECTIONS.contains(&collection)
}

/// Ids may be stored as numbers or strings; compare their stringified form.
fn id_matches(value: &Value, id: &str) -> bool {
    match value {
        Value::String(s) => s == id,
        Value::Number(n) => n.to_string() == id,
        _ => false,
    }
}

async fn list_collection(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> Result<Json<Vec<Value>>, StatusCode> {
    if !known(&collection) {
        return Err(StatusCode::NOT_FOUND);
    }
    let collections = state.collections.read().await;
    let entities = collections
        .get(&collection)
        .map(|entities| entities.values().cloned().collect())
        .unwrap_or_default();
    Ok(Json(entities))
}

async fn create_in_collection(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Json(mut body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    if !known(&collection) || !body.is_object() {
        return Err(StatusCode::NOT_FOUND);
    }
    let id = Uuid::new_v4().to_string();
    body["id"] = json!(id);
    state
        .collections
        .write()
        .await
        .entry(collection)
        .or_default()
        .insert(id, body.clone());
    Ok((StatusCode::CREATED, Json(body)))
}

async fn get_by_id(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Value>, StatusCode> {
    let collections = state.collections.read().await;
    collections
        .get(&collection)
        .and_then(|entities| entities.get(&id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_by_id(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    if !body.is_object() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut collections = state.collections.write().await;
    let entities = collections.get_mut(&collection).ok_or(StatusCode::NOT_FOUND)?;
    if !entities.contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    body["id"] = json!(id);
    entities.insert(id, body.clone());
    Ok(Json(body))
}

async fn delete_by_id(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> StatusCode {
    let mut collections = state.collections.write().await;
    match collections.get_mut(&collection).and_then(|e| e.remove(&id)) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

async fn list_project_tasks(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Json<Vec<Value>> {
    let collections = state.collections.read().await;
    let tasks = collections
        .get("tasks")
        .map(|tasks| {
            tasks
                .values()
                .filter(|task| id_matches(&task["projectId"], &project_id))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    Json(tasks)
}

async fn create_project_task(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(mut body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    // The stub enforces the same wire contract the core sends.
    serde_json::from_value::<NewTask>(body.clone()).map_err(|_| StatusCode::BAD_REQUEST)?;

    let id = Uuid::new_v4().to_string();
    body["id"] = json!(id);
    body["projectId"] = json!(project_id);
    state
        .collections
        .write()
        .await
        .entry("tasks".to_string())
        .or_default()
        .insert(id, body.clone());
    Ok((StatusCode::CREATED, Json(body)))
}

async fn update_project_task(
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(String, String)>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    if !body.is_object() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut collections = state.collections.write().await;
    let tasks = collections.get_mut("tasks").ok_or(StatusCode::NOT_FOUND)?;
    if !tasks.contains_key(&task_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    body["id"] = json!(task_id);
    body["projectId"] = json!(project_id);
    tasks.insert(task_id, body.clone());
    Ok(Json(body))
}

async fn delete_project_task(
    State(state): State<AppState>,
    Path((_project_id, task_id)): Path<(String, String)>,
) -> StatusCode {
    let mut collections = state.collections.write().await;
    match collections.get_mut("tasks").and_then(|t| t.remove(&task_id)) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

async fn list_group_reservations(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Json<Vec<Value>> {
    let collections = state.collections.read().await;
    let reservations = collections
        .get("reservations")
        .map(|reservations| {
            reservations
                .values()
                .filter(|r| id_matches(&r["resourceGroup"]["id"], &group_id))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    Json(reservations)
}

async fn create_group_reservation(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    Json(mut body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    serde_json::from_value::<NewReservation>(body.clone()).map_err(|_| StatusCode::BAD_REQUEST)?;

    let mut collections = state.collections.write().await;
    let group_name = collections
        .get("resource-groups")
        .and_then(|groups| groups.get(&group_id))
        .and_then(|group| group["name"].as_str())
        .unwrap_or_default()
        .to_string();

    let id = Uuid::new_v4().to_string();
    body["id"] = json!(id);
    body["resourceGroup"] = json!({"id": group_id, "name": group_name});
    collections
        .entry("reservations".to_string())
        .or_default()
        .insert(id, body.clone());
    Ok((StatusCode::CREATED, Json(body)))
}

fn app() -> Router {
    Router::new()
        .route(
            "/api/projects/:id/tasks",
            get(list_project_tasks).post(create_project_task),
        )
        .route(
            "/api/projects/:id/tasks/:task_id",
            axum::routing::put(update_project_task).delete(delete_project_task),
        )
        .route(
            "/api/resource-groups/:id/reservations",
            get(list_group_reservations).post(create_group_reservation),
        )
        .route(
            "/api/:collection",
            get(list_collection).post(create_in_collection),
        )
        .route(
            "/api/:collection/:id",
            get(get_by_id).put(update_by_id).delete(delete_by_id),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::default())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "dev backend stub listening");
    axum::serve(listener, app()).await?;
    Ok(())
}
