//! In-process mock of the DRAGOFACTU backend for integration tests.
//!
//! Serves `/api/v1` on a free local port with just enough behaviour to drive
//! the client: bearer checks against a rotatable access token, a counted
//! refresh endpoint, paginated lists and a few document endpoints.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use uuid::Uuid;

use dragofactu::api::{ApiClient, ReqwestTransport};
use dragofactu::config::QueryConfig;
use dragofactu::query::QueryCache;
use dragofactu::store::{AuthState, AuthStore};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "admin123";
pub const REFRESH_TOKEN: &str = "refresh-token-1";

type Reply = std::result::Result<Json<Value>, Response>;

pub struct Backend {
    token_generation: AtomicUsize,
    refresh_calls: AtomicUsize,
    refresh_delay_ms: AtomicU64,
    hits: Mutex<Vec<String>>,
    authorizations: Mutex<Vec<Option<String>>>,
    clients: Mutex<Vec<Value>>,
    diary: Mutex<Vec<Value>>,
    documents: Mutex<Vec<Value>>,
}

impl Backend {
    fn seeded() -> Self {
        let clients = (1..=47)
            .map(|n| json!({"id": Uuid::new_v4(), "name": format!("Cliente {:02}", n), "city": "Málaga", "is_active": true}))
            .collect();
        let diary = (1..=3)
            .map(|n| json!({"id": Uuid::new_v4(), "title": format!("Nota {}", n), "content": "", "date": "2024-06-01"}))
            .collect();
        let documents = vec![json!({
            "id": Uuid::new_v4(),
            "code": "PRE-2024-0001",
            "type": "quote",
            "status": "sent",
            "client_id": Uuid::new_v4(),
            "client_name": "Cliente 01",
            "issue_date": "2024-06-01",
            "lines": [{"description": "Montaje", "quantity": "2", "unit_price": "10", "discount_percent": "50"}],
            "subtotal": "10.00",
            "tax_amount": "2.10",
            "total": "12.10"
        })];

        Self {
            token_generation: AtomicUsize::new(1),
            refresh_calls: AtomicUsize::new(0),
            refresh_delay_ms: AtomicU64::new(100),
            hits: Mutex::new(Vec::new()),
            authorizations: Mutex::new(Vec::new()),
            clients: Mutex::new(clients),
            diary: Mutex::new(diary),
            documents: Mutex::new(documents),
        }
    }

    pub fn valid_token(&self) -> String {
        format!("access-{}", self.token_generation.load(Ordering::SeqCst))
    }

    /// Invalidate the current access token, as if it had expired
    pub fn expire_access_token(&self) {
        self.token_generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    /// Number of authorized-or-not requests seen for "METHOD /path"
    pub fn hits(&self, route: &str) -> usize {
        self.hits.lock().unwrap().iter().filter(|r| *r == route).count()
    }

    pub fn authorizations(&self) -> Vec<Option<String>> {
        self.authorizations.lock().unwrap().clone()
    }

    pub fn client_ids(&self) -> Vec<Uuid> {
        ids(&self.clients.lock().unwrap())
    }

    pub fn diary_ids(&self) -> Vec<Uuid> {
        ids(&self.diary.lock().unwrap())
    }

    pub fn document_ids(&self) -> Vec<Uuid> {
        ids(&self.documents.lock().unwrap())
    }

    fn guard(&self, route: String, headers: &HeaderMap) -> std::result::Result<(), Response> {
        let auth = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.hits.lock().unwrap().push(route);
        self.authorizations.lock().unwrap().push(auth.clone());

        if auth == Some(format!("Bearer {}", self.valid_token())) {
            Ok(())
        } else {
            Err(detail(StatusCode::UNAUTHORIZED, "Could not validate credentials"))
        }
    }
}

fn ids(items: &[Value]) -> Vec<Uuid> {
    items
        .iter()
        .filter_map(|item| item["id"].as_str().and_then(|id| id.parse().ok()))
        .collect()
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn page(items: &[Value], params: &HashMap<String, String>, search_field: &str) -> Value {
    let skip: usize = params.get("skip").and_then(|v| v.parse().ok()).unwrap_or(0);
    let limit: usize = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(25);
    let needle = params.get("search").map(|s| s.to_lowercase());

    let matching: Vec<&Value> = items
        .iter()
        .filter(|item| match &needle {
            Some(needle) => item[search_field]
                .as_str()
                .is_some_and(|v| v.to_lowercase().contains(needle)),
            None => true,
        })
        .collect();
    let total = matching.len();
    let items: Vec<&Value> = matching.into_iter().skip(skip).take(limit).collect();

    json!({
        "items": items,
        "total": total,
        "skip": skip,
        "limit": limit,
        "has_more": skip + limit < total,
    })
}

fn find(items: &[Value], id: Uuid) -> Option<Value> {
    items.iter().find(|item| item["id"] == json!(id)).cloned()
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<Backend>,
}

impl MockBackend {
    pub async fn start() -> Result<Self> {
        // RUST_LOG=dragofactu=debug shows the client side of a failing test
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind mock backend")?;

        let state = Arc::new(Backend::seeded());
        let app = Router::new().nest("/api/v1", routes()).with_state(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}/api/v1", port),
            state,
        })
    }

    /// Fresh client with an empty in-memory session and a 5 minute cache
    pub fn client(&self) -> Result<Arc<ApiClient>> {
        self.client_with_session(AuthState::default())
    }

    pub fn client_with_session(&self, session: AuthState) -> Result<Arc<ApiClient>> {
        let transport = ReqwestTransport::new(&self.base_url)?;
        let cache = QueryCache::new(&QueryConfig {
            enable_cache: true,
            stale_time_secs: 300,
            retry_attempts: 1,
        });
        Ok(Arc::new(ApiClient::new(
            Arc::new(transport),
            AuthStore::in_memory_with(session),
            cache,
        )))
    }

    pub async fn logged_in_client(&self) -> Result<Arc<ApiClient>> {
        let client = self.client()?;
        client.login(USERNAME, PASSWORD).await?;
        Ok(client)
    }

    pub fn set_refresh_delay(&self, delay: Duration) {
        self.state.refresh_delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }
}

fn routes() -> Router<Arc<Backend>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .route("/clients", get(list_clients).post(create_client))
        .route("/clients/:id", get(get_client).delete(delete_client))
        .route("/diary", get(list_diary))
        .route("/diary/:id", axum::routing::delete(delete_diary))
        .route("/dashboard/stats", get(dashboard_stats))
        .route("/documents", get(list_documents))
        .route("/documents/:id", get(get_document))
        .route("/documents/:id/change-status", post(change_status))
        .route("/documents/:id/convert", post(convert_document))
        .route("/export/:entity", get(export_entity))
        .route("/export/import/:entity", post(import_entity))
}

fn user() -> Value {
    json!({
        "id": "6f1c2a4e-8d0b-4a57-9b1e-2c3d4e5f6a7b",
        "username": USERNAME,
        "email": "admin@dragofactu.local",
        "full_name": "Administrador",
        "role": "admin",
        "is_active": true
    })
}

async fn login(State(state): State<Arc<Backend>>, Json(body): Json<Value>) -> Reply {
    state.hits.lock().unwrap().push("POST /auth/login".to_string());
    if body["username"] != USERNAME || body["password"] != PASSWORD {
        return Err(detail(StatusCode::UNAUTHORIZED, "Incorrect username or password"));
    }
    Ok(Json(json!({
        "access_token": state.valid_token(),
        "refresh_token": REFRESH_TOKEN,
        "token_type": "bearer",
        "user": user(),
    })))
}

async fn refresh(State(state): State<Arc<Backend>>, Json(body): Json<Value>) -> Reply {
    state.hits.lock().unwrap().push("POST /auth/refresh".to_string());
    if body["refresh_token"] != REFRESH_TOKEN {
        return Err(detail(StatusCode::UNAUTHORIZED, "Invalid refresh token"));
    }

    // Slow enough for concurrent requests to pile up behind the first refresh
    let delay = state.refresh_delay_ms.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(delay)).await;

    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    state.expire_access_token();
    Ok(Json(json!({ "access_token": state.valid_token(), "token_type": "bearer" })))
}

async fn logout(State(state): State<Arc<Backend>>, headers: HeaderMap) -> Reply {
    state.guard("POST /auth/logout".to_string(), &headers)?;
    Ok(Json(json!({ "message": "Logged out" })))
}

async fn me(State(state): State<Arc<Backend>>, headers: HeaderMap) -> Reply {
    state.guard("GET /auth/me".to_string(), &headers)?;
    Ok(Json(user()))
}

async fn list_clients(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    state.guard("GET /clients".to_string(), &headers)?;
    Ok(Json(page(&state.clients.lock().unwrap(), &params, "name")))
}

async fn create_client(State(state): State<Arc<Backend>>, headers: HeaderMap, Json(mut body): Json<Value>) -> Reply {
    state.guard("POST /clients".to_string(), &headers)?;
    if body["name"].as_str().map_or(true, |name| name.trim().is_empty()) {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": [{"loc": ["body", "name"], "msg": "field required", "type": "missing"}]})),
        )
            .into_response());
    }

    body["id"] = json!(Uuid::new_v4());
    body["is_active"] = json!(true);
    state.clients.lock().unwrap().push(body.clone());
    Ok(Json(body))
}

async fn get_client(State(state): State<Arc<Backend>>, headers: HeaderMap, Path(id): Path<Uuid>) -> Reply {
    state.guard(format!("GET /clients/{}", id), &headers)?;
    find(&state.clients.lock().unwrap(), id)
        .map(Json)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Client not found"))
}

async fn delete_client(State(state): State<Arc<Backend>>, headers: HeaderMap, Path(id): Path<Uuid>) -> Reply {
    state.guard(format!("DELETE /clients/{}", id), &headers)?;
    let mut clients = state.clients.lock().unwrap();
    let before = clients.len();
    clients.retain(|c| c["id"] != json!(id));
    if clients.len() == before {
        return Err(detail(StatusCode::NOT_FOUND, "Client not found"));
    }
    Ok(Json(json!({ "message": "Client deleted", "success": true })))
}

async fn list_diary(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    state.guard("GET /diary".to_string(), &headers)?;
    Ok(Json(page(&state.diary.lock().unwrap(), &params, "title")))
}

async fn delete_diary(State(state): State<Arc<Backend>>, headers: HeaderMap, Path(id): Path<Uuid>) -> Reply {
    state.guard(format!("DELETE /diary/{}", id), &headers)?;
    state.diary.lock().unwrap().retain(|e| e["id"] != json!(id));
    Ok(Json(json!({ "message": "Diary entry deleted", "success": true })))
}

async fn dashboard_stats(State(state): State<Arc<Backend>>, headers: HeaderMap) -> Reply {
    state.guard("GET /dashboard/stats".to_string(), &headers)?;
    Ok(Json(json!({
        "total_clients": state.clients.lock().unwrap().len(),
        "total_documents": state.documents.lock().unwrap().len(),
        "revenue_this_month": "12.10",
    })))
}

async fn list_documents(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    state.guard("GET /documents".to_string(), &headers)?;
    Ok(Json(page(&state.documents.lock().unwrap(), &params, "code")))
}

async fn get_document(State(state): State<Arc<Backend>>, headers: HeaderMap, Path(id): Path<Uuid>) -> Reply {
    state.guard(format!("GET /documents/{}", id), &headers)?;
    find(&state.documents.lock().unwrap(), id)
        .map(Json)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Document not found"))
}

async fn change_status(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Reply {
    state.guard(format!("POST /documents/{}/change-status", id), &headers)?;
    let mut documents = state.documents.lock().unwrap();
    let document = documents
        .iter_mut()
        .find(|d| d["id"] == json!(id))
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Document not found"))?;
    document["status"] = body["status"].clone();
    Ok(Json(document.clone()))
}

async fn convert_document(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    state.guard(format!("POST /documents/{}/convert", id), &headers)?;
    let mut documents = state.documents.lock().unwrap();
    let source = find(&documents, id).ok_or_else(|| detail(StatusCode::NOT_FOUND, "Document not found"))?;
    let target = params.get("target_type").cloned().unwrap_or_default();

    let mut created = source;
    created["id"] = json!(Uuid::new_v4());
    created["code"] = json!("FAC-2024-0001");
    created["type"] = json!(target);
    created["status"] = json!("draft");
    documents.push(created.clone());
    Ok(Json(created))
}

async fn export_entity(State(state): State<Arc<Backend>>, headers: HeaderMap, Path(entity): Path<String>) -> Response {
    if let Err(response) = state.guard(format!("GET /export/{}", entity), &headers) {
        return response;
    }
    let mut csv = String::from("id,name\n");
    for client in state.clients.lock().unwrap().iter().take(2) {
        csv.push_str(&format!("{},{}\n", client["id"].as_str().unwrap_or_default(), client["name"].as_str().unwrap_or_default()));
    }
    ([("content-type", "text/csv")], csv).into_response()
}

async fn import_entity(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(entity): Path<String>,
    mut multipart: Multipart,
) -> Reply {
    state.guard(format!("POST /export/import/{}", entity), &headers)?;

    let mut rows = 0u64;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let text = field.text().await.unwrap_or_default();
        rows += text.lines().skip(1).filter(|l| !l.trim().is_empty()).count() as u64;
    }
    Ok(Json(json!({ "imported": rows, "skipped": 0, "errors": [] })))
}
