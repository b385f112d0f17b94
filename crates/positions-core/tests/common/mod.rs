//! In-process stand-in for the position-management API.
//!
//! Accepts `alice` / `secret` and issues the token `abc`. Every request is
//! recorded so tests can assert what was (or was not) sent.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use positions_core::auth::TokenStore;
use positions_core::ApiClient;

pub const VALID_TOKEN: &str = "abc";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct MockData {
    positions: Vec<Value>,
    next_id: i64,
    requests: Vec<Recorded>,
}

#[derive(Clone, Default)]
pub struct MockState {
    inner: Arc<Mutex<MockData>>,
}

impl MockState {
    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn positions(&self) -> Vec<Value> {
        self.inner.lock().unwrap().positions.clone()
    }

    /// Insert a record as if another client had created it
    pub fn seed(&self, code: &str, name: &str, kind: &str, department: &str) -> i64 {
        let mut data = self.inner.lock().unwrap();
        data.next_id += 1;
        let id = data.next_id;
        data.positions.push(json!({
            "position_id": id,
            "position_code": code,
            "position_name": name,
            "position_type": kind,
            "department": department,
        }));
        id
    }

    fn record(&self, method: &'static str, path: String, headers: &HeaderMap, body: Value) {
        let authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.inner.lock().unwrap().requests.push(Recorded {
            method,
            path,
            authorization,
            body,
        });
    }
}

pub struct MockApi {
    pub base_url: String,
    pub state: MockState,
}

impl MockApi {
    pub fn client(&self, store: Arc<dyn TokenStore>) -> ApiClient {
        ApiClient::new(self.base_url.clone(), store).unwrap()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(&format!("Bearer {}", VALID_TOKEN)[..])
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Unauthorized", "statusCode": 401})),
    )
        .into_response()
}

async fn login(State(state): State<MockState>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    state.record("POST", "/auth/login".to_string(), &headers, body.clone());
    if body["username"] == "alice" && body["password"] == "secret" {
        (StatusCode::CREATED, Json(json!({"accessToken": VALID_TOKEN}))).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid username or password", "statusCode": 401})),
        )
            .into_response()
    }
}

async fn register(State(state): State<MockState>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    state.record("POST", "/auth/register".to_string(), &headers, body.clone());
    match body["username"].as_str() {
        Some("taken") => (
            StatusCode::CONFLICT,
            Json(json!({"message": "Username already exists", "statusCode": 409})),
        )
            .into_response(),
        Some("with-token") => (StatusCode::CREATED, Json(json!({"accessToken": "reg-token"}))).into_response(),
        _ => (StatusCode::CREATED, Json(json!({"id": 1, "username": body["username"]}))).into_response(),
    }
}

async fn list_positions(State(state): State<MockState>, headers: HeaderMap) -> Response {
    state.record("GET", "/positions".to_string(), &headers, Value::Null);
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(Value::Array(state.positions())).into_response()
}

async fn create_position(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("POST", "/positions".to_string(), &headers, body.clone());
    if !authorized(&headers) {
        return unauthorized();
    }
    if body["position_code"].as_str().unwrap_or_default().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": ["position_code should not be empty"]})),
        )
            .into_response();
    }
    let id = state.seed(
        body["position_code"].as_str().unwrap_or_default(),
        body["position_name"].as_str().unwrap_or_default(),
        body["position_type"].as_str().unwrap_or_default(),
        body["department"].as_str().unwrap_or_default(),
    );
    let created = state
        .positions()
        .into_iter()
        .find(|p| p["position_id"] == id)
        .unwrap();
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update_position(
    State(state): State<MockState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("PUT", format!("/positions/{}", id), &headers, body.clone());
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut data = state.inner.lock().unwrap();
    match data.positions.iter_mut().find(|p| p["position_id"] == id) {
        Some(record) => {
            for key in ["position_code", "position_name", "position_type", "department"] {
                if let Some(value) = body.get(key) {
                    record[key] = value.clone();
                }
            }
            Json(record.clone()).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"message": "Position not found"}))).into_response(),
    }
}

async fn delete_position(State(state): State<MockState>, Path(id): Path<i64>, headers: HeaderMap) -> Response {
    state.record("DELETE", format!("/positions/{}", id), &headers, Value::Null);
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut data = state.inner.lock().unwrap();
    let before = data.positions.len();
    data.positions.retain(|p| p["position_id"] != id);
    if data.positions.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "Position not found"}))).into_response();
    }
    StatusCode::OK.into_response()
}

async fn broken() -> Response {
    (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").into_response()
}

pub async fn spawn() -> MockApi {
    let state = MockState::default();
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/positions", get(list_positions).post(create_position))
        .route("/positions/{id}", put(update_position).delete(delete_position))
        .route("/broken", get(broken))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockApi {
        base_url: format!("http://{}", addr),
        state,
    }
}

/// A base URL nothing is listening on
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
