//! In-process stand-in for the barber shop API.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Form, Json, Router,
};
use barberia_core::{ApiClient, ClientBuilder};
use serde_json::{json, Value};
use tempfile::TempDir;

pub const USERNAME: &str = "carlos";
pub const PASSWORD: &str = "secret";
pub const TOKEN: &str = "good-token";

/// Mutable state of the fake server.
#[derive(Debug)]
pub struct FakeState {
    /// Token currently accepted; `None` makes every bearer request 401
    pub valid_token: Option<String>,
    pub appointments: Vec<Value>,
    pub next_id: u64,
    /// `Authorization` header of every request, in order
    pub seen_auth: Vec<Option<String>>,
    pub signup_calls: usize,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            valid_token: Some(TOKEN.to_string()),
            appointments: vec![json!({
                "id": 1,
                "user_id": 2,
                "date": "2030-01-15",
                "time": "12:00:00",
                "service_type": "Tinte",
                "notes": "",
                "created_at": "2029-12-30T10:00:00"
            })],
            next_id: 2,
            seen_auth: Vec::new(),
            signup_calls: 0,
        }
    }
}

type Shared = Arc<Mutex<FakeState>>;

pub struct FakeServer {
    pub base_url: String,
    pub state: Shared,
}

impl FakeServer {
    /// Starts the fake API on an ephemeral port.
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(FakeState::default()));

        let api = Router::new()
            .route("/token", post(token))
            .route("/signup", post(signup))
            .route("/users/me", get(me))
            .route("/admin/users", get(users))
            .route("/appointments/", post(create))
            .route("/appointments/availability/{date}", get(availability))
            .route("/appointments/my-appointments", get(mine))
            .route("/appointments/admin/all-appointments", get(all))
            .route("/appointments/{id}", delete(cancel))
            .with_state(state.clone());
        let app = Router::new().nest("/api/v1", api);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake server");
        let addr = listener.local_addr().expect("Failed to read address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake server failed");
        });

        Self {
            base_url: format!("http://{addr}/api/v1"),
            state,
        }
    }

    /// Builds a client for this server with a fresh session file.
    pub async fn client(&self) -> (TempDir, ApiClient) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let client = ClientBuilder::new()
            .with_base_url(Some(self.base_url.as_str()))
            .with_session_path(Some(temp_dir.path().join("session.db")))
            .build()
            .await
            .expect("Failed to build client");
        (temp_dir, client)
    }

    /// Builds a client that is already logged in.
    pub async fn logged_in_client(&self) -> (TempDir, ApiClient) {
        let (temp_dir, client) = self.client().await;
        client
            .login(&barberia_core::params::Login {
                username: USERNAME.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .expect("Failed to log in");
        (temp_dir, client)
    }

    pub fn expire_token(&self) {
        self.state.lock().expect("lock").valid_token = None;
    }

    pub fn seen_auth(&self) -> Vec<Option<String>> {
        self.state.lock().expect("lock").seen_auth.clone()
    }

    pub fn signup_calls(&self) -> usize {
        self.state.lock().expect("lock").signup_calls
    }
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn authorize(state: &Shared, headers: &HeaderMap) -> Result<(), Response> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let mut state = state.lock().expect("lock");
    state.seen_auth.push(header.clone());

    let expected = state.valid_token.as_ref().map(|token| format!("Bearer {token}"));
    if header.is_some() && header == expected {
        Ok(())
    } else {
        Err(detail(StatusCode::UNAUTHORIZED, "Could not validate credentials"))
    }
}

fn carlos() -> Value {
    json!({
        "id": 1,
        "username": USERNAME,
        "email": "carlos@example.com",
        "created_at": "2025-09-01T09:00:00.000123"
    })
}

async fn token(Form(form): Form<HashMap<String, String>>) -> Response {
    let username = form.get("username").map(String::as_str);
    let password = form.get("password").map(String::as_str);
    if username == Some(USERNAME) && password == Some(PASSWORD) {
        Json(json!({ "access_token": TOKEN, "token_type": "bearer" })).into_response()
    } else {
        detail(StatusCode::UNAUTHORIZED, "Usuario o contraseña incorrectos")
    }
}

async fn signup(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    state.lock().expect("lock").signup_calls += 1;
    match body["username"].as_str() {
        Some(USERNAME) => detail(StatusCode::BAD_REQUEST, "El usuario ya existe"),
        Some("weak") => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "detail": [
                    { "loc": ["body", "password"], "msg": "password too short", "type": "value_error" },
                    { "loc": ["body", "email"], "msg": "invalid email", "type": "value_error" }
                ]
            })),
        )
            .into_response(),
        Some(username) => Json(json!({
            "id": 3,
            "username": username,
            "email": body["email"],
            "created_at": null
        }))
        .into_response(),
        None => detail(StatusCode::UNPROCESSABLE_ENTITY, "username required"),
    }
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    Json(carlos()).into_response()
}

async fn users(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    Json(json!([
        carlos(),
        { "id": 2, "username": "lucia", "email": "lucia@example.com", "created_at": null }
    ]))
    .into_response()
}

async fn availability(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(date): Path<String>,
) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    if date == "2030-01-02" {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let taken: Vec<String> = state
        .lock()
        .expect("lock")
        .appointments
        .iter()
        .filter(|a| a["date"] == date.as_str())
        .filter_map(|a| a["time"].as_str().map(|t| t[..5].to_string()))
        .collect();

    let slots: Vec<Value> = ["09:00", "09:30", "10:00", "10:30", "12:00"]
        .iter()
        .map(|time| {
            json!({
                "time": format!("{time}:00"),
                "available": !taken.iter().any(|t| t.as_str() == *time),
            })
        })
        .collect();
    Json(json!({ "date": date, "available_slots": slots })).into_response()
}

async fn create(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    let mut state = state.lock().expect("lock");
    let clash = state
        .appointments
        .iter()
        .any(|a| a["date"] == body["date"] && a["time"].as_str().map(|t| &t[..5]) == body["time"].as_str());
    if clash {
        return detail(StatusCode::BAD_REQUEST, "Este horario ya está reservado");
    }

    let id = state.next_id;
    state.next_id += 1;
    let record = json!({
        "id": id,
        "user_id": 1,
        "date": body["date"],
        "time": body["time"],
        "service_type": body["service_type"],
        "notes": body["notes"],
        "created_at": "2030-01-01T08:00:00"
    });
    state.appointments.push(record.clone());
    Json(record).into_response()
}

async fn mine(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let own: Vec<Value> = state
        .lock()
        .expect("lock")
        .appointments
        .iter()
        .filter(|a| a["user_id"] == 1)
        .cloned()
        .collect();
    Json(own).into_response()
}

async fn all(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let appointments = state.lock().expect("lock").appointments.clone();
    Json(appointments).into_response()
}

async fn cancel(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<u64>) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    let mut state = state.lock().expect("lock");
    let before = state.appointments.len();
    state.appointments.retain(|a| a["id"] != id);
    if state.appointments.len() == before {
        return detail(StatusCode::NOT_FOUND, "Cita no encontrada");
    }
    Json(json!({ "message": "Cita cancelada exitosamente" })).into_response()
}
