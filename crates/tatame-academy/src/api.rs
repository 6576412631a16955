//! HTTP API for the academy node.
//!
//! All bodies are JSON. Success responses carry `{"success": true, ...}`,
//! failures `{"error": "<message>"}`. Every student payload embeds the
//! derived `presences_for_next_degree`, computed at response time.

use crate::auth::Identity;
use crate::error::Error;
use crate::models::{Role, StudentRecord};
use crate::node::AcademyState;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

type AppState = Arc<AcademyState>;

/// Presence threshold for the close-to-graduation query when the caller
/// does not give one.
pub const DEFAULT_MAX_PRESENCES: u64 = 10;

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    // CORS layer for browser access
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Sessions
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/logout", post(logout))
        // Students
        .route("/api/v1/students", get(list_students))
        .route("/api/v1/students", post(create_student))
        .route("/api/v1/students/close-to-graduation", get(close_to_graduation))
        .route("/api/v1/students/:uid", get(get_student))
        .route("/api/v1/students/:uid", put(update_student))
        .route("/api/v1/students/:uid/presences", post(record_presence))
        .layer(cors)
        .with_state(state)
}

// --- Error envelope ---

/// Error response: status code plus `{"error": "..."}`.
struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        let status = match &e {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::MissingField(_) | Error::InvalidInput(_) | Error::EmailTaken => {
                StatusCode::BAD_REQUEST
            }
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::Storage(_) | Error::Serialization(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

// --- Student payloads ---

/// Student payload: the record plus the derived presence count.
#[derive(Debug, Serialize)]
struct StudentView {
    #[serde(flatten)]
    record: StudentRecord,
    presences_for_next_degree: u64,
}

impl From<StudentRecord> for StudentView {
    fn from(record: StudentRecord) -> Self {
        let presences_for_next_degree = record.presences_for_next_degree();
        Self {
            record,
            presences_for_next_degree,
        }
    }
}

/// Authenticate the request and require the teacher role.
fn require_teacher(state: &AppState, headers: &HeaderMap) -> Result<Identity, ApiError> {
    let identity = state.auth.authenticate(headers)?;
    if identity.role != Role::Teacher {
        return Err(Error::Forbidden.into());
    }
    Ok(identity)
}

/// Pull a string field out of a loose JSON body, empty when absent.
fn string_field(body: &Value, field: &str) -> String {
    body.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// --- Health endpoints ---

async fn health() -> &'static str {
    "OK"
}

async fn ready() -> &'static str {
    "OK"
}

// --- Session endpoints ---

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let (token, account) = state.auth.login(&req.email, &req.password)?;
    Ok(Json(json!({
        "success": true,
        "token": token,
        "uid": account.uid,
        "role": account.role,
    })))
}

async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    state.auth.authenticate(&headers)?;
    state.auth.logout(&headers)?;
    Ok(Json(json!({ "success": true })))
}

// --- Student endpoints ---

async fn list_students(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    require_teacher(&state, &headers)?;

    let students: Vec<StudentView> = state
        .roster
        .list_all()
        .into_iter()
        .map(StudentView::from)
        .collect();

    Ok(Json(json!({ "success": true, "students": students })))
}

async fn create_student(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    require_teacher(&state, &headers)?;

    for field in ["name", "email", "belt", "age"] {
        if body.get(field).is_none() {
            return Err(Error::MissingField(field.to_string()).into());
        }
    }

    let name = string_field(&body, "name");
    let email = string_field(&body, "email");
    let belt = string_field(&body, "belt");
    let age = body.get("age").and_then(Value::as_i64).unwrap_or(0);

    let password = body
        .get("password")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| state.config.default_password.clone());

    // Provision the login account first; its uid keys the record.
    let account = state
        .directory
        .create_account(&email, &name, Role::Student, &password)?;

    let mut record = StudentRecord::new(account.uid, name, email, belt, age);
    record.address = string_field(&body, "address");
    record.education = string_field(&body, "education");
    record.degrees = body.get("degrees").and_then(Value::as_i64).unwrap_or(0);

    state.roster.save(&record)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Student created successfully",
            "student": StudentView::from(record),
        })),
    ))
}

async fn get_student(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let identity = state.auth.authenticate(&headers)?;
    if identity.role != Role::Teacher && identity.uid != uid {
        return Err(Error::Forbidden.into());
    }

    let record = state
        .roster
        .get_by_id(&uid)
        .ok_or_else(|| Error::NotFound("Student".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "student": StudentView::from(record),
    })))
}

async fn update_student(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    require_teacher(&state, &headers)?;

    let mut record = state
        .roster
        .get_by_id(&uid)
        .ok_or_else(|| Error::NotFound("Student".to_string()))?;

    if let Some(name) = body.get("name").and_then(Value::as_str) {
        record.name = name.to_string();
    }
    if let Some(belt) = body.get("belt").and_then(Value::as_str) {
        record.belt = belt.to_string();
    }
    if let Some(age) = body.get("age").and_then(Value::as_i64) {
        record.age = age;
    }
    if let Some(address) = body.get("address").and_then(Value::as_str) {
        record.address = address.to_string();
    }
    if let Some(education) = body.get("education").and_then(Value::as_str) {
        record.education = education.to_string();
    }
    if let Some(degrees) = body.get("degrees").and_then(Value::as_i64) {
        record.degrees = degrees;
    }

    state.roster.save(&record)?;

    Ok(Json(json!({
        "success": true,
        "message": "Student updated successfully",
        "student": StudentView::from(record),
    })))
}

// --- Attendance endpoints ---

#[derive(Debug, Deserialize)]
struct PresenceRequest {
    date: Option<DateTime<Utc>>,
}

async fn record_presence(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    headers: HeaderMap,
    body: Option<Json<PresenceRequest>>,
) -> Result<Json<Value>, ApiError> {
    require_teacher(&state, &headers)?;

    let mut record = state
        .roster
        .get_by_id(&uid)
        .ok_or_else(|| Error::NotFound("Student".to_string()))?;

    let date = body.and_then(|Json(req)| req.date);
    state.roster.record_attendance(&mut record, date)?;

    Ok(Json(json!({
        "success": true,
        "student": StudentView::from(record),
    })))
}

// --- Graduation endpoints ---

#[derive(Debug, Deserialize)]
struct GraduationQuery {
    max_presences: Option<u64>,
}

async fn close_to_graduation(
    State(state): State<AppState>,
    Query(query): Query<GraduationQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    require_teacher(&state, &headers)?;

    let threshold = query.max_presences.unwrap_or(DEFAULT_MAX_PRESENCES);
    let students: Vec<StudentView> = state
        .roster
        .list_close_to_graduation(threshold)
        .into_iter()
        .map(StudentView::from)
        .collect();
    let count = students.len();

    Ok(Json(json!({
        "success": true,
        "students": students,
        "count": count,
    })))
}
