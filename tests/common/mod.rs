#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::json;
use tokio::task::JoinHandle;

use structures_client::api::ApiClient;
use structures_client::session::{Session, SharedSession};

/// Unsigned token for user "ada" expiring in 2100.
pub const TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJhZGEiLCJleHAiOjQxMDI0NDQ4MDB9.sig";
pub const PASSWORD: &str = "correct horse";

#[derive(Default)]
pub struct MockState {
    pub hits: Mutex<Vec<String>>,
}

impl MockState {
    fn record(&self, uri: &Uri) {
        self.hits.lock().push(uri.to_string());
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().clone()
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl MockBackend {
    pub fn client(&self, session: Session) -> (ApiClient, SharedSession) {
        let shared = session.into_shared();
        let client = ApiClient::from_parts(&self.base_url, Duration::from_secs(5), shared.clone())
            .expect("mock url is loopback http");
        (client, shared)
    }
}

pub async fn spawn_backend() -> MockBackend {
    let state = Arc::new(MockState::default());
    let app = router(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend addr");
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockBackend {
        base_url: format!("http://{addr}"),
        state,
        handle,
    }
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .route("/api/auth/login", post(login))
        .route("/api/profile/", get(profile))
        .route("/api/profile/submissions/", get(submissions))
        .route("/api/problems/", get(|| async { "<html>maintenance</html>" }))
        .route("/api/forums/categories", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }))
        .route("/api/achievements/", get(achievement_catalog))
        .route("/api/achievements/user", get(user_achievements))
        .route("/api/streaks/calendar", get(streak_calendar))
        .route("/api/leaderboards/:kind", get(leaderboard))
        .route("/api/snippets/templates", get(templates))
        .route("/api/snippets/:id/use", post(use_template))
        .with_state(state)
}

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {TOKEN}");
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Could not validate credentials" })),
    )
        .into_response()
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login(Form(form): Form<LoginForm>) -> Response {
    if form.password != PASSWORD {
        return unauthorized();
    }
    Json(json!({ "access_token": TOKEN, "token_type": "bearer", "user": form.username }))
        .into_response()
}

async fn profile(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({ "id": 7, "username": "ada", "total_xp": 1750 })).into_response()
}

async fn submissions(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([
        {
            "id": 11, "problem_id": 3, "problem_title": "Two Sum", "problem_difficulty": "Easy",
            "result": "pass", "runtime": "12ms", "submission_time": "2024-03-01T08:30:00",
            "language": "python", "code": "print(1)", "overall_status": "pass",
            "execution_time": 0.012, "memory_usage": 14.2, "xp_awarded": 10
        },
        {
            "id": 12, "problem_id": 4, "problem_title": "Merge Intervals", "problem_difficulty": null,
            "result": "fail", "runtime": null, "submission_time": "2024-03-04T19:05:41.250000",
            "language": "rust", "code": "fn main() {}", "overall_status": "fail",
            "error_message": "wrong answer on case 2"
        }
    ]))
    .into_response()
}

/// Public listing of 150 templates with ids 1..=150, paged by skip/limit.
pub const TEMPLATE_COUNT: u32 = 150;

async fn templates(
    State(state): State<Arc<MockState>>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Json<serde_json::Value> {
    state.record(&uri);
    let skip: u32 = params.get("skip").and_then(|v| v.parse().ok()).unwrap_or(0);
    let limit: u32 = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(20);
    let end = skip.saturating_add(limit).min(TEMPLATE_COUNT);

    let page: Vec<serde_json::Value> = (skip + 1..=end)
        .map(|id| {
            json!({
                "id": id, "user_id": 1, "username": "ada", "title": format!("Template {id}"),
                "code": format!("// template {id}"), "language": "rust", "usage_count": 7
            })
        })
        .collect();
    Json(json!(page))
}

async fn achievement_catalog() -> Json<serde_json::Value> {
    Json(json!([
        {
            "id": 1, "name": "Problem Solver", "description": "Solve 10 problems",
            "icon": "🧩", "condition_type": "count", "condition_value": 10, "xp_reward": 50
        },
        {
            "id": 2, "name": "Week Warrior", "description": "Keep a 7 day streak",
            "icon": "🔥", "condition_type": "streak", "condition_value": 7, "xp_reward": 75
        }
    ]))
}

async fn user_achievements() -> Json<serde_json::Value> {
    Json(json!({
        "total_achievements": 2,
        "earned_count": 1,
        "achievements": [
            { "id": 1, "earned": true, "earned_at": "2024-03-02T10:00:00", "progress": 10, "total": 10, "xp_reward": 50 }
        ]
    }))
}

async fn streak_calendar(
    State(state): State<Arc<MockState>>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Json<serde_json::Value> {
    state.record(&uri);
    let days: i64 = params.get("days").and_then(|d| d.parse().ok()).unwrap_or(30);
    let start = chrono::NaiveDate::from_ymd_opt(2024, 2, 25).expect("valid date");

    let calendar: Vec<serde_json::Value> = (0..days)
        .map(|i| {
            let date = start + chrono::Duration::days(i);
            json!({ "date": date.to_string(), "solved": i % 2 == 0, "is_today": i == days - 1 })
        })
        .collect();
    let end = start + chrono::Duration::days(days - 1);

    Json(json!({
        "calendar_data": calendar,
        "total_solve_days": (days + 1) / 2,
        "date_range": { "start": start.to_string(), "end": end.to_string() }
    }))
}

async fn leaderboard(
    State(state): State<Arc<MockState>>,
    uri: Uri,
    Path(kind): Path<String>,
) -> Json<serde_json::Value> {
    state.record(&uri);
    Json(json!([
        { "rank": 1, "id": 3, "username": format!("{kind}-leader"), "total_xp": 9000, "problems_solved": 120, "level": 5, "title": "Master" },
        { "rank": 2, "id": 7, "username": "ada", "total_xp": 1750, "problems_solved": 31, "level": 3, "title": "Practitioner" }
    ]))
}

async fn use_template(
    State(state): State<Arc<MockState>>,
    uri: Uri,
    Path(id): Path<i64>,
) -> Json<serde_json::Value> {
    state.record(&uri);
    Json(json!({ "message": format!("template {id} used"), "usage_count": 8 }))
}
