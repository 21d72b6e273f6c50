//! Client, tracker and dashboard against an in-process mock backend

use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use reeltrack::client::{ClientConfig, ClientError, ReelsClient, TrackerBackend};
use reeltrack::estimate::SecondsPerReel;
use reeltrack::model::{Mood, StartSessionRequest};
use reeltrack::tracker::{messages, StartOutcome, Tracker, TrackerError};

/// What the mock answers and what it has seen
#[derive(Default)]
struct MockState {
    active: Option<Value>,
    probe_fails: bool,
    start_error: Option<(StatusCode, Value)>,
    end_error: Option<(StatusCode, Value)>,
    weekly_fails: bool,
    start_bodies: Vec<Value>,
    end_bodies: Vec<Value>,
    summary_hits: usize,
}

type Shared = Arc<Mutex<MockState>>;

fn session_json(id: i64, start: chrono::DateTime<Utc>) -> Value {
    json!({
        "id": id,
        // naive timestamp, as the backend sends it
        "start_time": start.naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string(),
        "end_time": null,
        "duration_minutes": null,
        "reels_watched": null,
        "mood": null,
        "date": start.date_naive().to_string(),
    })
}

async fn start_session(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut s = state.lock().unwrap();
    s.start_bodies.push(body);
    if let Some((status, detail)) = s.start_error.clone() {
        return (status, Json(detail)).into_response();
    }
    let session = session_json(101, Utc::now());
    s.active = Some(session.clone());
    (StatusCode::CREATED, Json(session)).into_response()
}

async fn end_session(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut s = state.lock().unwrap();
    s.end_bodies.push(body.clone());
    if let Some((status, detail)) = s.end_error.clone() {
        return (status, Json(detail)).into_response();
    }
    let mut session = match s.active.take() {
        Some(session) => session,
        None => {
            return (StatusCode::NOT_FOUND, Json(json!({"detail": "Session not found."})))
                .into_response()
        }
    };
    session["end_time"] = json!(Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string());
    session["reels_watched"] = body["reels_watched"].clone();
    session["mood"] = body["mood"].clone();
    Json(session).into_response()
}

async fn active_session(State(state): State<Shared>) -> Response {
    let s = state.lock().unwrap();
    if s.probe_fails {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    Json(s.active.clone().unwrap_or(Value::Null)).into_response()
}

async fn daily(State(state): State<Shared>) -> Json<Value> {
    state.lock().unwrap().summary_hits += 1;
    let today = chrono::Local::now().date_naive();
    let yesterday = today - Duration::days(1);
    Json(json!({"items": [
        {"date": yesterday.to_string(), "total_sessions": 4, "total_reels": 20, "total_minutes": 95},
        {"date": today.to_string(), "total_sessions": 6, "total_reels": 30, "total_minutes": 40},
    ]}))
}

async fn weekly(State(state): State<Shared>) -> Response {
    let mut s = state.lock().unwrap();
    s.summary_hits += 1;
    if s.weekly_fails {
        return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"detail": "down"}))).into_response();
    }
    Json(json!({"items": [
        {"year": 2025, "week": 1, "total_reels": 7, "total_minutes": 10},
        {"year": 2025, "week": 2, "total_reels": 74, "total_minutes": 120},
    ]}))
    .into_response()
}

async fn monthly(State(state): State<Shared>) -> Json<Value> {
    state.lock().unwrap().summary_hits += 1;
    Json(json!({"items": [
        {"year": 2025, "month": 1, "start_date": "2025-01-01", "end_date": "2025-01-31",
         "total_sessions": 10, "total_reels": 50, "total_minutes": 135},
    ]}))
}

async fn streaks(State(state): State<Shared>) -> Json<Value> {
    state.lock().unwrap().summary_hits += 1;
    Json(json!({"current_streak": 2, "longest_streak": 9}))
}

/// Serve the mock on an ephemeral port; returns the base URL
async fn spawn_backend(state: Shared) -> String {
    let app = Router::new()
        .route("/session/start", post(start_session))
        .route("/session/end", post(end_session))
        .route("/session/active", get(active_session))
        .route("/summary/daily", get(daily))
        .route("/summary/weekly", get(weekly))
        .route("/summary/monthly", get(monthly))
        .route("/summary/streaks", get(streaks))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/", addr)
}

fn client_for(base_url: String) -> ReelsClient {
    ReelsClient::new(ClientConfig {
        base_url,
        request_timeout_ms: 5_000,
    })
    .unwrap()
}

#[tokio::test]
async fn test_active_probe_null_and_present() {
    let state = Shared::default();
    let client = client_for(spawn_backend(state.clone()).await);

    assert_eq!(client.active_session().await.unwrap(), None);

    let started = Utc::now() - Duration::minutes(3);
    state.lock().unwrap().active = Some(session_json(7, started));

    let session = client.active_session().await.unwrap().unwrap();
    assert_eq!(session.id, 7);
    assert!(session.is_active());
    assert_eq!(session.start_time.timestamp(), started.timestamp());
}

#[tokio::test]
async fn test_start_sends_offset() {
    let state = Shared::default();
    let client = client_for(spawn_backend(state.clone()).await);

    let session = client
        .start_session(&StartSessionRequest {
            tz_offset_minutes: Some(330),
        })
        .await
        .unwrap();
    assert_eq!(session.id, 101);

    let bodies = state.lock().unwrap().start_bodies.clone();
    assert_eq!(bodies, vec![json!({"tz_offset_minutes": 330})]);
}

#[tokio::test]
async fn test_api_error_carries_detail() {
    let state = Shared::default();
    state.lock().unwrap().start_error = Some((
        StatusCode::BAD_REQUEST,
        json!({"detail": "A session is already active. End it before starting a new one."}),
    ));
    let client = client_for(spawn_backend(state).await);

    let err = client
        .start_session(&StartSessionRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(
        err.user_message(messages::START_FAILED),
        "A session is already active. End it before starting a new one."
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    // bind then drop to get a port nobody listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{}", addr));
    let err = client.streaks().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(err.user_message("fallback"), "fallback");
}

#[tokio::test]
async fn test_tracker_cycle() {
    let state = Shared::default();
    let client = client_for(spawn_backend(state.clone()).await);
    let mut tracker = Tracker::new(client, SecondsPerReel::new(8));

    assert!(tracker.restore().await.is_idle());

    let outcome = tracker.start().await.unwrap();
    assert!(matches!(outcome, StartOutcome::Started(ref s) if s.id == 101));
    assert!(!tracker.state().can_start());

    assert!(tracker.begin_end());
    let start = tracker.state().session().unwrap().start_time;
    let ended = tracker
        .end(Some(Mood::Relaxed), start + Duration::seconds(95))
        .await
        .unwrap();

    assert_eq!(ended.reels_watched, Some(12));
    assert_eq!(ended.mood.as_deref(), Some("Relaxed"));
    assert!(tracker.state().is_idle());

    let bodies = state.lock().unwrap().end_bodies.clone();
    assert_eq!(
        bodies,
        vec![json!({"session_id": 101, "reels_watched": 12, "mood": "Relaxed"})]
    );
}

#[tokio::test]
async fn test_start_while_active_sends_nothing() {
    let state = Shared::default();
    state.lock().unwrap().active = Some(session_json(55, Utc::now()));
    let client = client_for(spawn_backend(state.clone()).await);

    let mut tracker = Tracker::new(client, SecondsPerReel::default());
    tracker.restore().await;
    assert_eq!(tracker.state().session().map(|s| s.id), Some(55));

    let outcome = tracker.start().await.unwrap();
    assert!(matches!(outcome, StartOutcome::AlreadyActive(ref s) if s.id == 55));
    assert!(state.lock().unwrap().start_bodies.is_empty());
}

#[tokio::test]
async fn test_failed_probe_reads_as_idle() {
    let state = Shared::default();
    {
        let mut s = state.lock().unwrap();
        s.active = Some(session_json(3, Utc::now()));
        s.probe_fails = true;
    }
    let client = client_for(spawn_backend(state).await);

    let mut tracker = Tracker::new(client, SecondsPerReel::default());
    assert!(tracker.restore().await.is_idle());
}

#[tokio::test]
async fn test_failed_end_keeps_state() {
    let state = Shared::default();
    state.lock().unwrap().active = Some(session_json(12, Utc::now()));
    let client = client_for(spawn_backend(state.clone()).await);

    let mut tracker = Tracker::new(client, SecondsPerReel::default());
    tracker.restore().await;
    assert!(tracker.begin_end());

    state.lock().unwrap().end_error = Some((StatusCode::INTERNAL_SERVER_ERROR, json!({})));
    let err = tracker.end(None, Utc::now()).await.unwrap_err();
    assert!(matches!(err, TrackerError::Request { .. }));
    assert_eq!(err.to_string(), messages::END_FAILED);

    // dialog still open on the same session
    assert!(tracker.state().is_ending());
    assert_eq!(tracker.state().session().map(|s| s.id), Some(12));

    assert!(tracker.cancel_end());
    assert!(tracker.state().can_end());
}

#[tokio::test]
async fn test_rejected_start_stays_idle() {
    let state = Shared::default();
    state.lock().unwrap().start_error = Some((
        StatusCode::BAD_REQUEST,
        json!({"detail": "A session is already active. End it before starting a new one."}),
    ));
    let client = client_for(spawn_backend(state.clone()).await);

    let mut tracker = Tracker::new(client, SecondsPerReel::default());
    let err = tracker.start().await.unwrap_err();

    assert!(matches!(
        err,
        TrackerError::Request { source: ClientError::Api { status: 400, .. }, .. }
    ));
    assert_eq!(
        err.to_string(),
        "A session is already active. End it before starting a new one."
    );
    assert!(tracker.state().is_idle());
    assert_eq!(state.lock().unwrap().start_bodies.len(), 1);
}

#[tokio::test]
async fn test_end_without_session() {
    let state = Shared::default();
    let client = client_for(spawn_backend(state.clone()).await);
    let mut tracker = Tracker::new(client, SecondsPerReel::default());

    let err = tracker.end(None, Utc::now()).await.unwrap_err();
    assert!(matches!(err, TrackerError::NoActiveSession));
    assert!(state.lock().unwrap().end_bodies.is_empty());
}

#[tokio::test]
async fn test_dashboard_load_and_derive() {
    let state = Shared::default();
    let client = client_for(spawn_backend(state.clone()).await);

    let data = reeltrack::dashboard::load(&client).await.unwrap();
    assert_eq!(state.lock().unwrap().summary_hits, 4);
    assert_eq!(data.daily.len(), 2);
    assert_eq!(data.weekly.len(), 2);
    assert_eq!(data.monthly[0].start_date, "2025-01-01".parse().ok());

    let (_, stats) = reeltrack::dashboard::load_or_empty(&client).await;
    assert_eq!(stats.today_reels, 30);
    assert!(stats.tracked_today);
    assert_eq!(stats.weekly_average_reels, 11);
    assert_eq!(stats.longest_daily_minutes, 95);
    assert_eq!(stats.reels_per_session, "5.0");
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.longest_streak, 9);
}

#[tokio::test]
async fn test_dashboard_failure_leaves_empty() {
    let state = Shared::default();
    state.lock().unwrap().weekly_fails = true;
    let client = client_for(spawn_backend(state).await);

    let err = reeltrack::dashboard::load(&client).await.unwrap_err();
    assert_eq!(err.status(), Some(503));

    let (data, stats) = reeltrack::dashboard::load_or_empty(&client).await;
    assert!(data.daily.is_empty());
    assert_eq!(stats.today_reels, 0);
    assert_eq!(stats.reels_per_session, "0");
}
