//! Integration tests driving the HTTP API end to end
//!
//! Builds the real router on in-memory sources and exercises the public
//! contract: pagination and cursors, ad filtering, schedule, device
//! registration and the error envelope.

use airwave::cli::{router, AppState};
use airwave::config::AirwaveConfig;
use airwave::device::{DeviceRegistry, MemoryDeviceRegistry};
use airwave::error::{Error, Result};
use airwave::schedule::{MemorySchedule, ScheduleSource};
use airwave::tracklist::{MemoryTrackSource, TrackEngine, TrackSource};
use airwave::types::{DeviceToken, Platform, ScheduleDay, Track, TrackKey};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::io::Write as _;
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// Fixtures
// ============================================================================

/// Play history with keys 1000, 2000, ... ascending by insertion, so the
/// API returns "Song {count}" first.
fn history(count: i64) -> Vec<Track> {
    (1..=count)
        .map(|i| {
            Track::new(
                TrackKey::from_millis(i * 1000),
                format!("Artist {i}"),
                format!("Song {i}"),
            )
        })
        .collect()
}

fn mark_ads(mut tracks: Vec<Track>, indexes: &[usize]) -> Vec<Track> {
    for &index in indexes {
        tracks[index].is_ad = true;
    }
    tracks
}

struct FailingSource;

#[async_trait]
impl TrackSource for FailingSource {
    async fn fetch_after(
        &self,
        _after: Option<TrackKey>,
        _fetch_size: usize,
    ) -> Result<Vec<Track>> {
        Err(Error::source("connection refused"))
    }
}

struct FailingSchedule;

#[async_trait]
impl ScheduleSource for FailingSchedule {
    async fn days(&self) -> Result<Vec<ScheduleDay>> {
        Err(Error::schedule("schedule file corrupted"))
    }
}

struct FailingRegistry;

#[async_trait]
impl DeviceRegistry for FailingRegistry {
    async fn register(&self, _token: &DeviceToken) -> Result<()> {
        Err(Error::registry("worker down"))
    }

    async fn unregister(&self, _token: &DeviceToken) -> Result<()> {
        Err(Error::registry("worker down"))
    }
}

fn app_with_tracks(tracks: Vec<Track>) -> Router {
    router(AppState::new(
        TrackEngine::new(Arc::new(MemoryTrackSource::new(tracks))),
        Arc::new(MemorySchedule::empty()),
        Arc::new(MemoryDeviceRegistry::new()),
    ))
}

fn app_with_registry(registry: Arc<MemoryDeviceRegistry>) -> Router {
    router(AppState::new(
        TrackEngine::new(Arc::new(MemoryTrackSource::empty())),
        Arc::new(MemorySchedule::empty()),
        registry,
    ))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn post_raw(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, &body.to_string()).await
}

// ============================================================================
// Track List API
// ============================================================================

#[tokio::test]
async fn test_tracklist_defaults_to_one_newest_track() {
    let (status, body) = get(app_with_tracks(history(5)), "/api/v1/tracklist").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["tracks"].as_array().unwrap().len(), 1);
    assert_eq!(body["tracks"][0]["title"], "Song 5");
    assert_eq!(body["lastTrack"], "5000");
}

#[tokio::test]
async fn test_tracklist_wire_shape() {
    let (status, body) = get(app_with_tracks(history(3)), "/api/v1/tracklist?limit=2").await;

    assert_eq!(status, StatusCode::OK);
    let track = &body["tracks"][0];
    assert_eq!(track["playedAt"], 3000);
    assert_eq!(track["artist"], "Artist 3");
    assert_eq!(track["title"], "Song 3");
    assert_eq!(track["isAd"], false);
}

#[tokio::test]
async fn test_tracklist_pages_follow_the_cursor() {
    let tracks = history(5);

    let (_, page1) = get(app_with_tracks(tracks.clone()), "/api/v1/tracklist?limit=2").await;
    assert_eq!(page1["count"], 2);
    assert_eq!(page1["tracks"][0]["playedAt"], 5000);
    assert_eq!(page1["tracks"][1]["playedAt"], 4000);
    assert_eq!(page1["lastTrack"], "4000");

    let (_, page2) = get(
        app_with_tracks(tracks.clone()),
        "/api/v1/tracklist?limit=2&lastTrack=4000",
    )
    .await;
    assert_eq!(page2["count"], 2);
    assert_eq!(page2["tracks"][0]["playedAt"], 3000);
    assert_eq!(page2["tracks"][1]["playedAt"], 2000);
    assert_eq!(page2["lastTrack"], "2000");

    let (_, page3) = get(
        app_with_tracks(tracks),
        "/api/v1/tracklist?limit=2&lastTrack=2000",
    )
    .await;
    assert_eq!(page3["count"], 1);
    assert_eq!(page3["tracks"][0]["playedAt"], 1000);
    assert!(page3.get("lastTrack").is_none());
}

#[tokio::test]
async fn test_tracklist_exact_boundary_page_then_empty() {
    let tracks = history(4);

    let (_, full) = get(app_with_tracks(tracks.clone()), "/api/v1/tracklist?limit=4").await;
    assert_eq!(full["count"], 4);
    assert_eq!(full["lastTrack"], "1000");

    let (status, empty) = get(
        app_with_tracks(tracks),
        "/api/v1/tracklist?limit=4&lastTrack=1000",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty["count"], 0);
    assert_eq!(empty["tracks"].as_array().unwrap().len(), 0);
    assert!(empty.get("lastTrack").is_none());
}

#[tokio::test]
async fn test_tracklist_filter_ads_is_presence_only() {
    let tracks = mark_ads(history(8), &[5, 6]);

    // Even an explicit "false" switches filtering on
    let (status, body) = get(
        app_with_tracks(tracks),
        "/api/v1/tracklist?limit=8&filterAds=false",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 6);
    for track in body["tracks"].as_array().unwrap() {
        assert_eq!(track["isAd"], false);
    }
}

#[tokio::test]
async fn test_tracklist_without_filter_keeps_ads() {
    let tracks = mark_ads(history(8), &[5, 6]);

    let (_, body) = get(app_with_tracks(tracks), "/api/v1/tracklist?limit=8").await;

    assert_eq!(body["count"], 8);
    let ads: Vec<_> = body["tracks"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|track| track["isAd"] == true)
        .collect();
    assert_eq!(ads.len(), 2);
}

#[tokio::test]
async fn test_tracklist_limit_out_of_range_is_rejected() {
    for uri in [
        "/api/v1/tracklist?limit=0",
        "/api/v1/tracklist?limit=26",
        "/api/v1/tracklist?limit=-3",
        "/api/v1/tracklist?limit=abc",
        "/api/v1/tracklist?limit=2.5",
    ] {
        let (status, body) = get(app_with_tracks(history(3)), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {uri}");
        assert_eq!(body["message"], "Limit has to be between 1 and 25");
    }
}

#[tokio::test]
async fn test_tracklist_malformed_cursor_restarts_from_first_page() {
    let (status, body) = get(
        app_with_tracks(history(3)),
        "/api/v1/tracklist?lastTrack=banana",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tracks"][0]["playedAt"], 3000);
}

#[tokio::test]
async fn test_tracklist_source_failure_stays_generic() {
    let app = router(AppState::new(
        TrackEngine::new(Arc::new(FailingSource)),
        Arc::new(MemorySchedule::empty()),
        Arc::new(MemoryDeviceRegistry::new()),
    ));

    let (status, body) = get(app, "/api/v1/tracklist").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error obtaining the track list");
    // Upstream detail goes to the log, never to the caller
    assert!(!body.to_string().contains("connection refused"));
}

// ============================================================================
// Schedule API
// ============================================================================

#[tokio::test]
async fn test_schedule_returns_days() {
    let yaml = r"
days:
  - day: Monday
    shows:
      - title: Morning Drive
        start: '06:00'
        end: '10:00'
        host: Alex
      - title: Overnight Mix
        start: '00:00'
        end: '06:00'
  - day: Tuesday
    shows: []
";
    let app = router(AppState::new(
        TrackEngine::new(Arc::new(MemoryTrackSource::empty())),
        Arc::new(MemorySchedule::from_yaml(yaml).unwrap()),
        Arc::new(MemoryDeviceRegistry::new()),
    ));

    let (status, body) = get(app, "/api/v1/schedule").await;

    assert_eq!(status, StatusCode::OK);
    let days = body["days"].as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["day"], "Monday");
    assert_eq!(days[0]["shows"][0]["title"], "Morning Drive");
    assert_eq!(days[0]["shows"][0]["host"], "Alex");
    // A show without a host serializes without the key
    assert!(days[0]["shows"][1].get("host").is_none());
    assert_eq!(days[1]["shows"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_schedule_failure_stays_generic() {
    let app = router(AppState::new(
        TrackEngine::new(Arc::new(MemoryTrackSource::empty())),
        Arc::new(FailingSchedule),
        Arc::new(MemoryDeviceRegistry::new()),
    ));

    let (status, body) = get(app, "/api/v1/schedule").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error obtaining the schedule");
    assert!(!body.to_string().contains("corrupted"));
}

// ============================================================================
// Device API
// ============================================================================

#[tokio::test]
async fn test_register_device() {
    let registry = Arc::new(MemoryDeviceRegistry::new());
    let app = app_with_registry(registry.clone());

    let (status, body) = post_json(
        app,
        "/api/v1/register",
        json!({ "token": "abc123", "type": "ios" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Device registered");
    assert!(registry.contains("abc123").await);
    assert_eq!(registry.platform_of("abc123").await, Some(Platform::Ios));
}

#[tokio::test]
async fn test_register_android_device() {
    let registry = Arc::new(MemoryDeviceRegistry::new());
    let app = app_with_registry(registry.clone());

    let (status, _) = post_json(
        app,
        "/api/v1/register",
        json!({ "token": "droid-1", "type": "android" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        registry.platform_of("droid-1").await,
        Some(Platform::Android)
    );
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let cases = [
        json!({ "token": "abc123", "type": "windows" }),
        json!({ "token": "   ", "type": "ios" }),
        json!({ "token": "", "type": "android" }),
        json!({ "type": "ios" }),
        json!({ "token": "abc123" }),
        json!({}),
    ];

    for case in cases {
        let registry = Arc::new(MemoryDeviceRegistry::new());
        let app = app_with_registry(registry.clone());

        let (status, body) = post_json(app, "/api/v1/register", case.clone()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {case}");
        assert_eq!(body["message"], "Incorrect input");
        assert_eq!(registry.len().await, 0);
    }
}

#[tokio::test]
async fn test_register_rejects_unparseable_json() {
    let (status, body) = post_raw(
        app_with_registry(Arc::new(MemoryDeviceRegistry::new())),
        "/api/v1/register",
        "not json{",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Incorrect input");
}

#[tokio::test]
async fn test_unregister_device() {
    let registry = Arc::new(MemoryDeviceRegistry::new());
    registry
        .register(&DeviceToken::new("abc123", Platform::Ios))
        .await
        .unwrap();
    let app = app_with_registry(registry.clone());

    let (status, body) = post_json(
        app,
        "/api/v1/unregister",
        json!({ "token": "abc123", "type": "ios" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Device unregistered");
    assert!(!registry.contains("abc123").await);
}

#[tokio::test]
async fn test_unregister_unknown_token_is_ok() {
    let (status, body) = post_json(
        app_with_registry(Arc::new(MemoryDeviceRegistry::new())),
        "/api/v1/unregister",
        json!({ "token": "never-seen", "type": "android" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Device unregistered");
}

#[tokio::test]
async fn test_register_backend_failure_stays_generic() {
    let app = router(AppState::new(
        TrackEngine::new(Arc::new(MemoryTrackSource::empty())),
        Arc::new(MemorySchedule::empty()),
        Arc::new(FailingRegistry),
    ));

    let (status, body) = post_json(
        app,
        "/api/v1/register",
        json!({ "token": "abc123", "type": "ios" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Device could not be registered");
    assert!(!body.to_string().contains("worker down"));
}

#[tokio::test]
async fn test_unregister_backend_failure_stays_generic() {
    let app = router(AppState::new(
        TrackEngine::new(Arc::new(MemoryTrackSource::empty())),
        Arc::new(MemorySchedule::empty()),
        Arc::new(FailingRegistry),
    ));

    let (status, body) = post_json(
        app,
        "/api/v1/unregister",
        json!({ "token": "abc123", "type": "ios" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Device could not be unregistered");
}

// ============================================================================
// Health and CORS
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = get(app_with_tracks(Vec::new()), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = app_with_tracks(history(1));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/tracklist")
                .header("Origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

// ============================================================================
// Configuration and Data Files
// ============================================================================

#[tokio::test]
async fn test_full_stack_from_files() {
    let dir = tempfile::tempdir().unwrap();

    let tracks_path = dir.path().join("tracks.json");
    let mut tracks_file = std::fs::File::create(&tracks_path).unwrap();
    write!(
        tracks_file,
        r#"[
            {{"playedAt": 1000, "artist": "Artist 1", "title": "Song 1"}},
            {{"playedAt": 2000, "artist": "Artist 2", "title": "Song 2", "isAd": true}},
            {{"playedAt": 3000, "artist": "Artist 3", "title": "Song 3"}}
        ]"#
    )
    .unwrap();

    let schedule_path = dir.path().join("schedule.yaml");
    let mut schedule_file = std::fs::File::create(&schedule_path).unwrap();
    write!(
        schedule_file,
        "days:\n  - day: Friday\n    shows:\n      - title: Request Hour\n        start: '18:00'\n        end: '19:00'\n"
    )
    .unwrap();

    let config_path = dir.path().join("airwave.yaml");
    let mut config_file = std::fs::File::create(&config_path).unwrap();
    write!(
        config_file,
        "server:\n  host: 127.0.0.1\n  port: 9090\ntracks:\n  file: {}\nschedule:\n  file: {}\n",
        tracks_path.display(),
        schedule_path.display()
    )
    .unwrap();

    let config = AirwaveConfig::from_file(&config_path).unwrap();
    assert_eq!(config.server.port, 9090);

    let tracks = MemoryTrackSource::from_file(config.tracks.file.as_deref().unwrap()).unwrap();
    let schedule = MemorySchedule::from_file(config.schedule.file.as_deref().unwrap()).unwrap();
    let app = router(AppState::new(
        TrackEngine::new(Arc::new(tracks)),
        Arc::new(schedule),
        Arc::new(MemoryDeviceRegistry::new()),
    ));

    let (status, body) = get(app.clone(), "/api/v1/tracklist?limit=5&filterAds").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["tracks"][0]["playedAt"], 3000);
    assert_eq!(body["tracks"][1]["playedAt"], 1000);

    let (status, body) = get(app, "/api/v1/schedule").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["days"][0]["day"], "Friday");
}
