//! HTTP server mode exposing the radio API
//!
//! Routes mirror the public contract of the station backend: the paginated
//! play history, the weekly schedule and push device registration. Error
//! bodies never leak upstream detail; the specifics go to the log instead.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::cursor::CursorCodec;
use crate::device::DeviceRegistry;
use crate::error::{Error, Result};
use crate::schedule::ScheduleSource;
use crate::tracklist::{PageRequest, TrackEngine, DEFAULT_PAGE_LIMIT};
use crate::types::{DeviceToken, Track};

/// App state shared across handlers
#[derive(Clone)]
pub struct AppState {
    engine: TrackEngine,
    schedule: Arc<dyn ScheduleSource>,
    devices: Arc<dyn DeviceRegistry>,
}

impl AppState {
    pub fn new(
        engine: TrackEngine,
        schedule: Arc<dyn ScheduleSource>,
        devices: Arc<dyn DeviceRegistry>,
    ) -> Self {
        Self {
            engine,
            schedule,
            devices,
        }
    }
}

/// Body of a successful track list call
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TracklistResponse {
    count: usize,
    tracks: Vec<Track>,
    /// Cursor for the next page, omitted on the last page
    #[serde(skip_serializing_if = "Option::is_none")]
    last_track: Option<String>,
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    // Build CORS layer - allow all origins, the API is consumed by the
    // mobile apps and the web player
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/v1/tracklist", get(get_tracklist))
        .route("/api/v1/schedule", get(get_schedule))
        .route("/api/v1/register", post(register_device))
        .route("/api/v1/unregister", post(unregister_device))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let app = router(state);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| Error::config(format!("Invalid listen address {host}:{port}: {e}")))?;
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "version": crate::VERSION }))
}

/// Get a page of the play history
///
/// Accepts `limit` (1-25, default 1), `lastTrack` (opaque cursor) and
/// `filterAds` (presence alone enables filtering, the value is ignored).
/// A cursor that does not decode falls back to the first page.
async fn get_tracklist(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Some(limit) = parse_limit(params.get("limit").map(String::as_str)) else {
        return bad_request("Limit has to be between 1 and 25");
    };

    let request = PageRequest::new(limit)
        .with_filter_ads(params.contains_key("filterAds"))
        .with_cursor(CursorCodec::decode(params.get("lastTrack").map(String::as_str)));
    if request.validate().is_err() {
        return bad_request("Limit has to be between 1 and 25");
    }

    match state.engine.page(&request).await {
        Ok(page) => {
            let last_track = page.next_cursor.map(CursorCodec::encode);
            ok(TracklistResponse {
                count: page.len(),
                tracks: page.tracks,
                last_track,
            })
        }
        Err(e) if e.is_caller_fault() => bad_request("Limit has to be between 1 and 25"),
        Err(e) => {
            tracing::error!("Error getting track list: {e}");
            internal_server_error("Error obtaining the track list")
        }
    }
}

/// Get the weekly schedule
async fn get_schedule(State(state): State<Arc<AppState>>) -> Response {
    match state.schedule.days().await {
        Ok(days) => ok(json!({ "days": days })),
        Err(e) => {
            tracing::error!("Error getting schedule: {e}");
            internal_server_error("Error obtaining the schedule")
        }
    }
}

/// Register a device for push notifications
async fn register_device(State(state): State<Arc<AppState>>, body: String) -> Response {
    let Some(token) = parse_device_token(&body) else {
        return bad_request("Incorrect input");
    };

    match state.devices.register(&token).await {
        Ok(()) => ok(json!({ "message": "Device registered" })),
        Err(e) => {
            tracing::error!("Error registering device: {e}");
            internal_server_error("Device could not be registered")
        }
    }
}

/// Remove a device from push notifications
async fn unregister_device(State(state): State<Arc<AppState>>, body: String) -> Response {
    let Some(token) = parse_device_token(&body) else {
        return bad_request("Incorrect input");
    };

    match state.devices.unregister(&token).await {
        Ok(()) => ok(json!({ "message": "Device unregistered" })),
        Err(e) => {
            tracing::error!("Error unregistering device: {e}");
            internal_server_error("Device could not be unregistered")
        }
    }
}

/// Parse the page limit. Absent means the default; anything that is not
/// an unsigned integer is the caller's fault.
fn parse_limit(raw: Option<&str>) -> Option<usize> {
    match raw {
        None => Some(DEFAULT_PAGE_LIMIT),
        Some(raw) => raw.parse().ok(),
    }
}

/// Decode a device token body. Unparseable JSON, unknown platforms and
/// blank tokens all collapse to the same caller fault.
fn parse_device_token(body: &str) -> Option<DeviceToken> {
    let token: DeviceToken = serde_json::from_str(body).ok()?;
    token.is_valid().then_some(token)
}

fn ok(body: impl Serialize) -> Response {
    (StatusCode::OK, Json(body)).into_response()
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
}

fn internal_server_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": message })),
    )
        .into_response()
}
