//! Local stand-in for the catalog service
//!
//! Serves canned catalogs and asset bytes from an axum router bound to an
//! ephemeral port, and records every request it sees.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::task::JoinHandle;

/// One request as seen by the server
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub accept: Option<String>,
    pub user_agent: Option<String>,
}

struct ServerState {
    tracks: Value,
    songs: Value,
    asset_size: usize,
    seen: Mutex<Vec<SeenRequest>>,
}

impl ServerState {
    fn record(&self, uri: &Uri, headers: &HeaderMap) {
        let header_value = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.seen.lock().unwrap().push(SeenRequest {
            path: uri.path().to_string(),
            accept: header_value(header::ACCEPT),
            user_agent: header_value(header::USER_AGENT),
        });
    }
}

/// Running test server
pub struct TestServer {
    pub base_url: String,
    state: Arc<ServerState>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.state.seen.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.seen.lock().unwrap().len()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Deterministic asset body for a record id
pub fn asset_bytes(id: u32, size: usize) -> Vec<u8> {
    (0..size).map(|i| (i as u32).wrapping_add(id) as u8).collect()
}

/// Start a server for the given catalogs; asset bodies are `asset_size` bytes
pub async fn spawn(tracks: Value, songs: Value, asset_size: usize) -> anyhow::Result<TestServer> {
    let state = Arc::new(ServerState {
        tracks,
        songs,
        asset_size,
        seen: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/v1/backgroundmusic", get(list_tracks))
        .route("/v1/backgroundmusic/:id", get(track_by_id))
        .route("/v1/songs", get(list_songs))
        .route("/v1/songs/:id", get(song_by_id))
        .route("/v1/hourly/:id", get(track_asset))
        .route("/v1/music/:id", get(song_asset))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server failed");
    });

    Ok(TestServer {
        base_url: format!("http://{}", addr),
        state,
        handle,
    })
}

/// Server that answers one request with a 200 declaring `declared` body
/// bytes, sends only `sent` bytes, then closes the connection
pub async fn spawn_truncating(declared: usize, sent: usize) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let Ok((mut stream, _)) = listener.accept().await else {
            return;
        };

        // Consume the request head before answering
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => head.extend_from_slice(&buf[..n]),
            }
        }

        let response_head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: audio/mpeg\r\nContent-Length: {}\r\n\r\n",
            declared
        );
        let _ = stream.write_all(response_head.as_bytes()).await;
        let _ = stream.write_all(&asset_bytes(0, sent)).await;
        let _ = stream.flush().await;
        let _ = stream.shutdown().await;
    });

    Ok(format!("http://{}", addr))
}

/// A base URL nothing is listening on
pub async fn unreachable_base_url() -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

/// Route logs through the test writer; safe to call from every test
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("acnh_catalog=debug")
        .try_init();
}

fn find_by_id(catalog: &Value, id: u32) -> Option<Value> {
    catalog
        .as_object()?
        .values()
        .find(|record| record.get("id").and_then(Value::as_u64) == Some(id as u64))
        .cloned()
}

fn record_response(catalog: &Value, id: u32) -> Response {
    match find_by_id(catalog, id) {
        Some(record) => Json(record).into_response(),
        None => {
            let body = Json(serde_json::json!({"message": "not found"}));
            (StatusCode::NOT_FOUND, body).into_response()
        }
    }
}

fn asset_response(catalog: &Value, id: u32, size: usize) -> Response {
    if find_by_id(catalog, id).is_none() {
        return StatusCode::NOT_FOUND.into_response();
    }
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "audio/mpeg")],
        asset_bytes(id, size),
    )
        .into_response()
}

async fn list_tracks(
    State(state): State<Arc<ServerState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.record(&uri, &headers);
    Json(state.tracks.clone()).into_response()
}

async fn track_by_id(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u32>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.record(&uri, &headers);
    record_response(&state.tracks, id)
}

async fn list_songs(
    State(state): State<Arc<ServerState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.record(&uri, &headers);
    Json(state.songs.clone()).into_response()
}

async fn song_by_id(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u32>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.record(&uri, &headers);
    record_response(&state.songs, id)
}

async fn track_asset(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u32>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.record(&uri, &headers);
    asset_response(&state.tracks, id, state.asset_size)
}

async fn song_asset(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u32>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.record(&uri, &headers);
    asset_response(&state.songs, id, state.asset_size)
}
