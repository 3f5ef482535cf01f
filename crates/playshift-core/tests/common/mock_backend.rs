#![allow(dead_code)]

//! In-process stand-in for the conversion backend.
//!
//! Serves the `/api/v1` surface from an in-memory store, answers list
//! endpoints with the `{"playlists": [...]}` envelope (songs as a bare array)
//! and records every request so tests can assert on what was sent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use playshift_core::api::ApiClient;
use playshift_core::config::ApiConfig;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Value,
}

#[derive(Debug, Default)]
pub struct Store {
    pub playlists: Vec<Value>,
    pub songs: Vec<Value>,
    pub requests: Vec<Recorded>,
    /// `(method, path, status)` answered with `{"error": "injected failure"}`.
    pub failures: Vec<(String, String, u16)>,
    /// Answer PUT with `{"message": ...}` instead of the updated entity.
    pub ack_updates: bool,
    /// When set, `/convert` answers 200 with `success: false` and this message.
    pub refuse_conversions: Option<String>,
    next_id: u32,
}

type Shared = Arc<Mutex<Store>>;

pub struct MockBackend {
    pub base_url: String,
    store: Shared,
    task: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let store = Shared::default();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        let app = router(store.clone());
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend");
        });
        Self {
            base_url: format!("http://{}/api/v1", addr),
            store,
            task,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: self.base_url.clone(),
            timeout_secs: Some(5),
        })
        .expect("client")
    }

    pub fn seed_playlist(&self, value: Value) {
        self.store.lock().unwrap().playlists.push(value);
    }

    pub fn seed_song(&self, value: Value) {
        self.store.lock().unwrap().songs.push(value);
    }

    pub fn fail(&self, method: &str, path: &str, status: u16) {
        self.store
            .lock()
            .unwrap()
            .failures
            .push((method.to_string(), path.to_string(), status));
    }

    pub fn ack_updates(&self) {
        self.store.lock().unwrap().ack_updates = true;
    }

    pub fn refuse_conversions(&self, message: &str) {
        self.store.lock().unwrap().refuse_conversions = Some(message.to_string());
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.store.lock().unwrap().requests.clone()
    }

    /// Requests matching `method` whose path ends with `suffix`.
    pub fn count(&self, method: &str, suffix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path.ends_with(suffix))
            .count()
    }

    pub fn playlist_count(&self) -> usize {
        self.store.lock().unwrap().playlists.len()
    }

    pub fn song_count(&self) -> usize {
        self.store.lock().unwrap().songs.len()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub fn playlist_json(id: &str, platform: &str, song_ids: &[&str]) -> Value {
    json!({
        "id": id,
        "name": format!("Playlist {}", id),
        "description": "",
        "user_id": "user123",
        "platform": platform,
        "external_id": format!("ext{}", id),
        "songs": song_ids.iter().map(|s| song_json(s, &format!("Song {}", s))).collect::<Vec<_>>(),
        "created_at": "2024-01-01T10:00:00Z",
        "updated_at": "2024-01-01T10:00:00Z"
    })
}

pub fn song_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "artist": "Artist",
        "album": "Album",
        "duration": 185,
        "spotify_id": format!("sp-{}", id),
        "youtube_id": "",
        "spotify_url": format!("https://open.spotify.com/track/sp-{}", id),
        "created_at": "2024-01-01T10:00:00Z",
        "updated_at": "2024-01-02T10:00:00Z"
    })
}

fn router(store: Shared) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/auth/:platform", get(auth))
        .route("/api/v1/playlists", get(list_playlists).post(create_playlist))
        .route(
            "/api/v1/playlists/:id",
            get(get_playlist).put(update_playlist).delete(delete_playlist),
        )
        .route("/api/v1/playlists/:id/convert", post(convert))
        .route("/api/v1/playlists/:id/sync", post(sync))
        .route("/api/v1/songs", get(list_songs).post(create_song))
        .route("/api/v1/songs/search", post(search_songs))
        .route(
            "/api/v1/songs/:id",
            get(get_song).put(update_song).delete(delete_song),
        )
        .with_state(store)
}

/// Log the request; `Some` when a failure was injected for it.
fn record(store: &Shared, method: &Method, uri: &Uri, body: &str) -> Option<Response> {
    let mut s = store.lock().unwrap();
    let path = uri.path().to_string();
    s.requests.push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        body: serde_json::from_str(body).unwrap_or(Value::Null),
    });
    let hit = s
        .failures
        .iter()
        .position(|(m, p, _)| m == method.as_str() && *p == path)?;
    let (_, _, status) = s.failures.remove(hit);
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    Some((status, Json(json!({"error": "injected failure"}))).into_response())
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": format!("{} not found", what)})),
    )
        .into_response()
}

fn find(items: &[Value], id: &str) -> Option<usize> {
    items.iter().position(|v| v["id"] == id)
}

async fn health(State(s): State<Shared>, method: Method, uri: Uri) -> Response {
    if let Some(r) = record(&s, &method, &uri, "") {
        return r;
    }
    Json(json!({"status": "ok"})).into_response()
}

async fn auth(
    State(s): State<Shared>,
    Path(platform): Path<String>,
    method: Method,
    uri: Uri,
) -> Response {
    if let Some(r) = record(&s, &method, &uri, "") {
        return r;
    }
    Json(json!({"auth_url": format!("https://auth.example/{}?state=xyz", platform)}))
        .into_response()
}

async fn list_playlists(State(s): State<Shared>, method: Method, uri: Uri) -> Response {
    if let Some(r) = record(&s, &method, &uri, "") {
        return r;
    }
    let playlists = s.lock().unwrap().playlists.clone();
    Json(json!({ "playlists": playlists })).into_response()
}

async fn create_playlist(
    State(s): State<Shared>,
    method: Method,
    uri: Uri,
    body: String,
) -> Response {
    if let Some(r) = record(&s, &method, &uri, &body) {
        return r;
    }
    let mut value: Value = serde_json::from_str(&body).unwrap_or_else(|_| json!({}));
    let mut store = s.lock().unwrap();
    store.next_id += 1;
    value["id"] = json!(format!("new{}", store.next_id));
    value["songs"] = json!([]);
    value["created_at"] = json!("2024-05-01T00:00:00Z");
    value["updated_at"] = json!("2024-05-01T00:00:00Z");
    store.playlists.push(value.clone());
    (StatusCode::CREATED, Json(value)).into_response()
}

async fn get_playlist(
    State(s): State<Shared>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
) -> Response {
    if let Some(r) = record(&s, &method, &uri, "") {
        return r;
    }
    let store = s.lock().unwrap();
    match find(&store.playlists, &id) {
        Some(i) => Json(store.playlists[i].clone()).into_response(),
        None => not_found("Playlist"),
    }
}

async fn update_playlist(
    State(s): State<Shared>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
    body: String,
) -> Response {
    if let Some(r) = record(&s, &method, &uri, &body) {
        return r;
    }
    let patch: Value = serde_json::from_str(&body).unwrap_or_else(|_| json!({}));
    let mut store = s.lock().unwrap();
    let Some(i) = find(&store.playlists, &id) else {
        return not_found("Playlist");
    };
    if let (Some(target), Some(fields)) = (store.playlists[i].as_object_mut(), patch.as_object()) {
        for (k, v) in fields {
            target.insert(k.clone(), v.clone());
        }
    }
    if store.ack_updates {
        return Json(json!({ "message": "Playlist updated" })).into_response();
    }
    Json(store.playlists[i].clone()).into_response()
}

async fn delete_playlist(
    State(s): State<Shared>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
) -> Response {
    if let Some(r) = record(&s, &method, &uri, "") {
        return r;
    }
    let mut store = s.lock().unwrap();
    match find(&store.playlists, &id) {
        Some(i) => {
            store.playlists.remove(i);
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found("Playlist"),
    }
}

async fn convert(
    State(s): State<Shared>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
    body: String,
) -> Response {
    if let Some(r) = record(&s, &method, &uri, &body) {
        return r;
    }
    let req: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let mut store = s.lock().unwrap();
    let Some(i) = find(&store.playlists, &id) else {
        return not_found("Playlist");
    };
    if let Some(message) = store.refuse_conversions.clone() {
        return Json(json!({
            "success": false,
            "converted_songs": 0,
            "failed_songs": null,
            "new_playlist_id": "",
            "message": message
        }))
        .into_response();
    }
    let mut counterpart = store.playlists[i].clone();
    let songs = counterpart["songs"].as_array().map(Vec::len).unwrap_or(0);
    store.next_id += 1;
    let new_id = format!("conv{}", store.next_id);
    counterpart["id"] = json!(new_id);
    counterpart["platform"] = req["target_platform"].clone();
    store.playlists.push(counterpart);
    Json(json!({
        "success": true,
        "converted_songs": songs,
        "failed_songs": null,
        "new_playlist_id": new_id,
        "message": ""
    }))
    .into_response()
}

async fn sync(
    State(s): State<Shared>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
) -> Response {
    if let Some(r) = record(&s, &method, &uri, "") {
        return r;
    }
    if find(&s.lock().unwrap().playlists, &id).is_none() {
        return not_found("Playlist");
    }
    Json(json!({"message": "Playlist synced successfully"})).into_response()
}

async fn list_songs(State(s): State<Shared>, method: Method, uri: Uri) -> Response {
    if let Some(r) = record(&s, &method, &uri, "") {
        return r;
    }
    Json(Value::Array(s.lock().unwrap().songs.clone())).into_response()
}

async fn create_song(State(s): State<Shared>, method: Method, uri: Uri, body: String) -> Response {
    if let Some(r) = record(&s, &method, &uri, &body) {
        return r;
    }
    let mut value: Value = serde_json::from_str(&body).unwrap_or_else(|_| json!({}));
    let mut store = s.lock().unwrap();
    store.next_id += 1;
    value["id"] = json!(format!("song{}", store.next_id));
    store.songs.push(value.clone());
    (StatusCode::CREATED, Json(value)).into_response()
}

async fn get_song(
    State(s): State<Shared>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
) -> Response {
    if let Some(r) = record(&s, &method, &uri, "") {
        return r;
    }
    let store = s.lock().unwrap();
    match find(&store.songs, &id) {
        Some(i) => Json(store.songs[i].clone()).into_response(),
        None => not_found("Song"),
    }
}

async fn update_song(
    State(s): State<Shared>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
    body: String,
) -> Response {
    if let Some(r) = record(&s, &method, &uri, &body) {
        return r;
    }
    let patch: Value = serde_json::from_str(&body).unwrap_or_else(|_| json!({}));
    let mut store = s.lock().unwrap();
    let Some(i) = find(&store.songs, &id) else {
        return not_found("Song");
    };
    if let (Some(target), Some(fields)) = (store.songs[i].as_object_mut(), patch.as_object()) {
        for (k, v) in fields {
            target.insert(k.clone(), v.clone());
        }
    }
    if store.ack_updates {
        return Json(json!({ "message": "Song updated" })).into_response();
    }
    Json(store.songs[i].clone()).into_response()
}

async fn delete_song(
    State(s): State<Shared>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
) -> Response {
    if let Some(r) = record(&s, &method, &uri, "") {
        return r;
    }
    let mut store = s.lock().unwrap();
    match find(&store.songs, &id) {
        Some(i) => {
            store.songs.remove(i);
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found("Song"),
    }
}

async fn search_songs(
    State(s): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
    method: Method,
    uri: Uri,
    body: String,
) -> Response {
    if let Some(r) = record(&s, &method, &uri, &body) {
        return r;
    }
    let q = params.get("q").map(|q| q.to_lowercase()).unwrap_or_default();
    let hits: Vec<Value> = s
        .lock()
        .unwrap()
        .songs
        .iter()
        .filter(|v| {
            v["title"]
                .as_str()
                .is_some_and(|t| t.to_lowercase().contains(&q))
        })
        .cloned()
        .collect();
    Json(json!({ "songs": hits })).into_response()
}
