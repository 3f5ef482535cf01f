//! HTTP client adapter for the conversion backend.
//!
//! Every outbound call goes through [`ApiClient`]: it owns the base URL, the
//! cookie store used for credentialed requests and the JSON content type.
//! Non-2xx answers become [`Error::Status`]; bodies that do not decode become
//! [`Error::Decode`].

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::model::{
    AuthUrl, ConversionRequest, ConversionResult, Platform, Playlist, PlaylistDraft, Song,
    SongDraft, SongQuery,
};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

/// List endpoints answer either with a bare array or with an envelope object.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Bare(Vec<T>),
    Playlists { playlists: Vec<T> },
    Songs { songs: Vec<T> },
}

impl<T> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(v) | Self::Playlists { playlists: v } | Self::Songs { songs: v } => v,
        }
    }
}

/// PUT replies are either the stored entity or a bare acknowledgement.
#[derive(Deserialize)]
#[serde(untagged)]
enum UpdateReply<T> {
    Entity(T),
    Ack { message: String },
}

impl<T> UpdateReply<T> {
    fn into_entity(self) -> Option<T> {
        match self {
            Self::Entity(v) => Some(v),
            Self::Ack { message } => {
                debug!("update acknowledged without entity: {}", message);
                None
            }
        }
    }
}

/// Error bodies look like `{"error": "..."}` or `{"message": "..."}`.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/')).map_err(|e| {
            Error::InvalidInput(format!("invalid base URL {:?}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidInput(format!(
                "base URL {:?} cannot carry a path",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        debug!("{} {}", method, url);
        self.http.request(method, url)
    }

    /// Send and hand back the raw body of a successful response.
    async fn send_raw(&self, req: RequestBuilder) -> Result<Vec<u8>> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        trace!("response {} ({} bytes)", status, body.len());

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                message: error_message(&body, status.canonical_reason()),
            });
        }
        Ok(body.to_vec())
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let body = self.send_raw(req).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn send_unit(&self, req: RequestBuilder) -> Result<()> {
        self.send_raw(req).await.map(|_| ())
    }

    async fn send_list<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<Vec<T>> {
        let listing: Listing<T> = self.send_json(req).await?;
        Ok(listing.into_vec())
    }

    fn with_body<B: Serialize + ?Sized>(req: RequestBuilder, body: &B) -> Result<RequestBuilder> {
        Ok(req.body(serde_json::to_vec(body)?))
    }

    // ── Health / auth ────────────────────────────────────────────────────────

    pub async fn health(&self) -> Result<()> {
        self.send_unit(self.request(Method::GET, &["health"])).await
    }

    /// Authorization URL the user must visit to link `platform`.
    pub async fn auth_url(&self, platform: Platform) -> Result<String> {
        let req = self.request(Method::GET, &["auth", platform.as_str()]);
        let body: AuthUrl = self.send_json(req).await?;
        Ok(body.auth_url)
    }

    // ── Playlists ────────────────────────────────────────────────────────────

    pub async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        self.send_list(self.request(Method::GET, &["playlists"])).await
    }

    pub async fn get_playlist(&self, id: &str) -> Result<Playlist> {
        self.send_json(self.request(Method::GET, &["playlists", id]))
            .await
    }

    pub async fn create_playlist(&self, draft: &PlaylistDraft) -> Result<Playlist> {
        let req = Self::with_body(self.request(Method::POST, &["playlists"]), draft)?;
        self.send_json(req).await
    }

    /// `None` when the backend only acknowledges the update with a message.
    pub async fn update_playlist(
        &self,
        id: &str,
        draft: &PlaylistDraft,
    ) -> Result<Option<Playlist>> {
        let req = Self::with_body(self.request(Method::PUT, &["playlists", id]), draft)?;
        let reply: UpdateReply<Playlist> = self.send_json(req).await?;
        Ok(reply.into_entity())
    }

    pub async fn delete_playlist(&self, id: &str) -> Result<()> {
        self.send_unit(self.request(Method::DELETE, &["playlists", id]))
            .await
    }

    pub async fn convert_playlist(
        &self,
        id: &str,
        conversion: &ConversionRequest,
    ) -> Result<ConversionResult> {
        let req = self.request(Method::POST, &["playlists", id, "convert"]);
        let body = self.send_raw(Self::with_body(req, conversion)?).await?;
        // Some backends acknowledge with an empty body.
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(ConversionResult {
                success: true,
                ..Default::default()
            });
        }
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn sync_playlist(&self, id: &str) -> Result<()> {
        self.send_unit(self.request(Method::POST, &["playlists", id, "sync"]))
            .await
    }

    // ── Songs ────────────────────────────────────────────────────────────────

    pub async fn list_songs(&self) -> Result<Vec<Song>> {
        self.send_list(self.request(Method::GET, &["songs"])).await
    }

    pub async fn get_song(&self, id: &str) -> Result<Song> {
        self.send_json(self.request(Method::GET, &["songs", id])).await
    }

    pub async fn create_song(&self, draft: &SongDraft) -> Result<Song> {
        let req = Self::with_body(self.request(Method::POST, &["songs"]), draft)?;
        self.send_json(req).await
    }

    pub async fn update_song(&self, id: &str, draft: &SongDraft) -> Result<Option<Song>> {
        let req = Self::with_body(self.request(Method::PUT, &["songs", id]), draft)?;
        let reply: UpdateReply<Song> = self.send_json(req).await?;
        Ok(reply.into_entity())
    }

    pub async fn delete_song(&self, id: &str) -> Result<()> {
        self.send_unit(self.request(Method::DELETE, &["songs", id]))
            .await
    }

    /// Server-side song search. The query is sent both as the JSON body and as
    /// `q`/`limit` query parameters, which is what the reference backend reads.
    pub async fn search_songs(&self, query: &SongQuery) -> Result<Vec<Song>> {
        let mut req = self
            .request(Method::POST, &["songs", "search"])
            .query(&[("q", query.query.as_str())]);
        if let Some(limit) = query.limit {
            req = req.query(&[("limit", limit)]);
        }
        self.send_list(Self::with_body(req, query)?).await
    }
}

fn error_message(body: &[u8], reason: Option<&str>) -> String {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        if let Some(msg) = parsed.error.or(parsed.message) {
            return msg;
        }
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        reason.unwrap_or("request failed").to_string()
    } else {
        text
    }
}
