//! Effects emitted by the view controllers and the executor that runs them.
//!
//! Views never touch the network. They return [`Effect`] values; the front end
//! runs each one with [`execute`] (usually in a spawned task) and feeds the
//! resulting [`Outcome`] back through [`crate::views::Views::route`].

use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::deletion::DeleteTarget;
use crate::error::Result;
use crate::model::{ConversionRequest, ConversionResult, Platform, Playlist, PlaylistDraft, Song};
use crate::view_state::Ticket;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    HealthCheck,
    FetchDashboard(Ticket),
    FetchPlaylists(Ticket),
    FetchSongs(Ticket),
    CreatePlaylist(PlaylistDraft),
    ConvertPlaylist(ConversionRequest),
    SyncPlaylist(String),
    Delete(DeleteTarget),
    Authorize(Platform),
    /// Leave the client for `url`. Handled by a `Navigator`, not over HTTP.
    Redirect(String),
}

impl Effect {
    /// False for effects the front end handles itself.
    pub fn is_remote(&self) -> bool {
        !matches!(self, Effect::Redirect(_))
    }

    pub fn describe(&self) -> String {
        match self {
            Effect::HealthCheck => "health check".into(),
            Effect::FetchDashboard(_) => "fetch dashboard".into(),
            Effect::FetchPlaylists(_) => "fetch playlists".into(),
            Effect::FetchSongs(_) => "fetch songs".into(),
            Effect::CreatePlaylist(_) => "create playlist".into(),
            Effect::ConvertPlaylist(req) => format!(
                "convert {} {} -> {}",
                req.playlist_id, req.source_platform, req.target_platform
            ),
            Effect::SyncPlaylist(id) => format!("sync {}", id),
            Effect::Delete(target) => format!("delete {} {}", target.kind(), target.id()),
            Effect::Authorize(p) => format!("authorize {}", p),
            Effect::Redirect(url) => format!("redirect {}", url),
        }
    }
}

/// Completion of an effect. Failures carry the rendered error message.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Health(std::result::Result<(), String>),
    Dashboard(Ticket, std::result::Result<(Vec<Playlist>, Vec<Song>), String>),
    Playlists(Ticket, std::result::Result<Vec<Playlist>, String>),
    Songs(Ticket, std::result::Result<Vec<Song>, String>),
    Created(std::result::Result<Playlist, String>),
    Converted {
        playlist_id: String,
        result: std::result::Result<ConversionResult, String>,
    },
    Synced {
        playlist_id: String,
        result: std::result::Result<(), String>,
    },
    Deleted {
        target: DeleteTarget,
        result: std::result::Result<(), String>,
    },
    AuthUrl {
        platform: Platform,
        result: std::result::Result<String, String>,
    },
    Redirected {
        url: String,
        result: std::result::Result<(), String>,
    },
}

impl Outcome {
    /// One-line description of a failed outcome, for toasts.
    pub fn failure(&self) -> Option<String> {
        let (what, message) = match self {
            Outcome::Health(Err(m)) => ("Backend unreachable".to_string(), m),
            Outcome::Dashboard(_, Err(m)) => ("Failed to load dashboard".to_string(), m),
            Outcome::Playlists(_, Err(m)) => ("Failed to load playlists".to_string(), m),
            Outcome::Songs(_, Err(m)) => ("Failed to load songs".to_string(), m),
            Outcome::Created(Err(m)) => ("Import failed".to_string(), m),
            Outcome::Converted { result: Err(m), .. } => ("Conversion failed".to_string(), m),
            Outcome::Converted { result: Ok(r), .. } if !r.success => {
                if r.message.is_empty() {
                    return Some("Conversion failed".to_string());
                }
                ("Conversion failed".to_string(), &r.message)
            }
            Outcome::Synced { result: Err(m), .. } => ("Sync failed".to_string(), m),
            Outcome::Deleted {
                target,
                result: Err(m),
            } => (format!("Failed to delete {}", target.kind()), m),
            Outcome::AuthUrl {
                platform,
                result: Err(m),
            } => (format!("Failed to authenticate with {}", platform.label()), m),
            Outcome::Redirected { result: Err(m), .. } => ("Could not open browser".to_string(), m),
            _ => return None,
        };
        Some(format!("{}: {}", what, message))
    }
}

/// Run one effect against the backend. Errors are logged here and folded into
/// the outcome; nothing propagates.
pub async fn execute(api: &ApiClient, effect: Effect) -> Outcome {
    let what = effect.describe();
    debug!("running {}", what);
    match effect {
        Effect::HealthCheck => Outcome::Health(settle(&what, api.health().await)),
        Effect::FetchDashboard(ticket) => {
            let both = tokio::try_join!(api.list_playlists(), api.list_songs());
            Outcome::Dashboard(ticket, settle(&what, both))
        }
        Effect::FetchPlaylists(ticket) => {
            Outcome::Playlists(ticket, settle(&what, api.list_playlists().await))
        }
        Effect::FetchSongs(ticket) => Outcome::Songs(ticket, settle(&what, api.list_songs().await)),
        Effect::CreatePlaylist(draft) => {
            Outcome::Created(settle(&what, api.create_playlist(&draft).await))
        }
        Effect::ConvertPlaylist(req) => {
            let result = api.convert_playlist(&req.playlist_id, &req).await;
            Outcome::Converted {
                playlist_id: req.playlist_id,
                result: settle(&what, result),
            }
        }
        Effect::SyncPlaylist(playlist_id) => {
            let result = api.sync_playlist(&playlist_id).await;
            Outcome::Synced {
                playlist_id,
                result: settle(&what, result),
            }
        }
        Effect::Delete(target) => {
            let result = match &target {
                DeleteTarget::Playlist(id) => api.delete_playlist(id).await,
                DeleteTarget::Song(id) => api.delete_song(id).await,
            };
            Outcome::Deleted {
                target,
                result: settle(&what, result),
            }
        }
        Effect::Authorize(platform) => Outcome::AuthUrl {
            platform,
            result: settle(&what, api.auth_url(platform).await),
        },
        Effect::Redirect(url) => {
            warn!("{} reached the HTTP executor; no navigator attached", what);
            Outcome::Redirected {
                url,
                result: Err("no navigator available".to_string()),
            }
        }
    }
}

fn settle<T>(what: &str, result: Result<T>) -> std::result::Result<T, String> {
    result.map_err(|e| {
        warn!("{} failed: {}", what, e);
        e.to_string()
    })
}
