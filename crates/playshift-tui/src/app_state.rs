//! AppState: data shared read-only with every component.

use std::path::PathBuf;

use playshift_core::views::Views;

use crate::shell::Route;
use crate::widgets::status_bar::InputMode;

/// Result of the last `/health` check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackendStatus {
    #[default]
    Unknown,
    Up,
    Down(String),
}

pub struct AppState {
    // ── Views ────────────────────────────────────────────────────────────────
    pub views: Views,
    pub route: Route,

    // ── UI ───────────────────────────────────────────────────────────────────
    pub input_mode: InputMode,

    // ── Backend ──────────────────────────────────────────────────────────────
    pub backend: BackendStatus,
    pub base_url: String,
    /// Requests spawned whose outcome has not come back yet.
    pub in_flight: usize,

    // ── Log ──────────────────────────────────────────────────────────────────
    pub log_path: PathBuf,
    pub log_lines: Vec<String>,
}

impl AppState {
    pub fn new(views: Views, route: Route, base_url: String, log_path: PathBuf) -> Self {
        Self {
            views,
            route,
            input_mode: InputMode::Normal,
            backend: BackendStatus::Unknown,
            base_url,
            in_flight: 0,
            log_path,
            log_lines: Vec::new(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.views.import.session().user_id
    }

    /// Question to ask for a delete awaiting confirmation on this route.
    pub fn pending_delete_prompt(&self) -> Option<String> {
        let target = match self.route {
            Route::Playlists => self.views.playlists.pending_delete(),
            Route::Songs => self.views.songs.pending_delete(),
            _ => None,
        }?;
        Some(target.prompt())
    }
}
