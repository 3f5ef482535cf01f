//! View controllers. Each owns its local state, changes only through its
//! `Msg` enum and answers every message with the effects to run.

pub mod dashboard;
pub mod import;
pub mod playlists;
pub mod songs;

pub use dashboard::{DashboardMsg, DashboardView};
pub use import::{ImportMsg, ImportView};
pub use playlists::{PlaylistsMsg, PlaylistsView};
pub use songs::{EmptyState, SongsMsg, SongsView};

use crate::deletion::DeleteTarget;
use crate::effects::{Effect, Outcome};
use crate::session::SessionContext;

/// Non-blocking message shown inline in a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(s) | Notice::Error(s) => s,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// All four controllers plus the routing of outcomes to their owner.
#[derive(Debug)]
pub struct Views {
    pub dashboard: DashboardView,
    pub import: ImportView,
    pub playlists: PlaylistsView,
    pub songs: SongsView,
}

impl Views {
    pub fn new(session: SessionContext) -> Self {
        Self {
            dashboard: DashboardView::default(),
            import: ImportView::new(session),
            playlists: PlaylistsView::default(),
            songs: SongsView::default(),
        }
    }

    /// Hand a completed effect to the view that issued it.
    pub fn route(&mut self, outcome: Outcome) -> Vec<Effect> {
        match outcome {
            Outcome::Health(_) => Vec::new(),
            Outcome::Dashboard(ticket, result) => {
                self.dashboard.update(DashboardMsg::Fetched(ticket, result))
            }
            Outcome::Playlists(ticket, result) => {
                self.playlists.update(PlaylistsMsg::Fetched(ticket, result))
            }
            Outcome::Songs(ticket, result) => self.songs.update(SongsMsg::Fetched(ticket, result)),
            Outcome::Created(result) => self.import.update(ImportMsg::Created(result)),
            Outcome::Converted {
                playlist_id,
                result,
            } => self
                .playlists
                .update(PlaylistsMsg::Converted(playlist_id, result)),
            Outcome::Synced {
                playlist_id,
                result,
            } => self.playlists.update(PlaylistsMsg::Synced(playlist_id, result)),
            Outcome::Deleted {
                target: DeleteTarget::Playlist(id),
                result,
            } => self.playlists.update(PlaylistsMsg::Deleted(id, result)),
            Outcome::Deleted {
                target: DeleteTarget::Song(id),
                result,
            } => self.songs.update(SongsMsg::Deleted(id, result)),
            Outcome::AuthUrl { platform, result } => {
                self.import.update(ImportMsg::AuthUrl(platform, result))
            }
            Outcome::Redirected { url, result } => {
                self.import.update(ImportMsg::Redirected(url, result))
            }
        }
    }
}
