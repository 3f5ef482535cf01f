//! Action enum: every user intent and internal event the App dispatches.

use playshift_core::views::{DashboardMsg, ImportMsg, PlaylistsMsg, SongsMsg};

use crate::shell::Route;

/// Identifier for a drawable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Header,
    Dashboard,
    ImportForm,
    PlaylistList,
    SongManager,
    SongDetail,
    ConfirmDialog,
    LogPanel,
    HelpOverlay,
}

/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Navigation ───────────────────────────────────────────────────────────
    Navigate(Route),
    NextRoute,
    PrevRoute,
    CycleFocus,
    FocusPane(ComponentId),

    // ── View messages ────────────────────────────────────────────────────────
    Dashboard(DashboardMsg),
    Import(ImportMsg),
    Playlists(PlaylistsMsg),
    Songs(SongsMsg),

    // ── UI ───────────────────────────────────────────────────────────────────
    ToggleLogs,
    ToggleHelp,
    ToggleKeys,
    CopyToClipboard(String),

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),
    Noop,
}

impl From<DashboardMsg> for Action {
    fn from(msg: DashboardMsg) -> Self {
        Action::Dashboard(msg)
    }
}

impl From<ImportMsg> for Action {
    fn from(msg: ImportMsg) -> Self {
        Action::Import(msg)
    }
}

impl From<PlaylistsMsg> for Action {
    fn from(msg: PlaylistsMsg) -> Self {
        Action::Playlists(msg)
    }
}

impl From<SongsMsg> for Action {
    fn from(msg: SongsMsg) -> Self {
        Action::Songs(msg)
    }
}
