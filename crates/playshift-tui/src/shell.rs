//! Application shell: which route is showing and which pane has focus.

use crate::action::ComponentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Import,
    Playlists,
    Songs,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Dashboard, Route::Import, Route::Playlists, Route::Songs];

    pub fn path(self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Import => "/import",
            Route::Playlists => "/playlists",
            Route::Songs => "/songs",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Import => "Import",
            Route::Playlists => "Playlists",
            Route::Songs => "Songs",
        }
    }

    /// Look up a route by path. A trailing slash is ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Route::ALL.into_iter().find(|r| r.path() == normalized)
    }

    /// Number-key shortcut shown next to the tab.
    pub fn hotkey(self) -> char {
        match self {
            Route::Dashboard => '1',
            Route::Import => '2',
            Route::Playlists => '3',
            Route::Songs => '4',
        }
    }

    pub fn from_hotkey(c: char) -> Option<Route> {
        Route::ALL.into_iter().find(|r| r.hotkey() == c)
    }

    fn index(self) -> usize {
        Route::ALL.iter().position(|r| *r == self).unwrap_or(0)
    }

    pub fn next(self) -> Route {
        Route::ALL[(self.index() + 1) % Route::ALL.len()]
    }

    pub fn prev(self) -> Route {
        Route::ALL[(self.index() + Route::ALL.len() - 1) % Route::ALL.len()]
    }

    /// Component that draws the body of this route.
    pub fn component(self) -> ComponentId {
        match self {
            Route::Dashboard => ComponentId::Dashboard,
            Route::Import => ComponentId::ImportForm,
            Route::Playlists => ComponentId::PlaylistList,
            Route::Songs => ComponentId::SongManager,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Body,
    Log,
}

#[derive(Debug)]
pub struct Shell {
    route: Route,
    focus: Pane,
    pub show_log_panel: bool,
    pub show_keys_bar: bool,
}

impl Shell {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            focus: Pane::Body,
            show_log_panel: false,
            show_keys_bar: true,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Switch routes. Returns false when `route` is already showing.
    pub fn navigate(&mut self, route: Route) -> bool {
        self.focus = Pane::Body;
        if self.route == route {
            return false;
        }
        self.route = route;
        true
    }

    pub fn focused(&self) -> ComponentId {
        match self.focus {
            Pane::Body => self.route.component(),
            Pane::Log => ComponentId::LogPanel,
        }
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.focused() == id
    }

    /// Move focus between body and log panel. Only the body is focusable
    /// while the log panel is hidden.
    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Pane::Body if self.show_log_panel => Pane::Log,
            _ => Pane::Body,
        };
    }

    pub fn focus_log(&mut self) {
        if self.show_log_panel {
            self.focus = Pane::Log;
        }
    }

    pub fn focus_body(&mut self) {
        self.focus = Pane::Body;
    }

    pub fn toggle_log_panel(&mut self) {
        self.show_log_panel = !self.show_log_panel;
        if !self.show_log_panel {
            self.focus = Pane::Body;
        }
    }
}
