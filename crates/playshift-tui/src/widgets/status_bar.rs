//! Bottom key-hint bar.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::shell::Route;
use crate::theme::{C_MODE_EDIT, C_MODE_NORMAL, C_MUTED};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// A text field owns the keyboard.
    Editing,
}

impl InputMode {
    pub fn color(self) -> ratatui::style::Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Editing => C_MODE_EDIT,
        }
    }
}

fn route_keys(route: Route) -> &'static str {
    match route {
        Route::Dashboard => "R refresh  Enter open playlists",
        Route::Import => "e edit link  s Spotify sign-in  y YouTube sign-in",
        Route::Playlists => "↑↓/jk select  f/F platform  c convert  r sync  d delete  o copy link  R refresh",
        Route::Songs => "↑↓/jk select  / search  Enter details  d delete  R refresh",
    }
}

pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, route: Route) {
    let label = match mode {
        InputMode::Normal => route.label().to_uppercase(),
        InputMode::Editing => "EDIT".to_string(),
    };
    let keys = match mode {
        InputMode::Normal => format!(
            " {}  1-4/[] views  Tab focus  L logs  ? help  q quit",
            route_keys(route)
        ),
        InputMode::Editing => " type  Enter submit  Esc clear/leave".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", label),
            Style::default()
                .fg(mode.color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys, Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
