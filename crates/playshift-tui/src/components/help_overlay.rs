//! HelpOverlay: centred popup listing the key bindings.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_MUTED, C_OVERLAY_BG, C_PANEL_BORDER, C_PRIMARY, C_SECONDARY},
    widgets::centered_rect,
};

pub struct HelpOverlay {
    visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HelpOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::HelpOverlay
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => vec![Action::ToggleHelp],
            // swallow everything else while open
            _ => vec![Action::Noop],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if *action == Action::ToggleHelp {
            self.visible = !self.visible;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, _state: &AppState) {
        if !self.visible {
            return;
        }
        let lines = vec![
            Line::from(Span::styled(
                " keyboard shortcuts",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            section(" views"),
            help_row("1 / 2 / 3 / 4", "dashboard / import / playlists / songs"),
            help_row("[ / ]", "previous / next view"),
            help_row("tab", "move focus between view and log"),
            help_row("R", "refresh the current view"),
            help_row("x", "dismiss the inline message"),
            Line::from(""),
            section(" import"),
            help_row("e  or  enter", "edit the playlist link"),
            help_row("enter (editing)", "import the playlist"),
            help_row("s / y", "connect Spotify / YouTube"),
            Line::from(""),
            section(" playlists"),
            help_row("f / F  or  ← / →", "cycle platform filter"),
            help_row("c", "convert to the other platform"),
            help_row("r", "sync from source"),
            help_row("o", "copy the playlist link"),
            help_row("d", "delete (asks first)"),
            Line::from(""),
            section(" songs"),
            help_row("/", "search title, artist, album"),
            help_row("enter", "show details"),
            help_row("d", "delete (asks first)"),
            Line::from(""),
            section(" ui"),
            help_row("↑ / ↓  or  j / k", "move selection"),
            help_row("K / L", "toggle keys bar / log panel"),
            help_row("?", "toggle this help"),
            help_row("q / Ctrl+C", "quit"),
            Line::from(""),
            Line::from(Span::styled(
                " press ? or esc to close",
                Style::default().fg(C_MUTED),
            )),
        ];

        let popup = centered_rect(64, lines.len() as u16 + 2, area);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(C_PANEL_BORDER))
                    .style(Style::default().bg(C_OVERLAY_BG)),
            ),
            popup,
        );
    }
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
    ))
}

fn help_row<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("{:<20}", key),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc, Style::default().fg(C_SECONDARY)),
    ])
}
