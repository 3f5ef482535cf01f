//! Dashboard: aggregate counts and the most recent playlists.

use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use playshift_core::views::DashboardMsg;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    shell::Route,
    theme::{
        platform_color, style_error, style_muted, style_secondary, style_selected, C_ACCENT,
        C_PANEL_BORDER, C_PRIMARY, C_SPOTIFY, C_YOUTUBE,
    },
    widgets::{
        fit, hit,
        pane_chrome::{pane_chrome, Badge},
        scrollable_list::ListCursor,
    },
};

pub struct Dashboard {
    cursor: ListCursor,
    recent_area: Rect,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            cursor: ListCursor::default(),
            recent_area: Rect::default(),
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Dashboard {
    fn id(&self) -> ComponentId {
        ComponentId::Dashboard
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        let len = state.views.dashboard.recent().len();
        match key.code {
            KeyCode::Char('R') => vec![DashboardMsg::Refresh.into()],
            KeyCode::Char('x') => vec![DashboardMsg::DismissError.into()],
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor.up(1);
                vec![]
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor.down(1, len);
                vec![]
            }
            KeyCode::Enter => vec![Action::Navigate(Route::Playlists)],
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left)
            || !hit(self.recent_area, event.column, event.row)
        {
            return vec![];
        }
        let row = (event.row - self.recent_area.y) as usize;
        let len = state.views.dashboard.recent().len();
        if self.cursor.click(row, len) {
            return vec![Action::Navigate(Route::Playlists)];
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let view = &state.views.dashboard;
        let fetch = view.state();
        let block = pane_chrome(
            "dashboard",
            Some('1'),
            focused,
            Badge::for_fetch(fetch.is_loading(), fetch.error().is_some()),
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let status = if let Some(err) = fetch.error() {
            Line::from(Span::styled(format!(" {}  (R retry, x dismiss)", err), style_error()))
        } else if fetch.is_loading() && !fetch.has_loaded() {
            Line::from(Span::styled(" Loading dashboard...", style_muted()))
        } else {
            Line::from(Span::styled(
                " Convert playlists between Spotify and YouTube",
                style_secondary(),
            ))
        };
        frame.render_widget(Paragraph::new(status), rows[0]);

        let stats = view.stats();
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(rows[1]);
        let tiles = [
            ("Total Playlists", stats.total_playlists, C_ACCENT),
            ("Total Songs", stats.total_songs, C_PRIMARY),
            ("Spotify Playlists", stats.spotify_playlists, C_SPOTIFY),
            ("YouTube Playlists", stats.youtube_playlists, C_YOUTUBE),
        ];
        for ((label, value, color), card) in tiles.into_iter().zip(cards.iter()) {
            let tile = Paragraph::new(vec![
                Line::from(Span::styled(
                    format!(" {}", value),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(format!(" {}", label), style_secondary())),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(C_PANEL_BORDER)),
            );
            frame.render_widget(tile, *card);
        }

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " Recent Playlists",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ))),
            rows[2],
        );

        self.recent_area = rows[3];
        let recent = view.recent();
        if recent.is_empty() {
            if fetch.has_loaded() {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        " No playlists yet. Press 2 to import one.",
                        style_muted(),
                    )),
                    rows[3],
                );
            }
            return;
        }

        self.cursor.clamp(recent.len());
        let width = rows[3].width as usize;
        let lines: Vec<Line> = recent
            .iter()
            .enumerate()
            .take(rows[3].height as usize)
            .map(|(i, p)| {
                let selected = focused && i == self.cursor.selected();
                let marker = if selected { "▸ " } else { "  " };
                let tail = format!("  {}  {} songs", p.platform.label(), p.song_count());
                let name = fit(&p.name, width.saturating_sub(tail.chars().count() + 3));
                let base = if selected { style_selected() } else { Style::default().fg(C_PRIMARY) };
                Line::from(vec![
                    Span::styled(format!(" {}{}", marker, name), base),
                    Span::styled(
                        format!("  {}", p.platform.label()),
                        Style::default().fg(platform_color(p.platform)),
                    ),
                    Span::styled(format!("  {} songs", p.song_count()), style_muted()),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), rows[3]);
    }
}
