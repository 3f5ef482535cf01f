//! PlaylistList: platform tabs over three-row playlist cards.
//!
//! Row 1 of a card: name, platform tag, running job.
//! Row 2: song count, minutes, external link.
//! Row 3: the first songs and how many more there are.

use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use playshift_core::model::Playlist;
use playshift_core::projection::PlatformFilter;
use playshift_core::views::playlists::PREVIEW_SONGS;
use playshift_core::views::PlaylistsMsg;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    shell::Route,
    theme::{
        platform_color, style_error, style_muted, style_ok, style_secondary, C_BUSY, C_MUTED,
        C_PRIMARY, C_SECONDARY, C_SELECTION_BG,
    },
    widgets::{
        fit, hit,
        pane_chrome::{pane_chrome, Badge},
        scrollable_list::ListCursor,
    },
};

const CARD_ROWS: u16 = 3;

pub struct PlaylistList {
    cursor: ListCursor,
    tabs: Vec<(PlatformFilter, u16, u16)>,
    tabs_row: Rect,
    cards_area: Rect,
}

impl PlaylistList {
    pub fn new() -> Self {
        Self {
            cursor: ListCursor::default(),
            tabs: Vec::new(),
            tabs_row: Rect::default(),
            cards_area: Rect::default(),
        }
    }

    fn selected<'a>(&self, state: &'a AppState) -> Option<&'a Playlist> {
        state
            .views
            .playlists
            .visible()
            .get(self.cursor.selected())
            .copied()
    }
}

impl Default for PlaylistList {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for PlaylistList {
    fn id(&self) -> ComponentId {
        ComponentId::PlaylistList
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        let len = state.views.playlists.visible().len();
        let page = (self.cards_area.height / CARD_ROWS).max(1) as usize;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.cursor.up(1),
            KeyCode::Down | KeyCode::Char('j') => self.cursor.down(1, len),
            KeyCode::PageUp => self.cursor.up(page),
            KeyCode::PageDown => self.cursor.down(page, len),
            KeyCode::Home | KeyCode::Char('g') => self.cursor.first(),
            KeyCode::End | KeyCode::Char('G') => self.cursor.last(len),
            KeyCode::Char('f') | KeyCode::Right => {
                self.cursor.reset();
                return vec![PlaylistsMsg::NextFilter.into()];
            }
            KeyCode::Char('F') | KeyCode::Left => {
                self.cursor.reset();
                return vec![PlaylistsMsg::PrevFilter.into()];
            }
            KeyCode::Char('R') => return vec![PlaylistsMsg::Refresh.into()],
            KeyCode::Char('x') => return vec![PlaylistsMsg::DismissNotice.into()],
            KeyCode::Char('c') => {
                return self
                    .selected(state)
                    .map(|p| vec![PlaylistsMsg::Convert(p.id.clone()).into()])
                    .unwrap_or_default();
            }
            KeyCode::Char('r') => {
                return self
                    .selected(state)
                    .map(|p| vec![PlaylistsMsg::Sync(p.id.clone()).into()])
                    .unwrap_or_default();
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                return self
                    .selected(state)
                    .map(|p| vec![PlaylistsMsg::RequestDelete(p.id.clone()).into()])
                    .unwrap_or_default();
            }
            KeyCode::Char('o') => {
                return self
                    .selected(state)
                    .map(|p| vec![Action::CopyToClipboard(p.external_url())])
                    .unwrap_or_default();
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        let (col, row) = (event.column, event.row);
        let len = state.views.playlists.visible().len();
        match event.kind {
            MouseEventKind::ScrollUp => self.cursor.up(1),
            MouseEventKind::ScrollDown => self.cursor.down(1, len),
            MouseEventKind::Down(MouseButton::Left) => {
                if hit(self.tabs_row, col, row) {
                    if let Some((filter, _, _)) =
                        self.tabs.iter().find(|(_, s, e)| col >= *s && col < *e)
                    {
                        self.cursor.reset();
                        return vec![PlaylistsMsg::SetFilter(*filter).into()];
                    }
                } else if hit(self.cards_area, col, row) {
                    let card = ((row - self.cards_area.y) / CARD_ROWS) as usize;
                    self.cursor.click(card, len);
                }
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if *action == Action::Navigate(Route::Playlists) {
            self.cursor.reset();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let view = &state.views.playlists;
        let fetch = view.state();
        let block = pane_chrome(
            "playlists",
            Some('3'),
            focused,
            Badge::for_fetch(fetch.is_loading(), fetch.error().is_some()),
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        // ── Filter tabs ──────────────────────────────────────────────────────
        let counts = view.counts();
        self.tabs_row = rows[0];
        self.tabs.clear();
        let mut x = rows[0].x + 1;
        let mut spans = vec![Span::raw(" ")];
        for filter in PlatformFilter::ALL {
            let text = format!(" {} ({}) ", filter.label(), counts.for_filter(filter));
            let w = text.chars().count() as u16;
            self.tabs.push((filter, x, x + w));
            x += w + 1;
            let style = if filter == view.filter() {
                Style::default()
                    .fg(C_PRIMARY)
                    .bg(C_SELECTION_BG)
                    .add_modifier(Modifier::BOLD)
            } else {
                style_secondary()
            };
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), rows[0]);

        // ── Cards ────────────────────────────────────────────────────────────
        self.cards_area = rows[2];
        let visible = view.visible();
        if let Some(err) = fetch.error() {
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {}  (R retry)", err), style_error())),
                rows[2],
            );
        } else if let Some(empty) = view.empty_message() {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(format!(" {}", empty), style_muted())),
                ]),
                rows[2],
            );
        } else if !fetch.has_loaded() {
            frame.render_widget(
                Paragraph::new(Span::styled(" Loading playlists...", style_muted())),
                rows[2],
            );
        } else {
            let per_page = (rows[2].height / CARD_ROWS) as usize;
            self.cursor.clamp(visible.len());
            self.cursor.ensure_visible(per_page);
            let width = rows[2].width as usize;
            let mut lines = Vec::new();
            for i in self.cursor.window(per_page, visible.len()) {
                let selected = i == self.cursor.selected();
                let job = view.job(&visible[i].id).map(|j| j.label());
                lines.extend(card_lines(visible[i], selected, job, width));
            }
            frame.render_widget(Paragraph::new(lines), rows[2]);
        }

        // ── Notice ───────────────────────────────────────────────────────────
        if let Some(notice) = view.notice() {
            let style = if notice.is_error() { style_error() } else { style_ok() };
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {}  (x dismiss)", notice.text()), style)),
                rows[3],
            );
        }
    }
}

fn card_lines(p: &Playlist, selected: bool, job: Option<&str>, width: usize) -> Vec<Line<'static>> {
    let bg = if selected {
        Style::default().bg(C_SELECTION_BG)
    } else {
        Style::default()
    };
    let marker = if selected { " ▸ " } else { "   " };

    let mut head = vec![
        Span::styled(marker.to_string(), bg.fg(C_PRIMARY)),
        Span::styled(
            fit(&p.name, width.saturating_sub(30)),
            bg.fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", p.platform.label()), bg.fg(platform_color(p.platform))),
    ];
    if let Some(label) = job {
        head.push(Span::styled(format!("  {}", label), bg.fg(C_BUSY)));
    }

    let stats = format!(
        "   {} songs · {} min · {}",
        p.song_count(),
        p.total_minutes(),
        p.external_url()
    );

    let (preview, more) = p.preview(PREVIEW_SONGS);
    let songs = if preview.is_empty() {
        "   No songs yet".to_string()
    } else {
        let titles: Vec<&str> = preview.iter().map(|s| s.title.as_str()).collect();
        let mut line = format!("   {}", titles.join(" · "));
        if more > 0 {
            line.push_str(&format!("  +{} more songs", more));
        }
        line
    };

    vec![
        Line::from(head).style(bg),
        Line::from(Span::styled(fit(&stats, width), bg.fg(C_SECONDARY))),
        Line::from(Span::styled(fit(&songs, width), bg.fg(C_MUTED))),
    ]
}
