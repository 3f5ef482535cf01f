//! SongManager: live search over the song library.

use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use playshift_core::format::format_duration;
use playshift_core::model::{Platform, Song};
use playshift_core::views::SongsMsg;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    shell::Route,
    theme::{
        platform_color, style_error, style_muted, style_ok, style_secondary, style_selected,
        C_MUTED, C_PRIMARY,
    },
    widgets::{
        fit, hit,
        pane_chrome::{pane_chrome, Badge},
        scrollable_list::ListCursor,
        text_input::{InputAction, TextInput},
    },
};

pub struct SongManager {
    search: TextInput,
    cursor: ListCursor,
    search_area: Rect,
    rows_area: Rect,
}

impl SongManager {
    pub fn new() -> Self {
        Self {
            search: TextInput::new("/", "Search songs by title, artist, or album..."),
            cursor: ListCursor::default(),
            search_area: Rect::default(),
            rows_area: Rect::default(),
        }
    }

    fn selected<'a>(&self, state: &'a AppState) -> Option<&'a Song> {
        state.views.songs.visible().get(self.cursor.selected()).copied()
    }

    fn on_field(&mut self, action: InputAction) -> Vec<Action> {
        match action {
            InputAction::Changed(query) => {
                self.cursor.reset();
                vec![SongsMsg::Query(query).into()]
            }
            InputAction::Submitted => {
                self.search.deactivate();
                vec![]
            }
            InputAction::Cancelled | InputAction::None => vec![],
        }
    }
}

impl Default for SongManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SongManager {
    fn id(&self) -> ComponentId {
        ComponentId::SongManager
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        let len = state.views.songs.visible().len();
        if self.search.is_active() {
            // the list stays navigable while typing
            match key.code {
                KeyCode::Up => self.cursor.up(1),
                KeyCode::Down => self.cursor.down(1, len),
                _ => {
                    let action = self.search.handle_key(key);
                    return self.on_field(action);
                }
            }
            return vec![];
        }

        let page = (self.rows_area.height as usize).max(1);
        match key.code {
            KeyCode::Char('/') => self.search.activate(),
            KeyCode::Up | KeyCode::Char('k') => self.cursor.up(1),
            KeyCode::Down | KeyCode::Char('j') => self.cursor.down(1, len),
            KeyCode::PageUp => self.cursor.up(page),
            KeyCode::PageDown => self.cursor.down(page, len),
            KeyCode::Home | KeyCode::Char('g') => self.cursor.first(),
            KeyCode::End | KeyCode::Char('G') => self.cursor.last(len),
            KeyCode::Esc if !state.views.songs.query().is_empty() => {
                self.search.set_value("");
                self.cursor.reset();
                return vec![SongsMsg::Query(String::new()).into()];
            }
            KeyCode::Char('R') => return vec![SongsMsg::Refresh.into()],
            KeyCode::Char('x') => return vec![SongsMsg::DismissNotice.into()],
            KeyCode::Enter => {
                return self
                    .selected(state)
                    .map(|s| vec![SongsMsg::Select(s.id.clone()).into()])
                    .unwrap_or_default();
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                return self
                    .selected(state)
                    .map(|s| vec![SongsMsg::RequestDelete(s.id.clone()).into()])
                    .unwrap_or_default();
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        let (col, row) = (event.column, event.row);
        let len = state.views.songs.visible().len();
        match event.kind {
            MouseEventKind::ScrollUp => self.cursor.up(3),
            MouseEventKind::ScrollDown => self.cursor.down(3, len),
            MouseEventKind::Down(MouseButton::Left) => {
                if hit(self.search_area, col, row) {
                    self.search.activate();
                } else if hit(self.rows_area, col, row) {
                    let already = self.cursor.selected();
                    let target = (row - self.rows_area.y) as usize;
                    if self.cursor.click(target, len) && self.cursor.selected() == already {
                        // second click on the same row opens it
                        if let Some(song) = self.selected(state) {
                            return vec![SongsMsg::Select(song.id.clone()).into()];
                        }
                    }
                }
            }
            _ => {}
        }
        vec![]
    }

    fn handle_paste(&mut self, text: &str, _state: &AppState) -> Vec<Action> {
        self.search.activate();
        let action = self.search.paste(text);
        self.on_field(action)
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if *action == Action::Navigate(Route::Songs) {
            self.cursor.reset();
        }
        vec![]
    }

    fn is_editing(&self) -> bool {
        self.search.is_active()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let view = &state.views.songs;
        let fetch = view.state();
        self.search.set_value(view.query());

        let block = pane_chrome(
            "songs",
            Some('4'),
            focused,
            Badge::for_fetch(fetch.is_loading(), fetch.error().is_some()),
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // search
                Constraint::Length(1), // summary
                Constraint::Length(1), // column titles
                Constraint::Min(0),
                Constraint::Length(1), // notice
            ])
            .split(inner);

        self.search_area = rows[0];
        self.search.draw(frame, rows[0]);

        let summary = match fetch.error() {
            Some(err) => Span::styled(format!(" {}  (R retry)", err), style_error()),
            None if !fetch.has_loaded() => Span::styled(" Loading songs...", style_muted()),
            None => Span::styled(format!(" {}", view.summary()), style_secondary()),
        };
        frame.render_widget(Paragraph::new(Line::from(summary)), rows[1]);

        let widths = columns(rows[3].width as usize);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(
                    "   {:<tw$} {:<aw$} {:<bw$} {:>5}  on",
                    "Title",
                    "Artist",
                    "Album",
                    "Time",
                    tw = widths.0,
                    aw = widths.1,
                    bw = widths.2
                ),
                Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
            ))),
            rows[2],
        );

        self.rows_area = rows[3];
        if let Some(empty) = view.empty_state() {
            let body = vec![
                Line::from(""),
                Line::from(Span::styled(
                    empty.title,
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(empty.hint, style_muted())),
            ];
            frame.render_widget(Paragraph::new(body).alignment(Alignment::Center), rows[3]);
        } else {
            let visible = view.visible();
            let height = rows[3].height as usize;
            self.cursor.clamp(visible.len());
            self.cursor.ensure_visible(height);
            let window = self.cursor.window(height, visible.len());
            let selected_in_view = self.cursor.selected().saturating_sub(window.start);
            let items: Vec<ListItem> = visible[window]
                .iter()
                .map(|song| ListItem::new(song_row(song, widths)))
                .collect();
            let mut list_state = ListState::default();
            if !items.is_empty() {
                list_state.select(Some(selected_in_view));
            }
            let list = List::new(items)
                .highlight_style(style_selected())
                .highlight_symbol(" ▸ ");
            frame.render_stateful_widget(list, rows[3], &mut list_state);
        }

        if let Some(notice) = view.notice() {
            let style = if notice.is_error() { style_error() } else { style_ok() };
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {}  (x dismiss)", notice.text()), style)),
                rows[4],
            );
        }
    }
}

/// Title, artist and album column widths for a row of `width` columns.
fn columns(width: usize) -> (usize, usize, usize) {
    // marker 3, separators 3, time 5, platform marks 6
    let free = width.saturating_sub(3 + 3 + 5 + 6);
    let title = free * 2 / 5;
    let artist = free * 3 / 10;
    (title, artist, free - title - artist)
}

fn song_row(song: &Song, (tw, aw, bw): (usize, usize, usize)) -> Line<'static> {
    let mut spans = vec![
        Span::raw(format!(
            "{:<tw$} {:<aw$} {:<bw$} {:>5}  ",
            fit(&song.title, tw),
            fit(&song.artist, aw),
            fit(&song.album, bw),
            format_duration(song.duration),
        )),
    ];
    for platform in Platform::ALL {
        let (mark, style) = if song.is_on(platform) {
            ("●", Style::default().fg(platform_color(platform)))
        } else {
            ("·", Style::default().fg(C_MUTED))
        };
        spans.push(Span::styled(mark, style));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::columns;

    #[test]
    fn columns_use_the_free_width() {
        let (t, a, b) = columns(100);
        assert_eq!(t + a + b, 100 - 17);
        assert!(t > a);
        assert_eq!(columns(5), (0, 0, 0));
    }
}
