//! SongDetail: overlay with everything known about one song.

use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use playshift_core::format::{format_duration, format_local_date, or_not_available};
use playshift_core::model::{Platform, Song};
use playshift_core::views::SongsMsg;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{
        platform_color, style_muted, style_secondary, C_OVERLAY_BG, C_PANEL_BORDER_FOCUSED,
        C_PRIMARY,
    },
    widgets::{centered_rect, hit},
};

pub struct SongDetail {
    popup: Rect,
}

impl SongDetail {
    pub fn new() -> Self {
        Self {
            popup: Rect::default(),
        }
    }
}

impl Default for SongDetail {
    fn default() -> Self {
        Self::new()
    }
}

fn copy_key(platform: Platform) -> char {
    match platform {
        Platform::Spotify => 's',
        Platform::Youtube => 'y',
    }
}

/// Lines of the overlay body. Links appear only for platforms with a URL.
fn detail_lines(song: &Song) -> Vec<Line<'static>> {
    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!(" {:<12}", label), style_muted()),
            Span::styled(value, Style::default().fg(C_PRIMARY)),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}", song.title),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format!(" {}", song.artist), style_secondary())),
        Line::from(""),
        field("Album", song.album.clone()),
        field("Duration", format_duration(song.duration)),
        field(
            "Spotify ID",
            or_not_available(song.id_for(Platform::Spotify)).to_string(),
        ),
        field(
            "YouTube ID",
            or_not_available(song.id_for(Platform::Youtube)).to_string(),
        ),
        field("Created", format_local_date(&song.created_at)),
        field("Updated", format_local_date(&song.updated_at)),
    ];

    let links: Vec<Line<'static>> = Platform::ALL
        .into_iter()
        .filter_map(|p| {
            let url = song.url_for(p)?;
            Some(Line::from(vec![
                Span::styled(format!(" [{}] ", copy_key(p)), style_muted()),
                Span::styled(
                    format!("Open in {}", p.label()),
                    Style::default().fg(platform_color(p)),
                ),
                Span::styled(format!("  {}", url), style_muted()),
            ]))
        })
        .collect();
    if !links.is_empty() {
        lines.push(Line::from(""));
        lines.extend(links);
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " esc / enter close",
        style_muted(),
    )));
    lines
}

impl Component for SongDetail {
    fn id(&self) -> ComponentId {
        ComponentId::SongDetail
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        let Some(song) = state.views.songs.selected() else {
            return vec![];
        };
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => {
                vec![SongsMsg::CloseDetail.into()]
            }
            KeyCode::Char(c) => Platform::ALL
                .into_iter()
                .find(|p| copy_key(*p) == c)
                .and_then(|p| song.url_for(p))
                .map(|url| vec![Action::CopyToClipboard(url.to_string())])
                .unwrap_or_default(),
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if event.kind == MouseEventKind::Down(MouseButton::Left)
            && !hit(self.popup, event.column, event.row)
        {
            return vec![SongsMsg::CloseDetail.into()];
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let Some(song) = state.views.songs.selected() else {
            self.popup = Rect::default();
            return;
        };
        let lines = detail_lines(song);
        self.popup = centered_rect(60, lines.len() as u16 + 2, area);
        frame.render_widget(Clear, self.popup);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(C_PANEL_BORDER_FOCUSED))
                    .title(" song ")
                    .style(Style::default().bg(C_OVERLAY_BG)),
            ),
            self.popup,
        );
    }
}
