//! ConfirmDialog: yes/no question before a delete goes out.

use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use playshift_core::views::{PlaylistsMsg, SongsMsg};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    shell::Route,
    theme::{style_muted, C_ERROR, C_OVERLAY_BG, C_PRIMARY},
    widgets::{centered_rect, hit},
};

pub struct ConfirmDialog {
    popup: Rect,
}

impl ConfirmDialog {
    pub fn new() -> Self {
        Self {
            popup: Rect::default(),
        }
    }
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self::new()
    }
}

fn answer(route: Route, confirm: bool) -> Vec<Action> {
    match (route, confirm) {
        (Route::Playlists, true) => vec![PlaylistsMsg::ConfirmDelete.into()],
        (Route::Playlists, false) => vec![PlaylistsMsg::CancelDelete.into()],
        (Route::Songs, true) => vec![SongsMsg::ConfirmDelete.into()],
        (Route::Songs, false) => vec![SongsMsg::CancelDelete.into()],
        _ => vec![],
    }
}

impl Component for ConfirmDialog {
    fn id(&self) -> ComponentId {
        ComponentId::ConfirmDialog
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => answer(state.route, true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Char('q') => {
                answer(state.route, false)
            }
            _ => vec![Action::Noop],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        if event.kind == MouseEventKind::Down(MouseButton::Left)
            && !hit(self.popup, event.column, event.row)
        {
            return answer(state.route, false);
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let Some(prompt) = state.pending_delete_prompt() else {
            self.popup = Rect::default();
            return;
        };
        self.popup = centered_rect(50, 6, area);
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                prompt,
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled("y / enter delete    n / esc keep", style_muted())),
        ];
        frame.render_widget(Clear, self.popup);
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(C_ERROR))
                    .title(" confirm ")
                    .style(Style::default().bg(C_OVERLAY_BG)),
            ),
            self.popup,
        );
    }
}
