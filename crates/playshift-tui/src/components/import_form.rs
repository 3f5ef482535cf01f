//! ImportForm: playlist link field plus the per-platform sign-in actions.

use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use playshift_core::model::Platform;
use playshift_core::views::ImportMsg;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{
        platform_color, style_error, style_muted, style_ok, style_secondary, C_BUSY, C_PRIMARY,
    },
    widgets::{
        hit,
        pane_chrome::{pane_chrome, Badge},
        text_input::{InputAction, TextInput},
    },
};

pub struct ImportForm {
    link: TextInput,
    link_area: Rect,
    submit_area: Rect,
    auth_areas: [(Platform, Rect); 2],
}

impl ImportForm {
    pub fn new() -> Self {
        Self {
            link: TextInput::new(">", "https://open.spotify.com/playlist/..."),
            link_area: Rect::default(),
            submit_area: Rect::default(),
            auth_areas: [
                (Platform::Spotify, Rect::default()),
                (Platform::Youtube, Rect::default()),
            ],
        }
    }

    fn on_field(&mut self, action: InputAction) -> Vec<Action> {
        match action {
            InputAction::Changed(value) => vec![ImportMsg::Input(value).into()],
            InputAction::Submitted => {
                self.link.deactivate();
                vec![ImportMsg::Submit.into()]
            }
            InputAction::Cancelled | InputAction::None => vec![],
        }
    }
}

impl Default for ImportForm {
    fn default() -> Self {
        Self::new()
    }
}

fn auth_key(platform: Platform) -> char {
    match platform {
        Platform::Spotify => 's',
        Platform::Youtube => 'y',
    }
}

impl Component for ImportForm {
    fn id(&self) -> ComponentId {
        ComponentId::ImportForm
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if self.link.is_active() {
            let action = self.link.handle_key(key);
            return self.on_field(action);
        }
        match key.code {
            KeyCode::Char('e') | KeyCode::Char('i') | KeyCode::Char('/') | KeyCode::Enter => {
                self.link.activate();
                vec![]
            }
            KeyCode::Char('s') => vec![ImportMsg::Authorize(Platform::Spotify).into()],
            KeyCode::Char('y') => vec![ImportMsg::Authorize(Platform::Youtube).into()],
            KeyCode::Char('x') => vec![ImportMsg::DismissNotice.into()],
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        let (col, row) = (event.column, event.row);
        if hit(self.link_area, col, row) {
            self.link.activate();
            return vec![];
        }
        if hit(self.submit_area, col, row) {
            self.link.deactivate();
            return vec![ImportMsg::Submit.into()];
        }
        self.auth_areas
            .iter()
            .find(|(_, r)| hit(*r, col, row))
            .map(|(p, _)| vec![ImportMsg::Authorize(*p).into()])
            .unwrap_or_default()
    }

    fn handle_paste(&mut self, text: &str, _state: &AppState) -> Vec<Action> {
        self.link.activate();
        let action = self.link.paste(text);
        self.on_field(action)
    }

    fn is_editing(&self) -> bool {
        self.link.is_active()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let view = &state.views.import;
        // the view clears its input after a successful import
        self.link.set_value(view.input());

        let badge = view
            .is_submitting()
            .then(|| Badge::new("importing", C_BUSY));
        let block = pane_chrome("import playlist", Some('2'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // intro
                Constraint::Length(1), // field
                Constraint::Length(1), // submit
                Constraint::Length(2), // notice
                Constraint::Length(1), // accounts title
                Constraint::Length(1), // spotify
                Constraint::Length(1), // youtube
                Constraint::Min(0),
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(
                    " Import Playlist",
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    " Paste a Spotify playlist link to add it to your library.",
                    style_secondary(),
                )),
            ]),
            rows[0],
        );

        self.link_area = rows[1];
        self.link.draw(frame, rows[1]);

        self.submit_area = rows[2];
        let submit = if view.is_submitting() {
            Span::styled(" Importing...", Style::default().fg(C_BUSY))
        } else {
            Span::styled(" [Enter] Import Playlist", style_muted())
        };
        frame.render_widget(Paragraph::new(Line::from(submit)), rows[2]);

        if let Some(notice) = view.notice() {
            let style = if notice.is_error() { style_error() } else { style_ok() };
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(format!(" {}", notice.text()), style)),
                ]),
                rows[3],
            );
        }

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " Connect accounts",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ))),
            rows[4],
        );
        for (i, platform) in Platform::ALL.into_iter().enumerate() {
            let row = rows[5 + i];
            self.auth_areas[i] = (platform, row);
            let status = if view.is_authorizing(platform) {
                Span::styled("  Redirecting...", Style::default().fg(C_BUSY))
            } else {
                Span::raw("")
            };
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(format!(" [{}] ", auth_key(platform)), style_muted()),
                    Span::styled(
                        format!("Connect {}", platform.label()),
                        Style::default().fg(platform_color(platform)),
                    ),
                    status,
                ])),
                row,
            );
        }
    }
}
