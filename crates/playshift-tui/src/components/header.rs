//! Header: two-row top bar, not focusable.
//!
//! Row 1: app name, route tabs, backend health.
//! Row 2: base URL and signed-in user.

use ratatui::crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::{AppState, BackendStatus},
    component::Component,
    shell::Route,
    theme::{C_ACCENT, C_BUSY, C_ERROR, C_MUTED, C_NUMBER_HINT, C_OK, C_PRIMARY, C_SECONDARY},
};

pub struct Header {
    /// Column span of each tab from the last draw.
    tabs: Vec<(Route, u16, u16)>,
}

impl Header {
    pub fn new() -> Self {
        Self { tabs: Vec::new() }
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Header {
    fn id(&self) -> ComponentId {
        ComponentId::Header
    }

    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) || event.row != area.y {
            return vec![];
        }
        self.tabs
            .iter()
            .find(|(_, start, end)| event.column >= *start && event.column < *end)
            .map(|(route, _, _)| vec![Action::Navigate(*route)])
            .unwrap_or_default()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if area.height == 0 {
            return;
        }
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let mut spans = vec![Span::styled(
            " playshift ",
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        )];
        let mut x = area.x + 11;
        self.tabs.clear();
        for route in Route::ALL {
            let active = route == state.route;
            let hint = format!(" {} ", route.hotkey());
            let label = format!("{} ", route.label());
            let width = (hint.chars().count() + label.chars().count()) as u16;
            self.tabs.push((route, x, x + width));
            x += width;
            spans.push(Span::styled(hint, Style::default().fg(C_NUMBER_HINT)));
            spans.push(if active {
                Span::styled(
                    label,
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                )
            } else {
                Span::styled(label, Style::default().fg(C_SECONDARY))
            });
        }

        let (badge, color) = match &state.backend {
            BackendStatus::Unknown => ("◌ checking".to_string(), C_BUSY),
            BackendStatus::Up => ("● online".to_string(), C_OK),
            BackendStatus::Down(_) => ("○ offline".to_string(), C_ERROR),
        };
        let mut right = vec![Span::styled(badge, Style::default().fg(color))];
        if state.in_flight > 0 {
            right.insert(
                0,
                Span::styled(format!("{} pending  ", state.in_flight), Style::default().fg(C_BUSY)),
            );
        }
        right.push(Span::raw(" "));

        frame.render_widget(Paragraph::new(Line::from(spans)), rows[0]);
        frame.render_widget(Paragraph::new(Line::from(right).right_aligned()), rows[0]);

        if rows[1].height > 0 {
            let mut detail = vec![
                Span::styled(" api ", Style::default().fg(C_MUTED)),
                Span::styled(state.base_url.clone(), Style::default().fg(C_SECONDARY)),
                Span::styled("   user ", Style::default().fg(C_MUTED)),
                Span::styled(state.user_id().to_string(), Style::default().fg(C_SECONDARY)),
            ];
            if let BackendStatus::Down(reason) = &state.backend {
                detail.push(Span::styled(format!("   {}", reason), Style::default().fg(C_ERROR)));
            }
            frame.render_widget(Paragraph::new(Line::from(detail)), rows[1]);
        }
    }
}
