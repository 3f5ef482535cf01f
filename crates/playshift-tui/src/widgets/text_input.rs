//! Single-line text field on top of tui-input, used for the search bar and
//! the playlist link field.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{C_FILTER_BG, C_FILTER_FG, C_MUTED, C_SECONDARY};

#[derive(Debug, PartialEq, Eq)]
pub enum InputAction {
    Changed(String),
    Submitted,
    Cancelled,
    None,
}

pub struct TextInput {
    input: Input,
    active: bool,
    prompt: &'static str,
    placeholder: String,
}

impl TextInput {
    pub fn new(prompt: &'static str, placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            active: false,
            prompt,
            placeholder: placeholder.into(),
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    /// Replace the contents, leaving the cursor at the end.
    pub fn set_value(&mut self, value: &str) {
        if self.input.value() != value {
            self.input = Input::new(value.to_string());
        }
    }

    /// Insert pasted text at the end. Newlines are dropped.
    pub fn paste(&mut self, pasted: &str) -> InputAction {
        let cleaned: String = pasted.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        if cleaned.is_empty() {
            return InputAction::None;
        }
        let value = format!("{}{}", self.input.value(), cleaned);
        self.input = Input::new(value);
        InputAction::Changed(self.input.value().to_string())
    }

    /// Esc clears a non-empty field first and only cancels once it is empty.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputAction {
        match key.code {
            KeyCode::Esc if !self.input.value().is_empty() => {
                self.input = Input::default();
                InputAction::Changed(String::new())
            }
            KeyCode::Esc => {
                self.deactivate();
                InputAction::Cancelled
            }
            KeyCode::Enter => InputAction::Submitted,
            _ => {
                let before = self.input.value().to_string();
                self.input.handle_event(&Event::Key(key));
                if self.input.value() == before {
                    InputAction::None
                } else {
                    InputAction::Changed(self.input.value().to_string())
                }
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let prefix_w = self.prompt.chars().count() + 1;
        let width = (area.width as usize).saturating_sub(prefix_w + 1);
        let scroll = self.input.visual_scroll(width);
        let value = self.input.value();

        let prompt_style = Style::default().fg(if self.active { C_FILTER_FG } else { C_SECONDARY });
        let body = if value.is_empty() {
            Span::styled(self.placeholder.clone(), Style::default().fg(C_MUTED))
        } else {
            Span::styled(
                value.chars().skip(scroll).collect::<String>(),
                Style::default().fg(C_FILTER_FG),
            )
        };
        let line = Line::from(vec![
            Span::styled(format!("{} ", self.prompt), prompt_style),
            body,
        ]);
        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(C_FILTER_BG)),
            area,
        );

        if self.active && area.width > 0 {
            let cursor_x =
                area.x + (prefix_w + self.input.visual_cursor().saturating_sub(scroll)) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width - 1), area.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_reports_the_new_value() {
        let mut field = TextInput::new("/", "search songs");
        field.activate();
        assert_eq!(field.handle_key(key(KeyCode::Char('a'))), InputAction::Changed("a".into()));
        assert_eq!(field.handle_key(key(KeyCode::Char('b'))), InputAction::Changed("ab".into()));
        assert_eq!(field.handle_key(key(KeyCode::Backspace)), InputAction::Changed("a".into()));
    }

    #[test]
    fn escape_clears_then_cancels() {
        let mut field = TextInput::new("/", "search songs");
        field.activate();
        field.set_value("bowie");
        assert_eq!(field.handle_key(key(KeyCode::Esc)), InputAction::Changed(String::new()));
        assert!(field.is_active());
        assert_eq!(field.handle_key(key(KeyCode::Esc)), InputAction::Cancelled);
        assert!(!field.is_active());
    }

    #[test]
    fn paste_appends_without_newlines() {
        let mut field = TextInput::new(">", "link");
        let action = field.paste("https://open.spotify.com/playlist/ABC\n");
        assert_eq!(
            action,
            InputAction::Changed("https://open.spotify.com/playlist/ABC".into())
        );
        assert_eq!(field.paste("\n"), InputAction::None);
    }
}
