//! Toast notifications: transient one-line messages in the top-right corner.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::theme::{C_TOAST_ERROR, C_TOAST_INFO, C_TOAST_SUCCESS, C_TOAST_WARNING};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    fn icon(self) -> &'static str {
        match self {
            Severity::Info => "·",
            Severity::Success => "✓",
            Severity::Warning => "!",
            Severity::Error => "✗",
        }
    }

    fn color(self) -> ratatui::style::Color {
        match self {
            Severity::Info => C_TOAST_INFO,
            Severity::Success => C_TOAST_SUCCESS,
            Severity::Warning => C_TOAST_WARNING,
            Severity::Error => C_TOAST_ERROR,
        }
    }
}

struct Toast {
    message: String,
    severity: Severity,
    expires: Instant,
}

/// Activity indicator shown while requests are in flight.
struct Spinner {
    message: String,
    frame: usize,
}

const SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub struct ToastManager {
    toasts: VecDeque<Toast>,
    spinner: Option<Spinner>,
    max_visible: usize,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: VecDeque::new(),
            spinner: None,
            max_visible: 4,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, severity: Severity, ttl: Duration) {
        let message = message.into();
        // a repeated message restarts its timer instead of stacking
        self.toasts.retain(|t| t.message != message);
        self.toasts.push_back(Toast {
            message,
            severity,
            expires: Instant::now() + ttl,
        });
        while self.toasts.len() > self.max_visible * 2 {
            self.toasts.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Info, Duration::from_secs(3));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Success, Duration::from_secs(3));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Warning, Duration::from_secs(5));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Error, Duration::from_secs(5));
    }

    /// Show or relabel the spinner. It stays until `dismiss_spinner`.
    pub fn spinner(&mut self, message: impl Into<String>) {
        let message = message.into();
        match self.spinner.as_mut() {
            Some(s) => s.message = message,
            None => self.spinner = Some(Spinner { message, frame: 0 }),
        }
    }

    pub fn dismiss_spinner(&mut self) {
        self.spinner = None;
    }

    /// Drop expired toasts and advance the spinner animation.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.toasts.retain(|t| t.expires > now);
        if let Some(s) = self.spinner.as_mut() {
            s.frame = (s.frame + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty() && self.spinner.is_none()
    }

    fn messages(&self) -> impl Iterator<Item = (&str, Severity)> {
        self.toasts
            .iter()
            .rev()
            .take(self.max_visible)
            .map(|t| (t.message.as_str(), t.severity))
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        if self.is_empty() {
            return;
        }
        let max_width = (area.width / 2).clamp(30, 60);
        let mut y = area.y + 1;

        let mut rows: Vec<(String, Style)> = Vec::new();
        if let Some(s) = &self.spinner {
            let icon = SPINNER_FRAMES[s.frame % SPINNER_FRAMES.len()];
            rows.push((
                format!(" {} {} ", icon, s.message),
                Style::default()
                    .fg(C_TOAST_INFO)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        for (message, severity) in self.messages() {
            rows.push((
                format!(" {} {} ", severity.icon(), message),
                Style::default()
                    .fg(severity.color())
                    .add_modifier(Modifier::BOLD),
            ));
        }

        for (text, style) in rows {
            if y >= area.y + area.height {
                break;
            }
            let w = (text.chars().count() as u16).min(max_width);
            let x = area.x + area.width.saturating_sub(w + 1);
            let toast_area = Rect {
                x,
                y,
                width: w,
                height: 1,
            };
            frame.render_widget(Clear, toast_area);
            frame.render_widget(
                Paragraph::new(Line::from(vec![Span::styled(text, style)])),
                toast_area,
            );
            y += 1;
        }
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_message_is_not_stacked() {
        let mut toasts = ToastManager::new();
        toasts.error("Sync failed: timeout");
        toasts.error("Sync failed: timeout");
        assert_eq!(toasts.messages().count(), 1);
    }

    #[test]
    fn expired_toasts_are_dropped_on_tick() {
        let mut toasts = ToastManager::new();
        toasts.push("gone", Severity::Info, Duration::ZERO);
        toasts.info("stays");
        toasts.tick();
        let left: Vec<_> = toasts.messages().map(|(m, _)| m.to_string()).collect();
        assert_eq!(left, vec!["stays"]);
    }

    #[test]
    fn queue_is_capped() {
        let mut toasts = ToastManager::new();
        for i in 0..20 {
            toasts.info(format!("toast {}", i));
        }
        assert_eq!(toasts.toasts.len(), 8);
        assert_eq!(toasts.messages().next().map(|(m, _)| m), Some("toast 19"));
    }

    #[test]
    fn spinner_keeps_manager_non_empty_until_dismissed() {
        let mut toasts = ToastManager::new();
        toasts.spinner("1 request in flight");
        toasts.spinner("2 requests in flight");
        toasts.tick();
        assert!(!toasts.is_empty());
        toasts.dismiss_spinner();
        assert!(toasts.is_empty());
    }
}
