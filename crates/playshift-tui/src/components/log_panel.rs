//! LogPanel: tail of the client's own log file.

use std::sync::OnceLock;

use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Borders, Clear, Paragraph},
    Frame,
};
use regex::Regex;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_ERROR, C_MUTED, C_SECONDARY, C_TOAST_WARNING},
    widgets::pane_chrome::pane_chrome_borders,
};

pub struct LogPanel {
    expanded: bool,
    /// Index of the first shown line; `usize::MAX` pins to the bottom.
    scroll: usize,
    seen: usize,
}

impl LogPanel {
    pub fn new() -> Self {
        Self {
            expanded: false,
            scroll: usize::MAX,
            seen: 0,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    fn toggle(&mut self) {
        self.expanded = !self.expanded;
        if self.expanded {
            self.scroll = usize::MAX;
        }
    }
}

impl Default for LogPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for LogPanel {
    fn id(&self) -> ComponentId {
        ComponentId::LogPanel
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            KeyCode::End | KeyCode::Char('G') => self.scroll = usize::MAX,
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.scroll = self.scroll.saturating_sub(3),
            MouseEventKind::ScrollDown => self.scroll = self.scroll.saturating_add(3),
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if *action == Action::ToggleLogs {
            self.toggle();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        if area.height == 0 {
            return;
        }
        frame.render_widget(Clear, area);

        let block = pane_chrome_borders(
            "log",
            None,
            focused,
            None,
            Borders::LEFT | Borders::BOTTOM | Borders::RIGHT | Borders::TOP,
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let logs = &state.log_lines;
        if logs.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("  nothing in {} yet", state.log_path.display()),
                    Style::default().fg(C_MUTED),
                )),
                inner,
            );
            return;
        }

        let height = inner.height as usize;
        let max_scroll = logs.len().saturating_sub(height);
        // stay pinned to the bottom while new lines arrive
        if logs.len() > self.seen && self.scroll >= max_scroll.saturating_sub(1) {
            self.scroll = usize::MAX;
        }
        self.seen = logs.len();
        self.scroll = self.scroll.min(max_scroll);

        let lines: Vec<Line> = logs
            .iter()
            .skip(self.scroll)
            .take(height)
            .map(|raw| render_line(&compact_log_line(raw)))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

// ── Log line formatting ───────────────────────────────────────────────────────

/// A tracing-subscriber fmt line split into its parts.
#[derive(Debug, PartialEq, Eq)]
struct LogLine {
    time: Option<String>,
    level: Option<&'static str>,
    message: String,
}

fn fmt_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // <rfc3339> <LEVEL> <target>: <message>
    RE.get_or_init(|| {
        Regex::new(
            r"^(?P<ts>\d{4}-\d{2}-\d{2}T\S+)\s+(?P<level>TRACE|DEBUG|INFO|WARN|ERROR)\s+(?:(?P<target>[\w:.\-]{1,48}):\s+)?(?P<msg>.*)$",
        )
        .expect("static regex")
    })
}

fn compact_log_line(raw: &str) -> LogLine {
    let clean = strip_ansi(raw);
    let clean = clean.trim();
    let Some(caps) = fmt_line_re().captures(clean) else {
        return LogLine {
            time: None,
            level: None,
            message: clean.to_string(),
        };
    };
    let level = match &caps["level"] {
        "TRACE" => "TRACE",
        "DEBUG" => "DEBUG",
        "INFO" => "INFO",
        "WARN" => "WARN",
        _ => "ERROR",
    };
    LogLine {
        time: compact_timestamp(&caps["ts"]),
        level: Some(level),
        message: caps["msg"].to_string(),
    }
}

fn render_line(line: &LogLine) -> Line<'static> {
    let level_color = match line.level {
        Some("ERROR") => C_ERROR,
        Some("WARN") => C_TOAST_WARNING,
        _ => C_MUTED,
    };
    let mut spans = vec![Span::raw("  ")];
    if let Some(t) = &line.time {
        spans.push(Span::styled(format!("{} ", t), Style::default().fg(C_MUTED)));
    }
    if let Some(level) = line.level {
        spans.push(Span::styled(
            format!("{:<5} ", level),
            Style::default().fg(level_color),
        ));
    }
    spans.push(Span::styled(
        line.message.clone(),
        Style::default().fg(C_SECONDARY),
    ));
    Line::from(spans)
}

fn compact_timestamp(token: &str) -> Option<String> {
    let dt = chrono::DateTime::parse_from_rfc3339(token).ok()?;
    let local = dt.with_timezone(&chrono::Local);
    let fmt = if local.date_naive() == chrono::Local::now().date_naive() {
        "%H:%M:%S"
    } else {
        "%m-%d %H:%M"
    };
    Some(local.format(fmt).to_string())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_escape = false;
    for ch in s.chars() {
        if in_escape {
            if ('@'..='~').contains(&ch) && ch != '[' {
                in_escape = false;
            }
            continue;
        }
        if ch == '\u{1b}' {
            in_escape = true;
            continue;
        }
        out.push(ch);
    }
    out
}
