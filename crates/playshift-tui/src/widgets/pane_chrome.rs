//! Bordered pane block with focus styling and an optional right-hand badge.

use crate::theme::{
    style_focused_border, style_unfocused_border, C_BUSY, C_ERROR, C_MUTED, C_NUMBER_HINT,
    C_PRIMARY,
};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

/// Short status tag in the pane's top-right corner.
pub struct Badge {
    pub text: String,
    pub color: Color,
}

impl Badge {
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }

    /// Loading or error tag for a fetch-backed pane.
    pub fn for_fetch(loading: bool, failed: bool) -> Option<Self> {
        if loading {
            Some(Self::new("loading", C_BUSY))
        } else if failed {
            Some(Self::new("error", C_ERROR))
        } else {
            None
        }
    }
}

pub fn pane_chrome<'a>(
    title: &'a str,
    number_key: Option<char>,
    focused: bool,
    badge: Option<Badge>,
) -> Block<'a> {
    pane_chrome_borders(title, number_key, focused, badge, Borders::ALL)
}

pub fn pane_chrome_borders<'a>(
    title: &'a str,
    number_key: Option<char>,
    focused: bool,
    badge: Option<Badge>,
    borders: Borders,
) -> Block<'a> {
    let border_style = if focused {
        style_focused_border()
    } else {
        style_unfocused_border()
    };
    let title_style = if focused {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_MUTED)
    };

    let mut spans = Vec::new();
    if let Some(key) = number_key {
        spans.push(Span::styled(
            format!("[{}] ", key),
            Style::default().fg(C_NUMBER_HINT),
        ));
    }
    spans.push(Span::styled(title, title_style));

    let block = Block::default()
        .borders(borders)
        .border_style(border_style)
        .title(Line::from(spans));

    match badge {
        Some(b) => block.title_top(
            Line::from(Span::styled(
                format!(" {} ", b.text),
                Style::default().fg(b.color).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        ),
        None => block,
    }
}
