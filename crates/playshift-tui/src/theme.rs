//! Colour palette and shared styles for the terminal front end.

use playshift_core::model::Platform;
use ratatui::style::{Color, Modifier, Style};

// ── Base ─────────────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(18, 18, 18);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_ACCENT: Color = Color::Rgb(255, 95, 95);
pub const C_SELECTION_BG: Color = Color::Rgb(28, 28, 40);

// ── Panels ───────────────────────────────────────────────────────────────────

pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(120, 100, 200);
pub const C_OVERLAY_BG: Color = Color::Rgb(18, 18, 26);
pub const C_NUMBER_HINT: Color = Color::Rgb(90, 90, 115);

// ── Inputs ───────────────────────────────────────────────────────────────────

pub const C_FILTER_BG: Color = Color::Rgb(20, 20, 32);
pub const C_FILTER_FG: Color = Color::Rgb(255, 200, 80);

// ── Platforms ────────────────────────────────────────────────────────────────

pub const C_SPOTIFY: Color = Color::Rgb(30, 215, 96);
pub const C_YOUTUBE: Color = Color::Rgb(255, 70, 70);

// ── Status ───────────────────────────────────────────────────────────────────

pub const C_OK: Color = Color::Rgb(80, 200, 120);
pub const C_BUSY: Color = Color::Rgb(255, 184, 80);
pub const C_ERROR: Color = Color::Rgb(230, 80, 80);

pub const C_TOAST_INFO: Color = Color::Rgb(140, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_TOAST_ERROR: Color = Color::Rgb(230, 80, 80);

pub const C_MODE_NORMAL: Color = Color::Rgb(120, 100, 200);
pub const C_MODE_EDIT: Color = Color::Rgb(255, 200, 80);

pub fn platform_color(platform: Platform) -> Color {
    match platform {
        Platform::Spotify => C_SPOTIFY,
        Platform::Youtube => C_YOUTUBE,
    }
}

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_selected() -> Style {
    Style::default()
        .fg(C_PRIMARY)
        .bg(C_SELECTION_BG)
        .add_modifier(Modifier::BOLD)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_error() -> Style {
    Style::default().fg(C_ERROR)
}

pub fn style_ok() -> Style {
    Style::default().fg(C_OK)
}
