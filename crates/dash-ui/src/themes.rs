use dash_data::dashboard::InsightLevel;
use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  An absent or
/// unparseable variable yields [`BackgroundType::Unknown`].
pub fn detect_background() -> BackgroundType {
    std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .map_or(BackgroundType::Unknown, parse_colorfgbg)
}

fn parse_colorfgbg(value: &str) -> BackgroundType {
    match value.split(';').next_back().and_then(|bg| bg.parse::<u8>().ok()) {
        Some(bg) if bg <= 6 => BackgroundType::Dark,
        Some(_) => BackgroundType::Light,
        None => BackgroundType::Unknown,
    }
}

/// Text and chrome styles for every dashboard component.
///
/// Chart colours are not part of the theme; they come from the
/// [`PresentationConfig`](crate::presentation::PresentationConfig).
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,

    // ── Selectors ────────────────────────────────────────────────────────────
    pub selector: Style,
    /// Selector that currently receives ←/→.
    pub selector_focused: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub border: Style,
    pub axis: Style,
    /// Value printed after each bar.
    pub annotation: Style,

    // ── Page tabs ────────────────────────────────────────────────────────────
    pub tab: Style,
    pub tab_active: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),

            selector: Style::default().fg(Color::Gray),
            selector_focused: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            border: Style::default().fg(Color::DarkGray),
            axis: Style::default().fg(Color::Gray),
            annotation: Style::default().fg(Color::White),

            tab: Style::default().fg(Color::Gray),
            tab_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),

            selector: Style::default().fg(Color::DarkGray),
            selector_focused: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            border: Style::default().fg(Color::Gray),
            axis: Style::default().fg(Color::DarkGray),
            annotation: Style::default().fg(Color::Black),

            tab: Style::default().fg(Color::DarkGray),
            tab_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        }
    }

    /// Basic 8-colour ANSI theme without bold modifiers.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_accent: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),

            selector: Style::default().fg(Color::White),
            selector_focused: Style::default().fg(Color::Black).bg(Color::White),

            border: Style::default().fg(Color::DarkGray),
            axis: Style::default().fg(Color::White),
            annotation: Style::default().fg(Color::White),

            tab: Style::default().fg(Color::Gray),
            tab_active: Style::default().fg(Color::Black).bg(Color::Cyan),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names (including `"auto"`).
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    pub fn insight_style(&self, level: InsightLevel) -> Style {
        match level {
            InsightLevel::Info => self.info,
            InsightLevel::Success => self.success,
            InsightLevel::Warning => self.warning,
        }
    }

    pub fn selector_style(&self, focused: bool) -> Style {
        if focused {
            self.selector_focused
        } else {
            self.selector
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
