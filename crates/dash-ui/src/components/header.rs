use crate::themes::Theme;
use dash_core::formatting::format_number;
use ratatui::text::{Line, Span};

/// Decoration placed either side of the title.
pub const ORNAMENT: &str = "✦ ✧ ✦ ✧";

pub const TITLE: &str = "HOTEL BOOKING INTERACTIVE DASHBOARD";

/// Dashboard header rendering four lines:
///
/// 1. Title between ornaments.
/// 2. A 60-column `=` separator.
/// 3. `[ records | style | theme ]`.
/// 4. An empty line.
pub struct Header<'a> {
    pub records: usize,
    /// Presentation preset name.
    pub style: &'a str,
    pub theme_name: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(records: usize, style: &'a str, theme_name: &'a str, theme: &'a Theme) -> Self {
        Self {
            records,
            style,
            theme_name,
            theme,
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(vec![
                Span::styled(ORNAMENT, self.theme.header_accent),
                Span::styled(format!(" {TITLE} "), self.theme.header),
                Span::styled(ORNAMENT, self.theme.header_accent),
            ]),
            Line::from(Span::styled("=".repeat(60), self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(
                    format!("{} bookings", format_number(self.records as f64, 0)),
                    self.theme.value,
                ),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.style.to_lowercase(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.theme_name.to_lowercase(), self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_line_count() {
        let theme = Theme::dark();
        assert_eq!(Header::new(10, "set2", "dark", &theme).to_lines().len(), 4);
    }

    #[test]
    fn test_header_title_line() {
        let theme = Theme::dark();
        let lines = Header::new(10, "set2", "dark", &theme).to_lines();
        let title = text(&lines[0]);
        assert!(title.contains(TITLE), "got: {title}");
        assert!(title.starts_with(ORNAMENT), "got: {title}");
    }

    #[test]
    fn test_header_separator_width() {
        let theme = Theme::light();
        let lines = Header::new(0, "teal", "light", &theme).to_lines();
        let sep = text(&lines[1]);
        assert_eq!(sep.chars().count(), 60);
        assert!(sep.chars().all(|c| c == '='));
    }

    #[test]
    fn test_header_info_line() {
        let theme = Theme::dark();
        let lines = Header::new(12_480, "TEAL", "Classic", &theme).to_lines();
        assert_eq!(text(&lines[2]), "[ 12,480 bookings | teal | classic ]");
        assert!(text(&lines[3]).is_empty());
    }
}
