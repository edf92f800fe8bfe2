use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// A single-choice selector rendered as `Label: ‹ value › (i/n)`.
pub struct Selector<'a> {
    pub label: &'a str,
    pub options: &'a [String],
    pub current: &'a str,
    pub focused: bool,
    pub theme: &'a Theme,
}

impl<'a> Selector<'a> {
    pub fn new(
        label: &'a str,
        options: &'a [String],
        current: &'a str,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            label,
            options,
            current,
            focused,
            theme,
        }
    }

    /// 1-based position of the current value, `None` if it is not an option.
    pub fn position(&self) -> Option<usize> {
        self.options
            .iter()
            .position(|o| o == self.current)
            .map(|i| i + 1)
    }

    pub fn to_spans(&self) -> Vec<Span<'a>> {
        let counter = match self.position() {
            Some(pos) => format!(" ({pos}/{})", self.options.len()),
            None => format!(" (-/{})", self.options.len()),
        };
        vec![
            Span::styled(format!("{}: ", self.label), self.theme.label),
            Span::styled(
                format!("‹ {} ›", self.current),
                self.theme.selector_style(self.focused),
            ),
            Span::styled(counter, self.theme.dim),
        ]
    }

    pub fn to_line(&self) -> Line<'a> {
        Line::from(self.to_spans())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        ["Leisure", "Corporate", "Group"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_selector_text() {
        let theme = Theme::dark();
        let opts = options();
        let line = Selector::new("Segment", &opts, "Corporate", false, &theme).to_line();
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Segment: ‹ Corporate › (2/3)");
    }

    #[test]
    fn test_selector_focus_style() {
        let theme = Theme::dark();
        let opts = options();
        let focused = Selector::new("Segment", &opts, "Group", true, &theme).to_spans();
        let idle = Selector::new("Segment", &opts, "Group", false, &theme).to_spans();
        assert_eq!(focused[1].style, theme.selector_focused);
        assert_eq!(idle[1].style, theme.selector);
    }

    #[test]
    fn test_selector_unknown_value() {
        let theme = Theme::dark();
        let opts = options();
        let sel = Selector::new("Segment", &opts, "Wholesale", false, &theme);
        assert_eq!(sel.position(), None);
        assert_eq!(sel.to_spans()[2].content, " (-/3)");
    }
}
