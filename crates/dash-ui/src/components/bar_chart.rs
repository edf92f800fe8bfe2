//! Horizontal bar chart drawn as text lines.
//!
//! One line per table row: the key padded to a common width, a coloured run
//! of `█` proportional to the value, a `░` remainder, and the annotated value.

use dash_data::pipeline::RevenueTable;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::presentation::PresentationConfig;
use crate::themes::Theme;

const FILLED: char = '\u{2588}'; // █  FULL BLOCK
const EMPTY: char = '\u{2591}'; // ░  LIGHT SHADE

/// Widest key column before labels are truncated.
pub const MAX_LABEL_WIDTH: usize = 18;

pub struct BarChart<'a> {
    pub table: &'a RevenueTable,
    pub config: &'a PresentationConfig,
    pub theme: &'a Theme,
    /// Overrides `config.bar_width` when the panel is narrower.
    pub width: u16,
}

impl<'a> BarChart<'a> {
    pub fn new(table: &'a RevenueTable, config: &'a PresentationConfig, theme: &'a Theme) -> Self {
        Self {
            table,
            config,
            theme,
            width: config.bar_width,
        }
    }

    /// Limit the bar length to `width` columns.
    pub fn fit_to(mut self, width: u16) -> Self {
        self.width = self.width.min(width);
        self
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let label_width = self
            .table
            .keys()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0)
            .min(MAX_LABEL_WIDTH);
        let max = self.table.max_value().unwrap_or(0.0);

        self.table
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let filled = bar_length(row.value, max, self.width);
                let empty = self.width.saturating_sub(filled);
                let bar_style = Style::default().fg(self.config.bar_color(i));

                Line::from(vec![
                    Span::styled(pad_label(&row.key, label_width), self.theme.label),
                    Span::raw(" "),
                    Span::styled(repeat(FILLED, filled), bar_style),
                    Span::styled(repeat(EMPTY, empty), self.theme.dim),
                    Span::styled(
                        format!(" {}", self.config.annotation.format(row.value)),
                        self.theme.annotation,
                    ),
                ])
            })
            .collect()
    }
}

/// Columns filled for `value` when `max` spans `width` columns.  Negative and
/// non-finite values draw nothing.
fn bar_length(value: f64, max: f64, width: u16) -> u16 {
    if max <= 0.0 || !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let ratio = (value / max).min(1.0);
    (ratio * f64::from(width)).round() as u16
}

fn repeat(c: char, n: u16) -> String {
    std::iter::repeat_n(c, n as usize).collect()
}

/// Left-align `label` in exactly `width` display columns, truncating with `…`.
fn pad_label(label: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;
    if label.width() > width {
        for c in label.chars() {
            let w = c.width().unwrap_or(0);
            if used + w + 1 > width {
                break;
            }
            out.push(c);
            used += w;
        }
        if width > 0 {
            out.push('…');
            used += 1;
        }
    } else {
        out.push_str(label);
        used = label.width();
    }
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
