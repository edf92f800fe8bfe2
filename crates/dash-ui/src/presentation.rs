//! Chart presentation presets.
//!
//! A [`PresentationConfig`] carries every cosmetic choice the charts make:
//! bar palette, scatter colour, figure dimensions and how bar values are
//! annotated.  The pipeline never sees it.

use dash_core::formatting::{format_currency, format_number};
use ratatui::style::Color;
use ratatui::symbols::Marker;

/// How numbers printed next to bars are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationFormat {
    pub decimals: u32,
    /// Insert `,` every three integer digits.
    pub thousands: bool,
    /// Prefix with `$`.
    pub currency: bool,
}

impl AnnotationFormat {
    pub fn format(&self, value: f64) -> String {
        match (self.currency, self.thousands) {
            (true, _) => format_currency(value, self.decimals),
            (false, true) => format_number(value, self.decimals),
            (false, false) if value.is_finite() => {
                format!("{:.*}", self.decimals as usize, value)
            }
            (false, false) => "n/a".to_string(),
        }
    }
}

/// Style preset for the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationConfig {
    pub name: &'static str,
    /// Bar colours, used in order and repeated when a chart has more bars.
    pub palette: Vec<Color>,
    pub scatter_color: Color,
    pub scatter_marker: Marker,
    /// Maximum length of a bar in terminal columns.
    pub bar_width: u16,
    /// Height of each chart panel in rows.
    pub chart_height: u16,
    pub annotation: AnnotationFormat,
}

impl PresentationConfig {
    /// ColorBrewer "Set2" bars with teal scatters and plain integer labels.
    pub fn set2() -> Self {
        Self {
            name: "set2",
            palette: vec![
                Color::Rgb(0x66, 0xc2, 0xa5),
                Color::Rgb(0xfc, 0x8d, 0x62),
                Color::Rgb(0x8d, 0xa0, 0xcb),
                Color::Rgb(0xe7, 0x8a, 0xc3),
                Color::Rgb(0xa6, 0xd8, 0x54),
                Color::Rgb(0xff, 0xd9, 0x2f),
                Color::Rgb(0xe5, 0xc4, 0x94),
                Color::Rgb(0xb3, 0xb3, 0xb3),
            ],
            scatter_color: Color::Rgb(0x00, 0x80, 0x80),
            scatter_marker: Marker::Braille,
            bar_width: 40,
            chart_height: 12,
            annotation: AnnotationFormat {
                decimals: 0,
                thousands: false,
                currency: false,
            },
        }
    }

    /// Single-hue teal ramp, wider figures and currency labels.
    pub fn teal() -> Self {
        Self {
            name: "teal",
            palette: vec![
                Color::Rgb(0x00, 0x4d, 0x4d),
                Color::Rgb(0x00, 0x66, 0x66),
                Color::Rgb(0x00, 0x80, 0x80),
                Color::Rgb(0x33, 0x99, 0x99),
                Color::Rgb(0x66, 0xb2, 0xb2),
                Color::Rgb(0x99, 0xcc, 0xcc),
            ],
            scatter_color: Color::Rgb(0x00, 0x80, 0x80),
            scatter_marker: Marker::Dot,
            bar_width: 50,
            chart_height: 14,
            annotation: AnnotationFormat {
                decimals: 0,
                thousands: true,
                currency: true,
            },
        }
    }

    /// Preset by name, `set2` for anything unrecognised.
    pub fn from_name(name: &str) -> Self {
        match name {
            "teal" => Self::teal(),
            _ => Self::set2(),
        }
    }

    /// Colour of the `index`-th bar.
    pub fn bar_color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return self.scatter_color;
        }
        self.palette[index % self.palette.len()]
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self::set2()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(PresentationConfig::from_name("teal").name, "teal");
        assert_eq!(PresentationConfig::from_name("set2").name, "set2");
        assert_eq!(PresentationConfig::from_name("neon").name, "set2");
    }

    #[test]
    fn test_bar_color_cycles_palette() {
        let cfg = PresentationConfig::set2();
        assert_eq!(cfg.bar_color(0), Color::Rgb(0x66, 0xc2, 0xa5));
        assert_eq!(cfg.bar_color(8), cfg.bar_color(0));
        assert_eq!(cfg.bar_color(9), Color::Rgb(0xfc, 0x8d, 0x62));
    }

    #[test]
    fn test_bar_color_empty_palette_falls_back() {
        let cfg = PresentationConfig {
            palette: Vec::new(),
            ..PresentationConfig::teal()
        };
        assert_eq!(cfg.bar_color(3), cfg.scatter_color);
    }

    #[test]
    fn test_annotation_plain() {
        let fmt = PresentationConfig::set2().annotation;
        assert_eq!(fmt.format(12_345.6), "12346");
        assert_eq!(fmt.format(f64::NAN), "n/a");
    }

    #[test]
    fn test_annotation_currency() {
        let fmt = PresentationConfig::teal().annotation;
        assert_eq!(fmt.format(12_345.6), "$12,346");
    }

    #[test]
    fn test_annotation_grouped_with_decimals() {
        let fmt = AnnotationFormat {
            decimals: 2,
            thousands: true,
            currency: false,
        };
        assert_eq!(fmt.format(1_234.5), "1,234.50");
    }
}
