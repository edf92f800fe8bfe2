//! Scatter plot panel backed by ratatui's [`Chart`] widget.

use dash_core::formatting::format_compact;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset as ChartDataset, GraphType, Paragraph},
    Frame,
};

use crate::presentation::PresentationConfig;
use crate::themes::Theme;

/// Render `points` as a bordered scatter chart titled `title`.
pub fn render_scatter(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    axes: (&str, &str),
    points: &[(f64, f64)],
    config: &PresentationConfig,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(format!(" {title} "), theme.bold));

    if points.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled("No points to plot.", theme.dim)))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let x_bounds = axis_bounds(points.iter().map(|p| p.0));
    let y_bounds = axis_bounds(points.iter().map(|p| p.1));

    let dataset = ChartDataset::default()
        .marker(config.scatter_marker)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(config.scatter_color))
        .data(points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled(axes.0.to_string(), theme.label))
                .style(theme.axis)
                .bounds(x_bounds)
                .labels(tick_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(axes.1.to_string(), theme.label))
                .style(theme.axis)
                .bounds(y_bounds)
                .labels(tick_labels(y_bounds)),
        );

    frame.render_widget(chart, area);
}

/// `[min, max]` of the finite values, padded by 5% on each side.  A single
/// distinct value gets a ±1 window so the axis never collapses.
pub fn axis_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() {
        return [0.0, 1.0];
    }
    if (max - min).abs() < f64::EPSILON {
        return [min - 1.0, max + 1.0];
    }
    let pad = (max - min) * 0.05;
    [min - pad, max + pad]
}

/// Low, middle and high tick labels.
fn tick_labels(bounds: [f64; 2]) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .into_iter()
        .map(format_compact)
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_axis_bounds_padded() {
        let [lo, hi] = axis_bounds([10.0, 110.0].into_iter());
        assert!((lo - 5.0).abs() < 1e-9);
        assert!((hi - 115.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis_bounds_single_value() {
        assert_eq!(axis_bounds([4.0, 4.0].into_iter()), [3.0, 5.0]);
    }

    #[test]
    fn test_axis_bounds_ignores_non_finite() {
        assert_eq!(axis_bounds(std::iter::empty()), [0.0, 1.0]);
        assert_eq!(axis_bounds([f64::NAN].into_iter()), [0.0, 1.0]);
        assert_eq!(axis_bounds([f64::NAN, 2.0].into_iter()), [1.0, 3.0]);
    }

    #[test]
    fn test_tick_labels_compact() {
        assert_eq!(tick_labels([0.0, 20_000.0]), vec!["0", "10k", "20k"]);
    }

    #[test]
    fn test_render_scatter_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let theme = Theme::dark();
        let cfg = PresentationConfig::set2();
        let points = vec![(100.0, 250.0), (140.0, 410.0), (90.0, 120.0)];
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_scatter(
                    frame,
                    area,
                    "Average Daily Rate vs Revenue",
                    ("Average Daily Rate", "Revenue"),
                    &points,
                    &cfg,
                    &theme,
                );
            })
            .unwrap();
    }

    #[test]
    fn test_render_scatter_empty_points() {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let theme = Theme::classic();
        let cfg = PresentationConfig::teal();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_scatter(frame, area, "Empty", ("x", "y"), &[], &cfg, &theme);
            })
            .unwrap();
        let rendered: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(rendered.contains("No points to plot."));
    }
}
