//! Paged dashboard view.
//!
//! Lays out the header, the two selectors, the page tabs and the charts of
//! the current page.  All numbers come from a [`DashboardSnapshot`]; this
//! module only decides where they go.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use dash_data::dashboard::{ChartData, ChartId, ChartSpec, DashboardSnapshot};

use crate::components::bar_chart::BarChart;
use crate::components::header::Header;
use crate::components::scatter::render_scatter;
use crate::components::selector::Selector;
use crate::presentation::PresentationConfig;
use crate::themes::Theme;

// ── Page / Focus ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Tier, channel and segment bars plus insights.
    Overview,
    /// The two rate scatters.
    Rates,
    /// Loyalty bucket averages and the nights scatter.
    LoyaltyStays,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Overview, Page::Rates, Page::LoyaltyStays];

    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Rates => "Rates",
            Page::LoyaltyStays => "Loyalty & Stays",
        }
    }

    fn index(self) -> usize {
        match self {
            Page::Overview => 0,
            Page::Rates => 1,
            Page::LoyaltyStays => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Page bound to a digit key, `'1'` being the first.
    pub fn from_digit(c: char) -> Option<Self> {
        let n = c.to_digit(10)? as usize;
        Self::ALL.get(n.checked_sub(1)?).copied()
    }
}

/// Which selector ←/→ act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Segment,
    Tier,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Segment => Focus::Tier,
            Focus::Tier => Focus::Segment,
        }
    }
}

// ── View data ─────────────────────────────────────────────────────────────────

/// Everything the view needs for one frame.
pub struct DashboardViewData<'a> {
    pub snapshot: &'a DashboardSnapshot,
    pub segments: &'a [String],
    pub tiers: &'a [String],
    pub page: Page,
    pub focus: Focus,
    pub theme_name: &'a str,
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render the whole dashboard into `area`.
pub fn render_dashboard(
    frame: &mut Frame,
    area: Rect,
    data: &DashboardViewData<'_>,
    config: &PresentationConfig,
    theme: &Theme,
) {
    let [header_area, controls_area, body_area, footer_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

    let header = Header::new(
        data.snapshot.metadata.records_total,
        config.name,
        data.theme_name,
        theme,
    );
    frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);
    frame.render_widget(Paragraph::new(controls(data, theme)), controls_area);

    match data.page {
        Page::Overview => render_overview(frame, body_area, data.snapshot, config, theme),
        Page::Rates => render_rates(frame, body_area, data.snapshot, config, theme),
        Page::LoyaltyStays => render_loyalty_stays(frame, body_area, data.snapshot, config, theme),
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "←/→ change value  ↑/↓/Tab switch selector  1-3 PgUp/PgDn page  q quit",
            theme.dim,
        ))),
        footer_area,
    );
}

/// Render a bar chart spec, or the no-data notice when it has none.
pub fn render_bar_panel(
    frame: &mut Frame,
    area: Rect,
    spec: &ChartSpec,
    config: &PresentationConfig,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(format!(" {} ", spec.title), theme.bold));

    let lines = match &spec.data {
        ChartData::Bars { table } if !table.is_empty() => {
            // Label column, gap, annotation and borders take roughly this much.
            let room = area.width.saturating_sub(34);
            let mut lines = vec![Line::from(Span::styled(spec.y_label.clone(), theme.dim))];
            lines.extend(BarChart::new(table, config, theme).fit_to(room).to_lines());
            lines.push(Line::from(Span::styled(spec.x_label.clone(), theme.dim)));
            lines
        }
        ChartData::NoData { message } => vec![
            Line::from(""),
            Line::from(Span::styled(message.clone(), theme.warning)),
        ],
        _ => vec![Line::from(Span::styled("Nothing to show.", theme.dim))],
    };

    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

fn controls<'a>(data: &'a DashboardViewData<'a>, theme: &'a Theme) -> Text<'a> {
    let selection = &data.snapshot.selection;
    let mut selectors = Selector::new(
        "Market Segment",
        data.segments,
        &selection.segment,
        data.focus == Focus::Segment,
        theme,
    )
    .to_spans();
    selectors.push(Span::raw("    "));
    selectors.extend(
        Selector::new(
            "Customer Tier",
            data.tiers,
            &selection.tier,
            data.focus == Focus::Tier,
            theme,
        )
        .to_spans(),
    );

    let mut tabs = Vec::new();
    for (i, page) in Page::ALL.iter().enumerate() {
        let style = if *page == data.page {
            theme.tab_active
        } else {
            theme.tab
        };
        tabs.push(Span::styled(format!("{} {}", i + 1, page.title()), style));
        tabs.push(Span::raw("   "));
    }

    Text::from(vec![Line::from(selectors), Line::from(tabs)])
}

fn render_overview(
    frame: &mut Frame,
    area: Rect,
    snapshot: &DashboardSnapshot,
    config: &PresentationConfig,
    theme: &Theme,
) {
    let [top, bottom] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .areas(area);
    let [tier_area, insights_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .areas(top);
    let [channel_area, segment_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .areas(bottom);

    for (id, panel) in [
        (ChartId::RevenueByTier, tier_area),
        (ChartId::RevenueByChannel, channel_area),
        (ChartId::RevenueBySegment, segment_area),
    ] {
        if let Some(spec) = snapshot.chart(id) {
            render_bar_panel(frame, panel, spec, config, theme);
        }
    }
    render_insights(frame, insights_area, snapshot, theme);
}

fn render_rates(
    frame: &mut Frame,
    area: Rect,
    snapshot: &DashboardSnapshot,
    config: &PresentationConfig,
    theme: &Theme,
) {
    let panels: [Rect; 2] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .areas(area);

    for (id, panel) in [ChartId::RateVsRevenue, ChartId::RateVsCompetitor]
        .into_iter()
        .zip(panels)
    {
        if let Some(spec) = snapshot.chart(id) {
            render_scatter_spec(frame, panel, spec, config, theme);
        }
    }
}

fn render_loyalty_stays(
    frame: &mut Frame,
    area: Rect,
    snapshot: &DashboardSnapshot,
    config: &PresentationConfig,
    theme: &Theme,
) {
    let [loyalty_area, nights_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(config.chart_height), Constraint::Min(0)])
        .areas(area);

    if let Some(spec) = snapshot.chart(ChartId::LoyaltyImpact) {
        render_bar_panel(frame, loyalty_area, spec, config, theme);
    }
    if let Some(spec) = snapshot.chart(ChartId::NightsVsRevenue) {
        render_scatter_spec(frame, nights_area, spec, config, theme);
    }
}

fn render_scatter_spec(
    frame: &mut Frame,
    area: Rect,
    spec: &ChartSpec,
    config: &PresentationConfig,
    theme: &Theme,
) {
    let points: &[(f64, f64)] = match &spec.data {
        ChartData::Scatter { points } => points,
        _ => &[],
    };
    render_scatter(
        frame,
        area,
        &spec.title,
        (&spec.x_label, &spec.y_label),
        points,
        config,
        theme,
    );
}

fn render_insights(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot, theme: &Theme) {
    let mut lines = Vec::with_capacity(snapshot.insights.len() * 2);
    for insight in &snapshot.insights {
        lines.push(Line::from(Span::styled(
            format!("• {}", insight.text),
            theme.insight_style(insight.level),
        )));
        lines.push(Line::from(""));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(" Insights ", theme.bold));
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
