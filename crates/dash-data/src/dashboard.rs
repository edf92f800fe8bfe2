//! Dashboard build step.
//!
//! Turns a dataset and the current [`Selection`] into a [`DashboardSnapshot`]:
//! the ordered chart specifications, the insight notes shown beside them, and
//! metadata about the build.  The snapshot is plain data; renderers and the
//! JSON report consume it without touching the pipeline again.

use std::time::Instant;

use chrono::Utc;
use dash_core::formatting::format_currency;
use dash_core::models::Selection;
use serde::Serialize;

use crate::dataset::Dataset;
use crate::pipeline::{
    filter_by_segment, filter_by_tier, revenue_by_channel, revenue_by_loyalty_bucket,
    revenue_by_segment, revenue_by_tier, scatter_series, Measure, RevenueRow, RevenueTable,
};

/// Shown wherever the selected segment/tier pair matches no record.
pub const NO_DATA_MESSAGE: &str = "No data available for this combination.";

/// Segment that triggers the agency/corporate note.
const GROUP_SEGMENT: &str = "Group";

// ── Public types ──────────────────────────────────────────────────────────────

/// Stable identity of each chart, independent of its (selection-dependent)
/// title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartId {
    RateVsRevenue,
    RateVsCompetitor,
    RevenueByTier,
    RevenueByChannel,
    RevenueBySegment,
    LoyaltyImpact,
    NightsVsRevenue,
}

/// What a chart plots.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    Bars { table: RevenueTable },
    Scatter { points: Vec<(f64, f64)> },
    NoData { message: String },
}

impl ChartData {
    pub fn is_no_data(&self) -> bool {
        matches!(self, ChartData::NoData { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: ChartId,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub data: ChartData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightLevel {
    Info,
    Success,
    Warning,
}

/// Short note displayed next to the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub level: InsightLevel,
    pub text: String,
}

impl Insight {
    fn new(level: InsightLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Metadata produced alongside the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotMetadata {
    /// RFC 3339 timestamp of the build.
    pub generated_at: String,
    pub records_total: usize,
    pub records_in_segment: usize,
    pub records_in_selection: usize,
    /// Wall-clock seconds spent in [`build_dashboard`].
    pub build_time_seconds: f64,
}

/// Everything a renderer needs for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub selection: Selection,
    pub charts: Vec<ChartSpec>,
    pub insights: Vec<Insight>,
    pub metadata: SnapshotMetadata,
}

impl DashboardSnapshot {
    pub fn chart(&self, id: ChartId) -> Option<&ChartSpec> {
        self.charts.iter().find(|c| c.id == id)
    }

    /// `true` when the segment/tier pair matched no record.
    pub fn selection_is_empty(&self) -> bool {
        self.metadata.records_in_selection == 0
    }
}

// ── Build ─────────────────────────────────────────────────────────────────────

/// Compute every chart and insight for `selection` from scratch.
///
/// Unknown segment or tier values are not an error here; they simply produce
/// empty subsets and the matching no-data state.
pub fn build_dashboard(dataset: &Dataset, selection: &Selection) -> DashboardSnapshot {
    let started = Instant::now();

    let segment = filter_by_segment(dataset, &selection.segment);
    let segment_tier = filter_by_tier(&segment, &selection.tier);

    let tier_table = revenue_by_tier(&segment);
    let channel_data = match revenue_by_channel(&segment_tier) {
        Some(table) => ChartData::Bars { table },
        None => ChartData::NoData {
            message: NO_DATA_MESSAGE.to_string(),
        },
    };
    let loyalty_table = RevenueTable::from_rows(
        revenue_by_loyalty_bucket(dataset)
            .into_iter()
            .map(|row| RevenueRow {
                key: row.bucket.label().to_string(),
                value: row.average,
                records: row.records,
            })
            .collect(),
    );

    let insights = insights_for(selection, &tier_table, channel_data.is_no_data());

    let charts = vec![
        scatter(
            dataset,
            ChartId::RateVsRevenue,
            "Average Daily Rate vs Revenue",
            Measure::AvgDailyRate,
            Measure::Revenue,
            "Revenue (Target Value)",
        ),
        scatter(
            dataset,
            ChartId::RateVsCompetitor,
            "Average Daily Rate vs Competitor Rate",
            Measure::AvgDailyRate,
            Measure::CompetitorRate,
            Measure::CompetitorRate.label(),
        ),
        ChartSpec {
            id: ChartId::RevenueByTier,
            title: format!("Revenue by Customer Tier for {}", selection.segment),
            x_label: "Customer Tier".to_string(),
            y_label: "Total Revenue".to_string(),
            data: ChartData::Bars { table: tier_table },
        },
        ChartSpec {
            id: ChartId::RevenueByChannel,
            title: format!(
                "Revenue by Channel for {} in {}",
                selection.tier, selection.segment
            ),
            x_label: "Distribution Channel".to_string(),
            y_label: "Total Revenue".to_string(),
            data: channel_data,
        },
        ChartSpec {
            id: ChartId::RevenueBySegment,
            title: "Revenue by Market Segment".to_string(),
            x_label: "Market Segment".to_string(),
            y_label: "Total Revenue".to_string(),
            data: ChartData::Bars {
                table: revenue_by_segment(dataset),
            },
        },
        ChartSpec {
            id: ChartId::LoyaltyImpact,
            title: "Impact of Loyalty Points on Revenue".to_string(),
            x_label: "Loyalty Points Bin".to_string(),
            y_label: "Average Revenue".to_string(),
            data: ChartData::Bars {
                table: loyalty_table,
            },
        },
        scatter(
            dataset,
            ChartId::NightsVsRevenue,
            "Realized Revenue by Nights Staying",
            Measure::StayNights,
            Measure::Revenue,
            Measure::Revenue.label(),
        ),
    ];

    let metadata = SnapshotMetadata {
        generated_at: Utc::now().to_rfc3339(),
        records_total: dataset.len(),
        records_in_segment: segment.len(),
        records_in_selection: segment_tier.len(),
        build_time_seconds: started.elapsed().as_secs_f64(),
    };

    DashboardSnapshot {
        selection: selection.clone(),
        charts,
        insights,
        metadata,
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn scatter(
    dataset: &Dataset,
    id: ChartId,
    title: &str,
    x: Measure,
    y: Measure,
    y_label: &str,
) -> ChartSpec {
    ChartSpec {
        id,
        title: title.to_string(),
        x_label: x.label().to_string(),
        y_label: y_label.to_string(),
        data: ChartData::Scatter {
            points: scatter_series(dataset, x, y),
        },
    }
}

fn insights_for(
    selection: &Selection,
    tier_table: &RevenueTable,
    channel_missing: bool,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    match tier_table.top() {
        Some(top) => insights.push(Insight::new(
            InsightLevel::Info,
            format!(
                "{} is the top tier for revenue in {} ({}). Target loyalty programs \
                 and promotions at the tiers that generate less revenue.",
                top.key,
                selection.segment,
                format_currency(top.value, 0)
            ),
        )),
        None => insights.push(Insight::new(
            InsightLevel::Warning,
            format!("No bookings recorded for segment {}.", selection.segment),
        )),
    }

    if channel_missing {
        insights.push(Insight::new(InsightLevel::Warning, NO_DATA_MESSAGE));
    }

    if selection.segment == GROUP_SEGMENT {
        insights.push(Insight::new(
            InsightLevel::Info,
            "Group bookings often channel through agencies or corporate partners. \
             Consider negotiating bulk deals for higher revenue.",
        ));
    }

    insights.push(Insight::new(
        InsightLevel::Success,
        "No major significant impact of loyalty points on average revenue.",
    ));
    insights.push(Insight::new(
        InsightLevel::Info,
        "Longer stays generally lead to higher revenue, though there can be variability. \
         Promotions for extended stays might increase total booking value.",
    ));
    insights.push(Insight::new(
        InsightLevel::Success,
        "Use the selectors to explore other market segments and tiers.",
    ));

    insights
}

// ── Tests ─────────────────────────────────────────────────────────────────────
