//! Filter / aggregate / bin pipeline.
//!
//! Every function here is pure: it reads a [`Dataset`] or [`Subset`] and
//! returns a freshly derived table.  Nothing is cached between calls, so a new
//! selection always recomputes from scratch.
//!
//! Revenue tables are ordered by value, highest first.  Equal values fall back
//! to ascending key order so repeated runs produce identical tables.

use std::collections::BTreeMap;

use dash_core::models::{BookingRecord, LoyaltyBucket};
use serde::Serialize;

use crate::dataset::{Dataset, Subset};

// ── Derived tables ────────────────────────────────────────────────────────────

/// One categorical key with its revenue summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueRow {
    pub key: String,
    /// Sum or mean of `target_value`, depending on the producing operation.
    pub value: f64,
    /// Number of records behind `value`.
    pub records: usize,
}

/// Ordered mapping from a categorical key to a revenue figure.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RevenueTable {
    rows: Vec<RevenueRow>,
}

impl RevenueTable {
    /// Wrap rows as-is, keeping their order.
    pub fn from_rows(rows: Vec<RevenueRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[RevenueRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r.value)
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.rows.iter().find(|r| r.key == key).map(|r| r.value)
    }

    pub fn total(&self) -> f64 {
        self.values().sum()
    }

    /// Largest value, `None` for an empty table.
    pub fn max_value(&self) -> Option<f64> {
        self.values().reduce(f64::max)
    }

    /// First row, i.e. the top earner for value-sorted tables.
    pub fn top(&self) -> Option<&RevenueRow> {
        self.rows.first()
    }
}

/// Average revenue of the records falling into one loyalty bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoyaltyRevenue {
    pub bucket: LoyaltyBucket,
    pub average: f64,
    pub records: usize,
}

/// Numeric fields that can be placed on a scatter axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    AvgDailyRate,
    CompetitorRate,
    LoyaltyPoints,
    StayNights,
    Revenue,
}

impl Measure {
    pub fn of(self, record: &BookingRecord) -> f64 {
        match self {
            Measure::AvgDailyRate => record.avg_daily_rate,
            Measure::CompetitorRate => record.competitor_rate,
            Measure::LoyaltyPoints => record.loyalty_points as f64,
            Measure::StayNights => f64::from(record.stay_nights),
            Measure::Revenue => record.target_value,
        }
    }

    /// Axis label.
    pub fn label(self) -> &'static str {
        match self {
            Measure::AvgDailyRate => "Average Daily Rate",
            Measure::CompetitorRate => "Competitor Rate",
            Measure::LoyaltyPoints => "Loyalty Points",
            Measure::StayNights => "Nights Staying",
            Measure::Revenue => "Revenue",
        }
    }
}

// ── Filters ───────────────────────────────────────────────────────────────────

/// Records whose market segment equals `segment`.  An unknown segment yields
/// an empty subset.
pub fn filter_by_segment<'a>(dataset: &'a Dataset, segment: &str) -> Subset<'a> {
    dataset
        .records()
        .iter()
        .filter(|r| r.market_segment == segment)
        .collect()
}

/// Records of `subset` whose customer tier equals `tier`.
pub fn filter_by_tier<'a>(subset: &Subset<'a>, tier: &str) -> Subset<'a> {
    subset.retain(|r| r.customer_tier == tier)
}

// ── Aggregations ──────────────────────────────────────────────────────────────

/// Summed revenue per customer tier present in `subset`, highest first.
pub fn revenue_by_tier(subset: &Subset<'_>) -> RevenueTable {
    sum_descending(subset.iter(), |r| r.customer_tier.as_str())
}

/// Summed revenue per distribution channel, highest first.
///
/// Returns `None` for an empty subset: there is nothing to chart, which is a
/// different state from a table of zeros.
pub fn revenue_by_channel(subset: &Subset<'_>) -> Option<RevenueTable> {
    if subset.is_empty() {
        return None;
    }
    Some(sum_descending(subset.iter(), |r| r.channel.as_str()))
}

/// Summed revenue per market segment over the whole dataset, highest first.
pub fn revenue_by_segment(dataset: &Dataset) -> RevenueTable {
    sum_descending(dataset.records().iter(), |r| r.market_segment.as_str())
}

/// Bucket for a loyalty-point balance.  See [`LoyaltyBucket::from_points`].
pub fn loyalty_bucket(points: u64) -> LoyaltyBucket {
    LoyaltyBucket::from_points(points)
}

/// Mean revenue per loyalty bucket, lowest bucket first.  Buckets without any
/// record are omitted.
pub fn revenue_by_loyalty_bucket(dataset: &Dataset) -> Vec<LoyaltyRevenue> {
    group_revenue(dataset.records().iter(), |r| loyalty_bucket(r.loyalty_points))
        .into_iter()
        .map(|(bucket, stats)| LoyaltyRevenue {
            bucket,
            average: stats.mean(),
            records: stats.count,
        })
        .collect()
}

/// `(x, y)` points for every record in dataset order.
pub fn scatter_series(dataset: &Dataset, x: Measure, y: Measure) -> Vec<(f64, f64)> {
    dataset
        .records()
        .iter()
        .map(|r| (x.of(r), y.of(r)))
        .collect()
}

// ── Internals ─────────────────────────────────────────────────────────────────

/// Running revenue sum and record count for one group.
#[derive(Debug, Clone, Copy, Default)]
struct RevenueStats {
    sum: f64,
    count: usize,
}

impl RevenueStats {
    fn add(&mut self, record: &BookingRecord) {
        self.sum += record.target_value;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Group `records` by `key_fn`, returning groups in key order.
fn group_revenue<'a, K: Ord>(
    records: impl Iterator<Item = &'a BookingRecord>,
    key_fn: impl Fn(&'a BookingRecord) -> K,
) -> BTreeMap<K, RevenueStats> {
    let mut groups: BTreeMap<K, RevenueStats> = BTreeMap::new();
    for record in records {
        groups.entry(key_fn(record)).or_default().add(record);
    }
    groups
}

fn sum_descending<'a>(
    records: impl Iterator<Item = &'a BookingRecord>,
    key_fn: impl Fn(&'a BookingRecord) -> &'a str,
) -> RevenueTable {
    let mut rows: Vec<RevenueRow> = group_revenue(records, key_fn)
        .into_iter()
        .map(|(key, stats)| RevenueRow {
            key: key.to_string(),
            value: stats.sum,
            records: stats.count,
        })
        .collect();

    // Stable sort: rows arrive in key order, so ties stay key-ascending.
    rows.sort_by(|a, b| b.value.total_cmp(&a.value));
    RevenueTable { rows }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
