//! In-memory booking dataset and borrowed subsets of it.

use std::collections::HashSet;

use dash_core::models::BookingRecord;

/// Ordered, read-only collection of booking records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<BookingRecord>,
}

impl Dataset {
    pub fn new(records: Vec<BookingRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[BookingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// View over every record.
    pub fn all(&self) -> Subset<'_> {
        Subset::from_iter(self.records.iter())
    }

    /// Distinct market segments in first-seen order.
    pub fn segments(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.market_segment.as_str()))
    }

    /// Distinct customer tiers in first-seen order.
    pub fn tiers(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.customer_tier.as_str()))
    }

    pub fn total_revenue(&self) -> f64 {
        self.records.iter().map(|r| r.target_value).sum()
    }
}

/// Records selected from a [`Dataset`], in dataset order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subset<'a> {
    records: Vec<&'a BookingRecord>,
}

impl<'a> Subset<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a BookingRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn total_revenue(&self) -> f64 {
        self.iter().map(|r| r.target_value).sum()
    }

    /// Keep only the records matching `predicate`.
    pub fn retain(&self, predicate: impl Fn(&BookingRecord) -> bool) -> Subset<'a> {
        self.iter().filter(|r| predicate(r)).collect()
    }
}

impl<'a> FromIterator<&'a BookingRecord> for Subset<'a> {
    fn from_iter<I: IntoIterator<Item = &'a BookingRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use dash_core::models::BookingRecord;

    /// Record with neutral numeric fields; tests override what they need.
    pub fn record(segment: &str, tier: &str, channel: &str, revenue: f64) -> BookingRecord {
        BookingRecord {
            market_segment: segment.to_string(),
            customer_tier: tier.to_string(),
            channel: channel.to_string(),
            avg_daily_rate: 100.0,
            competitor_rate: 95.0,
            loyalty_points: 0,
            stay_nights: 1,
            target_value: revenue,
        }
    }
}
