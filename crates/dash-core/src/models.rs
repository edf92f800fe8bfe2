use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound (exclusive) of the last regular loyalty bucket.
pub const LOYALTY_OVERFLOW_THRESHOLD: u64 = 50_000;

/// A single booking row read from the processed dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Acquisition segment, e.g. `"Leisure"` or `"Group"`.
    pub market_segment: String,
    /// Loyalty/status classification, e.g. `"Bronze"` or `"Gold"`.
    pub customer_tier: String,
    /// Booking source, e.g. `"Direct"`, `"Agency"`, `"Online"`.
    pub channel: String,
    /// Average daily rate charged for the stay.
    pub avg_daily_rate: f64,
    /// Rate offered by the competitor set for the same stay.
    pub competitor_rate: f64,
    /// Loyalty points held by the customer at booking time.
    pub loyalty_points: u64,
    /// Length of the stay in nights.
    pub stay_nights: u32,
    /// Realized revenue attributed to the booking.
    pub target_value: f64,
}

/// Fixed loyalty-point ranges used to compare average revenue.
///
/// Regular buckets are closed-open: `[0, 1000)`, `[1000, 5000)`,
/// `[5000, 10000)`, `[10000, 20000)`, `[20000, 50000)`.  Anything at or above
/// [`LOYALTY_OVERFLOW_THRESHOLD`] lands in [`LoyaltyBucket::Overflow`].
///
/// Variant order follows the ranges, so the derived `Ord` sorts buckets from
/// lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoyaltyBucket {
    #[serde(rename = "0-1k")]
    UpTo1k,
    #[serde(rename = "1k-5k")]
    From1kTo5k,
    #[serde(rename = "5k-10k")]
    From5kTo10k,
    #[serde(rename = "10k-20k")]
    From10kTo20k,
    #[serde(rename = "20k-50k")]
    From20kTo50k,
    #[serde(rename = "50k+")]
    Overflow,
}

impl LoyaltyBucket {
    /// Every bucket in ascending range order.
    pub const ALL: [LoyaltyBucket; 6] = [
        LoyaltyBucket::UpTo1k,
        LoyaltyBucket::From1kTo5k,
        LoyaltyBucket::From5kTo10k,
        LoyaltyBucket::From10kTo20k,
        LoyaltyBucket::From20kTo50k,
        LoyaltyBucket::Overflow,
    ];

    /// Assign `points` to its bucket.
    pub fn from_points(points: u64) -> Self {
        match points {
            0..=999 => LoyaltyBucket::UpTo1k,
            1_000..=4_999 => LoyaltyBucket::From1kTo5k,
            5_000..=9_999 => LoyaltyBucket::From5kTo10k,
            10_000..=19_999 => LoyaltyBucket::From10kTo20k,
            20_000..=49_999 => LoyaltyBucket::From20kTo50k,
            _ => LoyaltyBucket::Overflow,
        }
    }

    /// Display label, e.g. `"1k-5k"`.
    pub fn label(self) -> &'static str {
        match self {
            LoyaltyBucket::UpTo1k => "0-1k",
            LoyaltyBucket::From1kTo5k => "1k-5k",
            LoyaltyBucket::From5kTo10k => "5k-10k",
            LoyaltyBucket::From10kTo20k => "10k-20k",
            LoyaltyBucket::From20kTo50k => "20k-50k",
            LoyaltyBucket::Overflow => "50k+",
        }
    }

    /// Inclusive lower bound of the range.
    pub fn lower_bound(self) -> u64 {
        match self {
            LoyaltyBucket::UpTo1k => 0,
            LoyaltyBucket::From1kTo5k => 1_000,
            LoyaltyBucket::From5kTo10k => 5_000,
            LoyaltyBucket::From10kTo20k => 10_000,
            LoyaltyBucket::From20kTo50k => 20_000,
            LoyaltyBucket::Overflow => LOYALTY_OVERFLOW_THRESHOLD,
        }
    }

    /// Exclusive upper bound of the range, `None` for the overflow bucket.
    pub fn upper_bound(self) -> Option<u64> {
        match self {
            LoyaltyBucket::Overflow => None,
            other => {
                let idx = Self::ALL.iter().position(|b| *b == other)?;
                Some(Self::ALL[idx + 1].lower_bound())
            }
        }
    }
}

impl fmt::Display for LoyaltyBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The viewer's current filter pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub segment: String,
    pub tier: String,
}

impl Selection {
    pub fn new(segment: impl Into<String>, tier: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
            tier: tier.into(),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.segment, self.tier)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
