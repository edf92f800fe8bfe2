//! Selection state and recomputation.
//!
//! A [`DashboardSession`] is created from a [`DatasetHandle`] that the hosting
//! process loaded once.  Every accepted selection change rebuilds the
//! [`DashboardSnapshot`] synchronously from the full dataset; rejected changes
//! leave the session exactly as it was.

use std::path::Path;
use std::sync::Arc;

use dash_core::error::{DashError, Result};
use dash_core::models::Selection;
use dash_data::dashboard::{build_dashboard, DashboardSnapshot};
use dash_data::dataset::Dataset;
use dash_data::reader::load_dataset;

/// Shared read-only dataset.  Dropping the last handle releases the records.
pub type DatasetHandle = Arc<Dataset>;

/// Load the CSV at `path` into a shareable handle.
pub fn open_dataset(path: &Path) -> Result<DatasetHandle> {
    load_dataset(path).map(Arc::new)
}

// ── DashboardSession ──────────────────────────────────────────────────────────

/// Current selection plus the snapshot derived from it.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use dash_runtime::session::{open_dataset, DashboardSession};
///
/// let handle = open_dataset(Path::new("processedstreamlit_data.csv"))?;
/// let mut session = DashboardSession::new(handle, None, None)?;
/// session.next_tier();
/// println!("{} charts", session.snapshot().charts.len());
/// # Ok::<(), dash_runtime::core::error::DashError>(())
/// ```
#[derive(Debug)]
pub struct DashboardSession {
    dataset: DatasetHandle,
    segments: Vec<String>,
    tiers: Vec<String>,
    selection: Selection,
    snapshot: DashboardSnapshot,
    /// Number of snapshots built so far, including the initial one.
    rebuilds: u64,
}

impl DashboardSession {
    /// Create a session over `dataset`.
    ///
    /// `segment` and `tier` default to the first value observed in the
    /// dataset.  An explicit value must occur in the dataset.
    pub fn new(dataset: DatasetHandle, segment: Option<&str>, tier: Option<&str>) -> Result<Self> {
        let segments = dataset.segments();
        let tiers = dataset.tiers();

        let (Some(first_segment), Some(first_tier)) = (segments.first(), tiers.first()) else {
            return Err(DashError::EmptyDataset(
                "no market segments or customer tiers to select".to_string(),
            ));
        };

        let segment = match segment {
            Some(value) => validated("segment", &segments, value)?,
            None => first_segment.clone(),
        };
        let tier = match tier {
            Some(value) => validated("tier", &tiers, value)?,
            None => first_tier.clone(),
        };

        let selection = Selection::new(segment, tier);
        let snapshot = build_dashboard(&dataset, &selection);
        tracing::info!(
            records = dataset.len(),
            segments = segments.len(),
            tiers = tiers.len(),
            selection = %selection,
            "dashboard session started"
        );

        Ok(Self {
            dataset,
            segments,
            tiers,
            selection,
            snapshot,
            rebuilds: 1,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn dataset(&self) -> &DatasetHandle {
        &self.dataset
    }

    /// Distinct segments in first-seen order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Distinct tiers in first-seen order.
    pub fn tiers(&self) -> &[String] {
        &self.tiers
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    // ── Selection changes ─────────────────────────────────────────────────

    /// Switch to `segment`, rejecting values absent from the dataset.
    pub fn select_segment(&mut self, segment: &str) -> Result<()> {
        let segment = validated("segment", &self.segments, segment).inspect_err(|e| {
            tracing::warn!(error = %e, "segment change rejected");
        })?;
        self.apply(Selection::new(segment, self.selection.tier.clone()));
        Ok(())
    }

    /// Switch to `tier`, rejecting values absent from the dataset.
    pub fn select_tier(&mut self, tier: &str) -> Result<()> {
        let tier = validated("tier", &self.tiers, tier).inspect_err(|e| {
            tracing::warn!(error = %e, "tier change rejected");
        })?;
        self.apply(Selection::new(self.selection.segment.clone(), tier));
        Ok(())
    }

    pub fn next_segment(&mut self) {
        let segment = cycle(&self.segments, &self.selection.segment, 1);
        self.apply(Selection::new(segment, self.selection.tier.clone()));
    }

    pub fn prev_segment(&mut self) {
        let segment = cycle(&self.segments, &self.selection.segment, -1);
        self.apply(Selection::new(segment, self.selection.tier.clone()));
    }

    pub fn next_tier(&mut self) {
        let tier = cycle(&self.tiers, &self.selection.tier, 1);
        self.apply(Selection::new(self.selection.segment.clone(), tier));
    }

    pub fn prev_tier(&mut self) {
        let tier = cycle(&self.tiers, &self.selection.tier, -1);
        self.apply(Selection::new(self.selection.segment.clone(), tier));
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn apply(&mut self, selection: Selection) {
        self.snapshot = build_dashboard(&self.dataset, &selection);
        self.selection = selection;
        self.rebuilds += 1;
        tracing::debug!(
            segment = %self.selection.segment,
            tier = %self.selection.tier,
            records_in_selection = self.snapshot.metadata.records_in_selection,
            build_time_seconds = self.snapshot.metadata.build_time_seconds,
            "dashboard recomputed"
        );
    }
}

/// `value` as an owned string if it is one of `options`.
fn validated(field: &'static str, options: &[String], value: &str) -> Result<String> {
    if options.iter().any(|o| o == value) {
        Ok(value.to_string())
    } else {
        Err(DashError::UnknownSelection {
            field,
            value: value.to_string(),
        })
    }
}

/// Neighbour of `current` in `options`, wrapping at both ends.
fn cycle(options: &[String], current: &str, step: isize) -> String {
    let len = options.len() as isize;
    let idx = options.iter().position(|o| o == current).unwrap_or(0) as isize;
    let next = (idx + step).rem_euclid(len.max(1)) as usize;
    options
        .get(next)
        .cloned()
        .unwrap_or_else(|| current.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dash_data::dashboard::ChartId;
    use dash_data::dataset::test_support::record;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn handle() -> DatasetHandle {
        Arc::new(Dataset::new(vec![
            record("Leisure", "Gold", "Online", 100.0),
            record("Corporate", "Silver", "Direct", 80.0),
            record("Leisure", "Silver", "Agency", 60.0),
            record("Group", "Bronze", "Agency", 300.0),
        ]))
    }

    #[test]
    fn test_new_defaults_to_first_observed_values() {
        let session = DashboardSession::new(handle(), None, None).unwrap();
        assert_eq!(session.selection(), &Selection::new("Leisure", "Gold"));
        assert_eq!(session.segments(), ["Leisure", "Corporate", "Group"]);
        assert_eq!(session.tiers(), ["Gold", "Silver", "Bronze"]);
        assert_eq!(session.snapshot().selection, *session.selection());
        assert_eq!(session.rebuilds(), 1);
    }

    #[test]
    fn test_new_with_explicit_pair() {
        let session = DashboardSession::new(handle(), Some("Group"), Some("Bronze")).unwrap();
        assert_eq!(session.selection(), &Selection::new("Group", "Bronze"));
        assert_eq!(session.snapshot().metadata.records_in_selection, 1);
    }

    #[test]
    fn test_new_rejects_unknown_initial_value() {
        let err = DashboardSession::new(handle(), Some("Wholesale"), None).unwrap_err();
        assert!(matches!(
            err,
            DashError::UnknownSelection { field: "segment", ref value } if value == "Wholesale"
        ));
    }

    #[test]
    fn test_new_rejects_empty_dataset() {
        let err = DashboardSession::new(Arc::new(Dataset::default()), None, None).unwrap_err();
        assert!(matches!(err, DashError::EmptyDataset(_)));
    }

    #[test]
    fn test_select_segment_recomputes() {
        let mut session = DashboardSession::new(handle(), None, None).unwrap();
        session.select_segment("Corporate").unwrap();

        assert_eq!(session.selection().segment, "Corporate");
        assert_eq!(session.rebuilds(), 2);
        let tier_chart = session.snapshot().chart(ChartId::RevenueByTier).unwrap();
        assert_eq!(tier_chart.title, "Revenue by Customer Tier for Corporate");
        // Corporate has no Gold bookings.
        assert!(session.snapshot().selection_is_empty());
    }

    #[test]
    fn test_rejected_selection_leaves_state_unchanged() {
        let mut session = DashboardSession::new(handle(), None, None).unwrap();
        let before = session.snapshot().clone();

        assert!(session.select_segment("leisure").is_err());
        let err = session.select_tier("Platinum").unwrap_err();
        assert_eq!(err.to_string(), "Unknown tier: Platinum");

        assert_eq!(session.selection(), &Selection::new("Leisure", "Gold"));
        assert_eq!(session.snapshot(), &before);
        assert_eq!(session.rebuilds(), 1);
    }

    #[test]
    fn test_segment_cycling_wraps() {
        let mut session = DashboardSession::new(handle(), None, None).unwrap();
        session.prev_segment();
        assert_eq!(session.selection().segment, "Group");
        session.next_segment();
        assert_eq!(session.selection().segment, "Leisure");
        session.next_segment();
        assert_eq!(session.selection().segment, "Corporate");
    }

    #[test]
    fn test_tier_cycling_wraps() {
        let mut session = DashboardSession::new(handle(), None, Some("Bronze")).unwrap();
        session.next_tier();
        assert_eq!(session.selection().tier, "Gold");
        session.prev_tier();
        assert_eq!(session.selection().tier, "Bronze");
        assert_eq!(session.selection().segment, "Leisure");
    }

    #[test]
    fn test_cycle_single_option_stays_put() {
        let options = vec!["Only".to_string()];
        assert_eq!(cycle(&options, "Only", 1), "Only");
        assert_eq!(cycle(&options, "Only", -1), "Only");
    }

    #[test]
    fn test_open_dataset_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "market_segment,customer_tier,channel,avg_daily_rate,\
             competitor_rate,loyalty_points,stay_nights,target_value"
        )
        .unwrap();
        writeln!(file, "Leisure,Gold,Online,150.0,140.0,1200,2,300.0").unwrap();

        let handle = open_dataset(file.path()).unwrap();
        assert_eq!(handle.len(), 1);

        let session = DashboardSession::new(Arc::clone(&handle), None, None).unwrap();
        assert!(Arc::ptr_eq(session.dataset(), &handle));
    }

    #[test]
    fn test_open_dataset_missing_file() {
        let err = open_dataset(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DashError::FileRead { .. }));
    }
}
