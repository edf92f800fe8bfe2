//! CSV loading for the processed booking dataset.
//!
//! The file is read once at startup.  The header row is mapped by column name,
//! so column order is free and extra columns are ignored.  Every required
//! field must parse into its typed form; the first failure aborts the load.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use dash_core::error::{DashError, Result};
use dash_core::models::BookingRecord;
use tracing::{debug, info};

use crate::dataset::Dataset;

/// Columns the loader requires, in [`BookingRecord`] field order.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "market_segment",
    "customer_tier",
    "channel",
    "avg_daily_rate",
    "competitor_rate",
    "loyalty_points",
    "stay_nights",
    "target_value",
];

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the dataset at `path`.
///
/// Fails when the file cannot be read, a required column is missing, a row is
/// malformed, or the file holds no records.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let started = Instant::now();
    let file = File::open(path).map_err(|source| DashError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_records(BufReader::new(file)).map_err(|e| match e {
        DashError::Io(source) => DashError::FileRead {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    if records.is_empty() {
        return Err(DashError::EmptyDataset(path.display().to_string()));
    }

    info!(
        records = records.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "loaded booking dataset from {}",
        path.display()
    );

    Ok(Dataset::new(records))
}

/// Parse booking records from CSV text with a header row.
///
/// Blank lines are skipped.  A quoted field may span several physical lines.
/// Line numbers in errors are 1-based, count the header, and point at the
/// first line of the offending row.
pub fn read_records(reader: impl BufRead) -> Result<Vec<BookingRecord>> {
    let mut lines = reader.lines().enumerate();

    let columns = loop {
        match next_row(&mut lines)? {
            Some((_, row)) => {
                let trimmed = row.trim_start_matches('\u{feff}').trim();
                if trimmed.is_empty() {
                    continue;
                }
                break ColumnIndex::from_header(trimmed)?;
            }
            None => return Ok(Vec::new()),
        }
    };

    let mut records = Vec::new();
    let mut blank = 0usize;
    while let Some((line_no, row)) = next_row(&mut lines)? {
        if row.trim().is_empty() {
            blank += 1;
            continue;
        }
        let fields = split_fields(&row);
        records.push(columns.parse_row(&fields, line_no)?);
    }

    debug!(rows = records.len(), blank_lines = blank, "parsed CSV body");
    Ok(records)
}

// ── Column mapping ────────────────────────────────────────────────────────────

/// Position of each required column within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex {
    positions: [usize; REQUIRED_COLUMNS.len()],
}

impl ColumnIndex {
    fn from_header(header: &str) -> Result<Self> {
        let names: Vec<String> = split_fields(header)
            .into_iter()
            .map(|n| n.trim().to_string())
            .collect();

        let mut positions = [0usize; REQUIRED_COLUMNS.len()];
        for (slot, required) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = names
                .iter()
                .position(|n| n == required)
                .ok_or_else(|| DashError::MissingColumn(required.to_string()))?;
        }
        Ok(Self { positions })
    }

    fn parse_row(&self, fields: &[String], line: usize) -> Result<BookingRecord> {
        Ok(BookingRecord {
            market_segment: self.field(fields, 0, line)?.to_string(),
            customer_tier: self.field(fields, 1, line)?.to_string(),
            channel: self.field(fields, 2, line)?.to_string(),
            avg_daily_rate: self.float(fields, 3, line)?,
            competitor_rate: self.float(fields, 4, line)?,
            loyalty_points: self.count(fields, 5, line)?,
            stay_nights: {
                let nights = self.count(fields, 6, line)?;
                u32::try_from(nights).map_err(|_| malformed(6, &nights.to_string(), line))?
            },
            target_value: self.float(fields, 7, line)?,
        })
    }

    fn field<'f>(&self, fields: &'f [String], col: usize, line: usize) -> Result<&'f str> {
        fields
            .get(self.positions[col])
            .map(|f| f.trim())
            .ok_or_else(|| malformed(col, "", line))
    }

    fn float(&self, fields: &[String], col: usize, line: usize) -> Result<f64> {
        let raw = self.field(fields, col, line)?;
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| malformed(col, raw, line))
    }

    fn count(&self, fields: &[String], col: usize, line: usize) -> Result<u64> {
        let raw = self.field(fields, col, line)?;
        parse_count(raw).ok_or_else(|| malformed(col, raw, line))
    }
}

fn malformed(col: usize, value: &str, line: usize) -> DashError {
    DashError::MalformedRow {
        line,
        column: REQUIRED_COLUMNS[col].to_string(),
        value: value.to_string(),
    }
}

// ── Field helpers ─────────────────────────────────────────────────────────────

/// Parse a non-negative integer, accepting integral floats such as `"1500.0"`.
fn parse_count(raw: &str) -> Option<u64> {
    if let Ok(v) = raw.parse::<u64>() {
        return Some(v);
    }
    let v = raw.parse::<f64>().ok()?;
    (v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64).then_some(v as u64)
}

/// Next logical CSV row and the 1-based number of its first physical line.
///
/// Physical lines are joined with `\n` while a quoted field is still open.
/// Trailing `\r` is stripped from every physical line.
fn next_row(
    lines: &mut impl Iterator<Item = (usize, std::io::Result<String>)>,
) -> Result<Option<(usize, String)>> {
    let Some((idx, first)) = lines.next() else {
        return Ok(None);
    };
    let mut row = first?.trim_end_matches('\r').to_string();

    while has_open_quote(&row) {
        match lines.next() {
            Some((_, line)) => {
                row.push('\n');
                row.push_str(line?.trim_end_matches('\r'));
            }
            // An unterminated quote runs to end of input.
            None => break,
        }
    }
    Ok(Some((idx + 1, row)))
}

/// `true` when `row` ends inside a double-quoted field.  `""` escapes toggle
/// twice and cancel out.
fn has_open_quote(row: &str) -> bool {
    row.chars().filter(|&c| c == '"').count() % 2 == 1
}

/// Split one CSV row on commas, honouring double-quoted fields and `""`
/// escapes inside them.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            ('"', _) => in_quotes = !in_quotes,
            (',', false) => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const HEADER: &str = "market_segment,customer_tier,channel,avg_daily_rate,\
                          competitor_rate,loyalty_points,stay_nights,target_value";

    fn parse(text: &str) -> Result<Vec<BookingRecord>> {
        read_records(Cursor::new(text.to_string()))
    }

    // ── read_records ──────────────────────────────────────────────────────────

    #[test]
    fn test_read_records_basic() {
        let csv = format!("{HEADER}\nLeisure,Gold,Online,120.5,110.0,1500,3,361.5\n");
        let records = parse(&csv).unwrap();

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.market_segment, "Leisure");
        assert_eq!(r.customer_tier, "Gold");
        assert_eq!(r.channel, "Online");
        assert_eq!(r.avg_daily_rate, 120.5);
        assert_eq!(r.competitor_rate, 110.0);
        assert_eq!(r.loyalty_points, 1500);
        assert_eq!(r.stay_nights, 3);
        assert_eq!(r.target_value, 361.5);
    }

    #[test]
    fn test_read_records_column_order_is_free_and_extras_ignored() {
        let csv = "booking_id,target_value,stay_nights,loyalty_points,competitor_rate,\
                   avg_daily_rate,channel,customer_tier,market_segment\n\
                   17,90,2,0,40,45,Direct,Bronze,Corporate\n";
        let records = parse(csv).unwrap();

        assert_eq!(records[0].market_segment, "Corporate");
        assert_eq!(records[0].customer_tier, "Bronze");
        assert_eq!(records[0].target_value, 90.0);
        assert_eq!(records[0].avg_daily_rate, 45.0);
    }

    #[test]
    fn test_read_records_skips_blank_lines_and_crlf() {
        let csv = format!(
            "{HEADER}\r\n\r\nLeisure,Gold,Online,1,1,0,1,10\r\n\nGroup,Silver,Agency,2,2,0,2,20\r\n"
        );
        let records = parse(&csv).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].target_value, 20.0);
    }

    #[test]
    fn test_read_records_quoted_fields() {
        let csv = format!("{HEADER}\n\"Leisure, Family\",Gold,\"Online \"\"OTA\"\"\",1,1,0,1,10\n");
        let records = parse(&csv).unwrap();
        assert_eq!(records[0].market_segment, "Leisure, Family");
        assert_eq!(records[0].channel, "Online \"OTA\"");
    }

    #[test]
    fn test_read_records_quoted_field_spans_lines() {
        let csv = format!(
            "{HEADER}\n\"Leisure\nFamily\",Gold,Online,1,1,0,1,10\r\n\
             Group,Silver,Agency,2,2,0,2,20\n"
        );
        let records = parse(&csv).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].market_segment, "Leisure\nFamily");
        assert_eq!(records[0].customer_tier, "Gold");
        assert_eq!(records[1].market_segment, "Group");
    }

    #[test]
    fn test_read_records_multiline_row_reports_first_line() {
        let csv = format!(
            "{HEADER}\nLeisure,Gold,Online,1,1,0,1,10\n\"Group\nTour\",Gold,Online,1,1,0,1,oops\n"
        );
        match parse(&csv) {
            Err(DashError::MalformedRow { line, column, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(column, "target_value");
            }
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn test_read_records_accepts_integral_float_counts() {
        let csv = format!("{HEADER}\nLeisure,Gold,Online,1,1,2500.0,4.0,10\n");
        let records = parse(&csv).unwrap();
        assert_eq!(records[0].loyalty_points, 2500);
        assert_eq!(records[0].stay_nights, 4);
    }

    #[test]
    fn test_read_records_header_only_is_empty() {
        assert!(parse(&format!("{HEADER}\n")).unwrap().is_empty());
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_read_records_missing_column() {
        let csv = "market_segment,customer_tier,channel\nLeisure,Gold,Online\n";
        match parse(csv) {
            Err(DashError::MissingColumn(col)) => assert_eq!(col, "avg_daily_rate"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_read_records_negative_loyalty_is_malformed() {
        let csv = format!(
            "{HEADER}\nLeisure,Gold,Online,1,1,0,1,10\nLeisure,Gold,Online,1,1,-5,1,10\n"
        );
        match parse(&csv) {
            Err(DashError::MalformedRow {
                line,
                column,
                value,
            }) => {
                assert_eq!(line, 3);
                assert_eq!(column, "loyalty_points");
                assert_eq!(value, "-5");
            }
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn test_read_records_non_numeric_revenue_is_malformed() {
        let csv = format!("{HEADER}\nLeisure,Gold,Online,1,1,0,1,lots\n");
        assert!(matches!(
            parse(&csv),
            Err(DashError::MalformedRow { ref column, .. }) if column == "target_value"
        ));
    }

    #[test]
    fn test_read_records_short_row_is_malformed() {
        let csv = format!("{HEADER}\nLeisure,Gold,Online\n");
        assert!(matches!(parse(&csv), Err(DashError::MalformedRow { line: 2, .. })));
    }

    // ── load_dataset ──────────────────────────────────────────────────────────

    #[test]
    fn test_load_dataset_from_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "{HEADER}").unwrap();
        writeln!(tmp, "Leisure,Gold,Online,100,90,0,2,200").unwrap();
        writeln!(tmp, "Group,Bronze,Agency,80,85,12000,5,400").unwrap();

        let dataset = load_dataset(tmp.path()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.segments(), vec!["Leisure", "Group"]);
    }

    #[test]
    fn test_load_dataset_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("nope.csv");
        match load_dataset(&missing) {
            Err(DashError::FileRead { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected FileRead, got {other:?}"),
        }
    }

    #[test]
    fn test_load_dataset_header_only_is_empty_error() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "{HEADER}").unwrap();
        assert!(matches!(
            load_dataset(tmp.path()),
            Err(DashError::EmptyDataset(_))
        ));
    }

    // ── helpers ───────────────────────────────────────────────────────────────

    #[test]
    fn test_split_fields_trailing_empty() {
        assert_eq!(split_fields("a,,b,"), vec!["a", "", "b", ""]);
    }

    #[test]
    fn test_has_open_quote() {
        assert!(!has_open_quote("a,b"));
        assert!(has_open_quote("\"a,b"));
        assert!(!has_open_quote("\"a \"\"x\"\" b\",c"));
    }

    #[test]
    fn test_parse_count_rejects_fractions_and_negatives() {
        assert_eq!(parse_count("12"), Some(12));
        assert_eq!(parse_count("12.0"), Some(12));
        assert_eq!(parse_count("12.5"), None);
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count("abc"), None);
    }
}
