use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the booking dashboard.
#[derive(Error, Debug)]
pub enum DashError {
    /// The dataset file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required column is absent from the CSV header.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A data row could not be converted into a booking record.
    #[error("Malformed row at line {line}: column {column} has invalid value {value:?}")]
    MalformedRow {
        line: usize,
        column: String,
        value: String,
    },

    /// The dataset holds no records, so no selection can be formed.
    #[error("Dataset is empty: {0}")]
    EmptyDataset(String),

    /// A selector value that does not occur in the dataset.
    #[error("Unknown {field}: {value}")]
    UnknownSelection { field: &'static str, value: String },

    /// The last-used config could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = DashError::FileRead {
            path: PathBuf::from("/data/bookings.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/data/bookings.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = DashError::MissingColumn("target_value".to_string());
        assert_eq!(err.to_string(), "Missing column: target_value");
    }

    #[test]
    fn test_error_display_malformed_row() {
        let err = DashError::MalformedRow {
            line: 7,
            column: "loyalty_points".to_string(),
            value: "-12".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed row at line 7: column loyalty_points has invalid value \"-12\""
        );
    }

    #[test]
    fn test_error_display_empty_dataset() {
        let err = DashError::EmptyDataset("/empty.csv".to_string());
        assert_eq!(err.to_string(), "Dataset is empty: /empty.csv");
    }

    #[test]
    fn test_error_display_unknown_selection() {
        let err = DashError::UnknownSelection {
            field: "market segment",
            value: "Group".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown market segment: Group");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DashError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: DashError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }
}
