use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "processedstreamlit_data.csv";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive hotel booking revenue dashboard
#[derive(Parser, Debug, Clone)]
#[command(
    name = "booking-dash",
    about = "Interactive hotel booking revenue dashboard",
    version
)]
pub struct Settings {
    /// Path to the processed booking CSV
    #[arg(long, env = "BOOKING_DASH_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// View mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "report"])]
    pub view: String,

    /// Initial market segment (first segment in the dataset if omitted)
    #[arg(long)]
    pub segment: Option<String>,

    /// Initial customer tier (first tier in the dataset if omitted)
    #[arg(long)]
    pub tier: Option<String>,

    /// Chart presentation style
    #[arg(long, default_value = "set2", value_parser = ["set2", "teal"])]
    pub style: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(
        long,
        default_value = "INFO",
        value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"]
    )]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Presentation preferences saved to `~/.booking-dash/last_used.json`.
///
/// The segment/tier selection is deliberately absent: it is never persisted.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl LastUsedParams {
    /// Default path of the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Config path rooted at `base_dir`.
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".booking-dash").join("last_used.json")
    }

    /// Load persisted params from `path`; `Default` when absent or unparsable.
    pub fn load_from(path: &Path) -> Self {
        Self::try_load_from(path).unwrap_or_else(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "ignoring unreadable last-used config"
            );
            Self::default()
        })
    }

    /// Strict variant of [`LastUsedParams::load_from`].  A missing file is
    /// `Default`; unreadable or invalid content is an error.
    pub fn try_load_from(path: &Path) -> error::Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Write params to `path` via a temp file + rename, creating parents.
    pub fn save_to(&self, path: &Path) -> error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at `path` if it exists.
    pub fn clear_at(path: &Path) -> error::Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments, fill unset presentation options from the
    /// last-used file, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] with explicit arguments and
    /// config location.
    pub fn load_with_last_used_impl(args: Vec<std::ffi::OsString>, config_path: &Path) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!(error = %e, "failed to clear last-used config");
            }
            return settings.apply_debug_flag();
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI and environment always win over the persisted value.
        if !is_arg_user_supplied(&matches, "data") {
            if let Some(v) = last.data {
                settings.data = v;
            }
        }
        if !is_arg_user_supplied(&matches, "style") {
            if let Some(v) = last.style {
                settings.style = v;
            }
        }
        if !is_arg_user_supplied(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }

        if let Err(e) = LastUsedParams::from(&settings).save_to(config_path) {
            tracing::warn!(error = %e, "failed to persist last-used config");
        }

        settings.apply_debug_flag()
    }

    /// `--debug` overrides the log level.
    fn apply_debug_flag(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            data: Some(s.data.clone()),
            style: Some(s.style.clone()),
            theme: Some(s.theme.clone()),
        }
    }
}

/// `true` when `name` came from the command line or the environment rather
/// than its default value.
fn is_arg_user_supplied(matches: &clap::ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(clap::parser::ValueSource::CommandLine) | Some(clap::parser::ValueSource::EnvVariable)
    )
}

// ── Tests ──────────────────────────────────────────────────────────────────────
