// =============================================================================
// Runtime Configuration — analyst settings with atomic save
// =============================================================================
//
// Selectable tickers, history start date and the input / output directories.
// Indicator windows and scenario thresholds are fixed and do not live here.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash.  All fields carry `#[serde(default)]` so that adding new fields
// never breaks loading an older config file.
//
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_tickers() -> Vec<String> {
    [
        "ITX.MC", "SAN.MC", "BBVA.MC", "IBE.MC", "AAPL", "MSFT", "NVDA", "TSLA",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

// =============================================================================
// AnalystConfig
// =============================================================================

/// Top-level configuration for the analyst.
///
/// Every field has a serde default so that older JSON files missing new fields
/// will still deserialise correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalystConfig {
    /// Ticker symbols offered for selection.
    #[serde(default = "default_tickers")]
    pub tickers: Vec<String>,

    /// First date of history fed into the engine.
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    /// Directory holding `<TICKER>.csv` daily history files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory receiving reports, analysis JSON and rendered artifacts.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for AnalystConfig {
    fn default() -> Self {
        Self {
            tickers: default_tickers(),
            start_date: default_start_date(),
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
        }
    }
}

impl AnalystConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read analyst config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse analyst config from {}", path.display()))?;

        info!(
            path = %path.display(),
            tickers = ?config.tickers,
            start_date = %config.start_date,
            "analyst config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise analyst config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "analyst config saved (atomic)");
        Ok(())
    }

    /// Apply `ANALYST_*` environment overrides from `lookup`.
    ///
    /// `ANALYST_TICKERS` is a comma-separated list; blank entries are dropped
    /// and symbols are upper-cased. An override that leaves no tickers is
    /// ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(syms) = lookup("ANALYST_TICKERS") {
            let tickers: Vec<String> = syms
                .split(',')
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect();
            if !tickers.is_empty() {
                self.tickers = tickers;
            }
        }
        if let Some(dir) = lookup("ANALYST_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("ANALYST_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
    }

    /// Resolve a user selection against the configured tickers
    /// (case-insensitive). Returns the canonical symbol.
    pub fn select_ticker(&self, input: &str) -> Option<&str> {
        let wanted = input.trim();
        self.tickers
            .iter()
            .find(|t| t.eq_ignore_ascii_case(wanted))
            .map(String::as_str)
    }
}
