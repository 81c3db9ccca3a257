// =============================================================================
// Indicator Engine
// =============================================================================
//
// Computes MA20, MA50, RSI(14) and Bollinger Bands(20, 2) over a validated
// price series, extracts the values at the final index and classifies the
// market scenario.
//
// The run either yields a complete `Analysis` or fails with
// `InsufficientData`; nothing partial is returned.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::analysis::scenario::{classify, Scenario};
use crate::error::{AnalysisError, Result};
use crate::indicators::{calculate_bollinger, calculate_rsi, calculate_sma};
use crate::types::PriceSeries;

pub const MA_SHORT_PERIOD: usize = 20;
pub const MA_LONG_PERIOD: usize = 50;
pub const RSI_PERIOD: usize = 14;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_NUM_STD: f64 = 2.0;

/// Minimum series length for a complete snapshot: MA50 needs 50 closes and
/// RSI(14) needs 15.
pub const MIN_POINTS: usize = MA_LONG_PERIOD;

// =============================================================================
// Types
// =============================================================================

/// Every indicator series, aligned index-for-index with the price series.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorSeries {
    pub dates: Vec<NaiveDate>,
    pub close: Vec<f64>,
    pub ma20: Vec<Option<f64>>,
    pub ma50: Vec<Option<f64>>,
    pub rsi14: Vec<Option<f64>>,
    pub boll_upper: Vec<Option<f64>>,
    pub boll_lower: Vec<Option<f64>>,
}

/// Indicator values at the final index of the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatestSnapshot {
    pub date: NaiveDate,
    pub close: f64,
    pub ma20: f64,
    pub ma50: f64,
    pub rsi14: f64,
    pub boll_upper: f64,
    pub boll_lower: f64,
}

/// Complete result of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub ticker: String,
    pub snapshot: LatestSnapshot,
    pub scenario: Scenario,
    pub series: IndicatorSeries,
}

// =============================================================================
// IndicatorEngine
// =============================================================================

/// Stateless indicator engine. Each call to [`IndicatorEngine::analyze`] is
/// an independent invocation.
#[derive(Debug, Default, Clone, Copy)]
pub struct IndicatorEngine;

impl IndicatorEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute every indicator series for `prices`. Never fails; warm-up
    /// entries are `None`.
    pub fn compute_series(&self, prices: &PriceSeries) -> IndicatorSeries {
        let closes = prices.closes();
        let bands = calculate_bollinger(&closes, BOLLINGER_PERIOD, BOLLINGER_NUM_STD);

        IndicatorSeries {
            dates: prices.dates(),
            ma20: calculate_sma(&closes, MA_SHORT_PERIOD),
            ma50: calculate_sma(&closes, MA_LONG_PERIOD),
            rsi14: calculate_rsi(&closes, RSI_PERIOD),
            boll_upper: bands.upper,
            boll_lower: bands.lower,
            close: closes,
        }
    }

    /// Run the full analysis: series, latest snapshot and scenario.
    pub fn analyze(&self, ticker: &str, prices: &PriceSeries) -> Result<Analysis> {
        let got = prices.len();
        if got < MIN_POINTS {
            return Err(AnalysisError::InsufficientData {
                required: MIN_POINTS,
                got,
            });
        }

        let series = self.compute_series(prices);
        let snapshot = latest_snapshot(&series)?;
        let scenario = classify(snapshot.ma20, snapshot.ma50, snapshot.rsi14);

        debug!(
            ticker,
            points = got,
            close = format!("{:.2}", snapshot.close),
            ma20 = format!("{:.2}", snapshot.ma20),
            ma50 = format!("{:.2}", snapshot.ma50),
            rsi = format!("{:.2}", snapshot.rsi14),
            scenario = %scenario,
            "Indicators computed"
        );

        Ok(Analysis {
            ticker: ticker.to_string(),
            snapshot,
            scenario,
            series,
        })
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Read every indicator at the final index; any undefined value means the
/// series was too short for that window.
fn latest_snapshot(series: &IndicatorSeries) -> Result<LatestSnapshot> {
    let got = series.close.len();

    let (date, close) = match (series.dates.last(), series.close.last()) {
        (Some(&d), Some(&c)) => (d, c),
        _ => return Err(AnalysisError::InsufficientData { required: MIN_POINTS, got }),
    };

    Ok(LatestSnapshot {
        date,
        close,
        ma20: last_defined(&series.ma20, MA_SHORT_PERIOD, got)?,
        ma50: last_defined(&series.ma50, MA_LONG_PERIOD, got)?,
        rsi14: last_defined(&series.rsi14, RSI_PERIOD + 1, got)?,
        boll_upper: last_defined(&series.boll_upper, BOLLINGER_PERIOD, got)?,
        boll_lower: last_defined(&series.boll_lower, BOLLINGER_PERIOD, got)?,
    })
}

fn last_defined(values: &[Option<f64>], required: usize, got: usize) -> Result<f64> {
    values
        .last()
        .copied()
        .flatten()
        .ok_or(AnalysisError::InsufficientData { required, got })
}
