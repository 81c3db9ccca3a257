// =============================================================================
// Shared types used across the analysis engine
// =============================================================================

use chrono::NaiveDate;
use crate::error::{AnalysisError, Result};

/// One daily close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Date-ordered daily closing prices for a single security.
///
/// Dates are strictly increasing and every close is finite and positive.
/// The series cannot be modified after construction.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Validate and wrap `points`.
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(AnalysisError::InvalidSeries("series is empty".into()));
        }

        for p in &points {
            if !p.close.is_finite() || p.close <= 0.0 {
                return Err(AnalysisError::InvalidSeries(format!(
                    "close {} on {} is not a positive price",
                    p.close, p.date
                )));
            }
        }

        if let Some(w) = points.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(AnalysisError::InvalidSeries(format!(
                "dates not strictly increasing: {} followed by {}",
                w[0].date, w[1].date
            )));
        }

        Ok(Self { points })
    }

    /// Build a series of consecutive calendar days starting at `start`.
    /// Mostly useful for fixtures.
    pub fn from_closes(start: NaiveDate, closes: &[f64]) -> Result<Self> {
        let points = closes
            .iter()
            .zip(start.iter_days())
            .map(|(&close, date)| PricePoint { date, close })
            .collect();
        Self::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn accepts_ordered_positive_series() {
        let s = PriceSeries::new(vec![
            PricePoint { date: day(2), close: 10.0 },
            PricePoint { date: day(3), close: 11.0 },
        ])
        .unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.closes(), vec![10.0, 11.0]);
        assert_eq!(s.dates(), vec![day(2), day(3)]);
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            PriceSeries::new(Vec::new()),
            Err(AnalysisError::InvalidSeries(_))
        ));
    }

    #[test]
    fn rejects_duplicate_or_backwards_dates() {
        let dup = PriceSeries::new(vec![
            PricePoint { date: day(2), close: 10.0 },
            PricePoint { date: day(2), close: 11.0 },
        ]);
        assert!(dup.is_err());

        let back = PriceSeries::new(vec![
            PricePoint { date: day(3), close: 10.0 },
            PricePoint { date: day(2), close: 11.0 },
        ]);
        assert!(back.is_err());
    }

    #[test]
    fn rejects_non_positive_or_nan_close() {
        assert!(PriceSeries::from_closes(day(1), &[1.0, 0.0]).is_err());
        assert!(PriceSeries::from_closes(day(1), &[1.0, -3.0]).is_err());
        assert!(PriceSeries::from_closes(day(1), &[f64::NAN]).is_err());
    }

    #[test]
    fn from_closes_uses_consecutive_days() {
        let s = PriceSeries::from_closes(day(1), &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(s.dates(), vec![day(1), day(2), day(3)]);
    }
}
