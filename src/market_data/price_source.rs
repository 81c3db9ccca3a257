use chrono::NaiveDate;

use crate::error::Result;
use crate::types::PriceSeries;

/// Supplies daily closing prices for a ticker.
///
/// `Ok(None)` means no data exists for the symbol / date range. That is not
/// an error of the source; the pipeline treats it like a too-short series.
pub trait PriceSource {
    fn fetch(&self, ticker: &str, start: NaiveDate) -> Result<Option<PriceSeries>>;
}
