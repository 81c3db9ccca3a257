// =============================================================================
// Market Data
// =============================================================================
//
// Price sources supply the date-ordered daily closes the engine analyses.

pub mod csv_source;
pub mod price_source;

pub use csv_source::CsvPriceSource;
pub use price_source::PriceSource;
