// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free rolling-window indicators over daily closes. Every
// series function returns a `Vec<Option<f64>>` aligned index-for-index with
// the input, with `None` wherever the window lacks history, so callers are
// forced to handle the warm-up period.

pub mod bollinger;
pub mod rsi;
pub mod sma;

pub use bollinger::{calculate_bollinger, BollingerSeries};
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
