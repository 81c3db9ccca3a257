// =============================================================================
// Stock Insight — technical indicators, market scenario and report pipeline
// =============================================================================
//
// Computes MA20, MA50, RSI(14) and Bollinger Bands(20, 2) over a daily
// closing-price series, classifies the market into a scenario and renders a
// plain-text report. Chart images and documents come from pluggable
// renderers.

pub mod analysis;
pub mod error;
pub mod indicators;
pub mod market_data;
pub mod pipeline;
pub mod render;
pub mod runtime_config;
pub mod types;

pub use analysis::{classify, Analysis, IndicatorEngine, Scenario};
pub use error::AnalysisError;
pub use pipeline::{write_artifacts, AnalysisOutput, Pipeline};
pub use types::{PricePoint, PriceSeries};
