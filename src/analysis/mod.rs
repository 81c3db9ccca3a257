// =============================================================================
// Analysis Module
// =============================================================================
//
// Turns a daily closing-price series into indicator series, a latest-value
// snapshot and a categorical market scenario, then renders the plain-text
// report consumed by the chart and document collaborators.

pub mod engine;
pub mod report;
pub mod scenario;

pub use engine::{Analysis, IndicatorEngine, IndicatorSeries, LatestSnapshot};
pub use report::{render_report, Report};
pub use scenario::{classify, Scenario};
