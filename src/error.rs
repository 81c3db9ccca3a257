// =============================================================================
// Analysis errors
// =============================================================================
//
// Every failure of a single analysis run is one of these kinds. The pipeline
// recovers all of them at its boundary; callers only ever show the single
// `user_message()` and log the distinct kind.

use thiserror::Error;

/// Message shown to the end user whenever an analysis run fails.
pub const USER_FAILURE_MESSAGE: &str = "The analysis could not be generated.";

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The price source returned nothing for the symbol / date range.
    #[error("no price data available for {ticker}")]
    EmptyData { ticker: String },

    /// The series is too short for the required rolling windows.
    #[error("insufficient data: required {required} points, got {got}")]
    InsufficientData { required: usize, got: usize },

    /// Chart or document generation failed.
    #[error("render failure: {0}")]
    RenderFailure(String),

    /// The price series violates ordering or positivity.
    #[error("invalid price series: {0}")]
    InvalidSeries(String),

    /// Local price data could not be read or parsed.
    #[error("price source error: {0}")]
    DataSource(String),
}

impl AnalysisError {
    /// Short stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyData { .. } => "empty_data",
            Self::InsufficientData { .. } => "insufficient_data",
            Self::RenderFailure(_) => "render_failure",
            Self::InvalidSeries(_) => "invalid_series",
            Self::DataSource(_) => "data_source",
        }
    }

    /// The user-visible message. Identical for every kind.
    pub fn user_message(&self) -> &'static str {
        USER_FAILURE_MESSAGE
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
