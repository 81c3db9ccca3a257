// =============================================================================
// Plain-text analysis report
// =============================================================================

use std::fmt;

use crate::analysis::engine::Analysis;

pub const REPORT_TITLE: &str = "STOCK ANALYSIS REPORT";

const CONCLUSION: &[&str] = &[
    "This analysis is based on historical data and technical indicators.",
    "It does not constitute investment advice.",
];

/// Report layout over a borrowed analysis. Formatting errors from the
/// underlying writer are returned to the caller.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a>(pub &'a Analysis);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let analysis = self.0;
        let s = &analysis.snapshot;

        writeln!(f, "{REPORT_TITLE}")?;
        writeln!(f)?;
        writeln!(f, "Ticker analysed: {}", analysis.ticker)?;
        writeln!(f, "Last session: {}", s.date)?;
        writeln!(f)?;
        writeln!(f, "Current price: {:.2}", s.close)?;
        writeln!(f, "20-session moving average (MA20): {:.2}", s.ma20)?;
        writeln!(f, "50-session moving average (MA50): {:.2}", s.ma50)?;
        writeln!(f, "RSI (14): {:.2}", s.rsi14)?;
        writeln!(
            f,
            "Bollinger bands (20, 2): {:.2} / {:.2}",
            s.boll_lower, s.boll_upper
        )?;
        writeln!(f)?;
        writeln!(f, "Technical evaluation:")?;
        writeln!(f, "{}", analysis.scenario.headline())?;
        for line in analysis.scenario.explanation() {
            writeln!(f, "{line}")?;
        }
        writeln!(f)?;
        writeln!(f, "Conclusion:")?;
        for line in CONCLUSION {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Render the report text shown to the user and embedded in the document.
pub fn render_report(analysis: &Analysis) -> String {
    Report(analysis).to_string()
}
