// =============================================================================
// Market Scenario Classification
// =============================================================================
//
// Maps the latest MA20 / MA50 / RSI(14) values onto one of four scenarios.
//
// Decision chain (evaluated top-to-bottom; first match wins):
//
//   1. FAVORABLE    — MA20 > MA50 AND RSI < 70
//   2. RISK         — RSI > 70
//   3. SPECULATIVE  — RSI < 30
//   4. NEUTRAL      — otherwise
//
// Comparisons are strict. RSI exactly 70 is never RISK and RSI exactly 30 is
// never SPECULATIVE. An uptrend with RSI above 70 fails rule 1 and lands in
// RISK.

use serde::Serialize;

/// RSI level above which the market is read as overbought.
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// RSI level below which the market is read as oversold.
pub const RSI_OVERSOLD: f64 = 30.0;

/// Categorical market condition for a single analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Scenario {
    /// Uptrend without overbought pressure.
    Favorable,
    /// Overbought; a short-term correction is plausible.
    Risk,
    /// Oversold; a rebound is possible but risky.
    Speculative,
    /// No clear technical signal.
    Neutral,
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Favorable => write!(f, "FAVORABLE"),
            Self::Risk => write!(f, "RISK"),
            Self::Speculative => write!(f, "SPECULATIVE"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

impl Scenario {
    /// Headline used in the report.
    pub fn headline(self) -> &'static str {
        match self {
            Self::Favorable => "FAVORABLE SCENARIO",
            Self::Risk => "RISK SCENARIO",
            Self::Speculative => "SPECULATIVE SCENARIO",
            Self::Neutral => "NEUTRAL SCENARIO",
        }
    }

    /// Explanation lines that follow the headline.
    pub fn explanation(self) -> &'static [&'static str] {
        match self {
            Self::Favorable => &[
                "The trend is bullish (MA20 > MA50).",
                "RSI shows no overbought condition.",
                "This could be a positive context for investing, always with risk management.",
            ],
            Self::Risk => &[
                "RSI signals an overbought market.",
                "The price could correct in the short term.",
                "Extra caution is advisable.",
            ],
            Self::Speculative => &[
                "RSI signals an oversold market.",
                "A rebound could happen, but risk remains high.",
            ],
            Self::Neutral => &[
                "There is no clear technical signal.",
                "The market is in a phase of indecision.",
            ],
        }
    }
}

/// Classify the market from the three latest indicator values.
///
/// Pure function: the same three scalars always give the same scenario.
pub fn classify(ma20: f64, ma50: f64, rsi: f64) -> Scenario {
    if ma20 > ma50 && rsi < RSI_OVERBOUGHT {
        Scenario::Favorable
    } else if rsi > RSI_OVERBOUGHT {
        Scenario::Risk
    } else if rsi < RSI_OVERSOLD {
        Scenario::Speculative
    } else {
        Scenario::Neutral
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favorable_uptrend_not_overbought() {
        assert_eq!(classify(110.0, 100.0, 55.0), Scenario::Favorable);
    }

    #[test]
    fn uptrend_with_overbought_rsi_is_risk() {
        assert_eq!(classify(110.0, 100.0, 85.0), Scenario::Risk);
    }

    #[test]
    fn downtrend_overbought_is_risk() {
        assert_eq!(classify(90.0, 100.0, 75.0), Scenario::Risk);
    }

    #[test]
    fn oversold_is_speculative() {
        assert_eq!(classify(90.0, 100.0, 20.0), Scenario::Speculative);
    }

    #[test]
    fn uptrend_beats_oversold() {
        // Rule 1 fires before rule 3.
        assert_eq!(classify(110.0, 100.0, 20.0), Scenario::Favorable);
    }

    #[test]
    fn neutral_band() {
        assert_eq!(classify(90.0, 100.0, 50.0), Scenario::Neutral);
    }

    #[test]
    fn equal_averages_never_favorable() {
        assert_eq!(classify(100.0, 100.0, 50.0), Scenario::Neutral);
        assert_eq!(classify(100.0, 100.0, 100.0), Scenario::Risk);
    }

    #[test]
    fn rsi_exactly_70() {
        assert_eq!(classify(110.0, 100.0, 70.0), Scenario::Neutral);
        assert_eq!(classify(90.0, 100.0, 70.0), Scenario::Neutral);
    }

    #[test]
    fn rsi_exactly_30() {
        assert_eq!(classify(90.0, 100.0, 30.0), Scenario::Neutral);
        assert_eq!(classify(110.0, 100.0, 30.0), Scenario::Favorable);
    }

    #[test]
    fn every_scenario_has_text() {
        for s in [
            Scenario::Favorable,
            Scenario::Risk,
            Scenario::Speculative,
            Scenario::Neutral,
        ] {
            assert!(s.headline().ends_with("SCENARIO"));
            assert!(!s.explanation().is_empty());
        }
    }

    #[test]
    fn scenario_display() {
        assert_eq!(format!("{}", Scenario::Risk), "RISK");
        assert_eq!(format!("{}", Scenario::Favorable), "FAVORABLE");
    }
}
