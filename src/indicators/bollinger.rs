// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ). σ is the *sample* standard deviation of the
// window (n - 1 denominator).

use serde::Serialize;

use super::sma::{calculate_sma, compensated_sum, mean};

/// Upper / middle / lower bands aligned with the input closes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BollingerSeries {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Calculate Bollinger Bands for the given closing prices.
///
/// - `upper`  = SMA + `num_std` * σ
/// - `middle` = SMA
/// - `lower`  = SMA - `num_std` * σ
///
/// Entries are `None` until `period` closes are available. A period below 2
/// leaves the sample deviation undefined, so every band entry is `None`.
pub fn calculate_bollinger(closes: &[f64], period: usize, num_std: f64) -> BollingerSeries {
    let middle = calculate_sma(closes, period);
    let mut upper = vec![None; closes.len()];
    let mut lower = vec![None; closes.len()];

    if period < 2 || closes.len() < period {
        return BollingerSeries {
            upper,
            middle: vec![None; closes.len()],
            lower,
        };
    }

    for (offset, window) in closes.windows(period).enumerate() {
        let idx = offset + period - 1;
        let std_dev = sample_std_dev(window);
        // Middle comes from the same window, so it is always defined here.
        if let Some(mid) = middle[idx] {
            upper[idx] = Some(mid + num_std * std_dev);
            lower[idx] = Some(mid - num_std * std_dev);
        }
    }

    BollingerSeries { upper, middle, lower }
}

/// Sample standard deviation (n - 1). Caller guarantees `values.len() >= 2`.
///
/// Deviations are taken from the same anchored mean as the middle band, so a
/// constant window has σ = 0 exactly.
fn sample_std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    let (sum, carry) = compensated_sum(values.iter().map(|x| (x - m).powi(2)));
    ((sum + carry) / (values.len() - 1) as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_basic() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let bb = calculate_bollinger(&closes, 20, 2.0);
        let (u, m, l) = (bb.upper[19].unwrap(), bb.middle[19].unwrap(), bb.lower[19].unwrap());
        assert!((m - 10.5).abs() < 1e-10);
        assert!(u > m);
        assert!(l < m);
        assert!(((u - m) - (m - l)).abs() < 1e-10);
    }

    #[test]
    fn bollinger_uses_sample_deviation() {
        // Sample variance of 1..=20 is 35, so σ = sqrt(35).
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let bb = calculate_bollinger(&closes, 20, 2.0);
        let expected = 10.5 + 2.0 * 35f64.sqrt();
        assert!((bb.upper[19].unwrap() - expected).abs() < 1e-10);
    }

    #[test]
    fn bollinger_warm_up_is_none() {
        let closes: Vec<f64> = (1..=25).map(|x| x as f64).collect();
        let bb = calculate_bollinger(&closes, 20, 2.0);
        assert!(bb.upper[..19].iter().all(Option::is_none));
        assert!(bb.lower[..19].iter().all(Option::is_none));
        assert!(bb.upper[19..].iter().all(Option::is_some));
    }

    #[test]
    fn bollinger_insufficient_data() {
        let bb = calculate_bollinger(&[1.0, 2.0, 3.0], 20, 2.0);
        assert_eq!(bb.upper.len(), 3);
        assert!(bb.upper.iter().all(Option::is_none));
    }

    #[test]
    fn bollinger_flat_collapses() {
        let closes = vec![100.0; 20];
        let bb = calculate_bollinger(&closes, 20, 2.0);
        assert_eq!(bb.upper[19], Some(100.0));
        assert_eq!(bb.lower[19], Some(100.0));
    }

    #[test]
    fn bollinger_flat_collapses_for_non_dyadic_prices() {
        for c in [0.1, 101.37] {
            let bb = calculate_bollinger(&vec![c; 25], 20, 2.0);
            assert_eq!(bb.middle[24], Some(c));
            assert_eq!(bb.upper[24], Some(c));
            assert_eq!(bb.lower[24], Some(c));
        }
    }
}
