// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
//   SMA_n[i] = (close[i-n+1] + ... + close[i]) / n      for i >= n - 1
//
// Each window is averaged from its own slice, as offsets from its first
// close. A constant window therefore averages to exactly that close, and two
// windows repeating the same cycle of offsets average to the same value.

/// Compute the SMA series for `closes` and look-back `period`.
///
/// The output has the same length as `closes`; the first `period - 1`
/// entries are `None`. A zero period or a series shorter than `period`
/// yields all `None`.
pub fn calculate_sma(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; closes.len()];
    if period == 0 || closes.len() < period {
        return result;
    }

    for (offset, window) in closes.windows(period).enumerate() {
        result[offset + period - 1] = Some(mean(window));
    }

    result
}

/// Arithmetic mean of a non-empty slice, anchored at its first element.
pub(crate) fn mean(values: &[f64]) -> f64 {
    let anchor = values[0];
    let n = values.len() as f64;
    let (sum, carry) = compensated_sum(values.iter().map(|x| x - anchor));

    // Divide the (sum + carry) pair, correcting the quotient with the exact
    // remainder of the first division.
    let q = sum / n;
    let remainder = (-q).mul_add(n, sum) + carry;
    anchor + (q + remainder / n)
}

/// Neumaier summation: the rounded sum and the accumulated rounding error.
pub(crate) fn compensated_sum(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut sum = 0.0_f64;
    let mut carry = 0.0_f64;
    for x in values {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            carry += (sum - t) + x;
        } else {
            carry += (x - t) + sum;
        }
        sum = t;
    }
    (sum, carry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_aligned_with_input() {
        let closes = [1.0, 2.0, 3.0, 4.0, 5.0];
        let sma = calculate_sma(&closes, 3);
        assert_eq!(sma, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn sma_insufficient_data() {
        assert_eq!(calculate_sma(&[1.0, 2.0], 3), vec![None, None]);
    }

    #[test]
    fn sma_period_zero() {
        assert!(calculate_sma(&[1.0, 2.0], 0).iter().all(Option::is_none));
    }

    #[test]
    fn sma_empty_input() {
        assert!(calculate_sma(&[], 20).is_empty());
    }

    #[test]
    fn sma_linear_ramp() {
        // 100..=159: last 20 average to 149.5, last 50 to 134.5.
        let closes: Vec<f64> = (100..160).map(|x| x as f64).collect();
        let ma20 = calculate_sma(&closes, 20);
        let ma50 = calculate_sma(&closes, 50);
        assert_eq!(ma20[19], Some(109.5));
        assert_eq!(*ma20.last().unwrap(), Some(149.5));
        assert!(ma50[48].is_none());
        assert_eq!(*ma50.last().unwrap(), Some(134.5));
    }

    #[test]
    fn sma_constant_is_exact_for_non_dyadic_prices() {
        for c in [0.1, 101.37, 12.34] {
            let closes = vec![c; 60];
            assert_eq!(*calculate_sma(&closes, 20).last().unwrap(), Some(c));
            assert_eq!(*calculate_sma(&closes, 50).last().unwrap(), Some(c));
        }
    }

    #[test]
    fn sma_repeating_cycle_ties_across_window_lengths() {
        // A 10-session cycle fits whole into both 20 and 50 sessions.
        let cycle = [0.0, 0.3, 0.1, 0.5, 0.2, 0.6, 0.4, 0.8, 0.7, 0.9];
        let closes: Vec<f64> = (0..60).map(|i| 12.34 + cycle[i % 10]).collect();
        let ma20 = calculate_sma(&closes, 20).last().copied().flatten().unwrap();
        let ma50 = calculate_sma(&closes, 50).last().copied().flatten().unwrap();
        assert_eq!(ma20, ma50);
        assert!((ma20 - 12.79).abs() < 1e-9);
    }

    #[test]
    fn mean_of_single_value_is_that_value() {
        assert_eq!(mean(&[0.1]), 0.1);
    }
}
