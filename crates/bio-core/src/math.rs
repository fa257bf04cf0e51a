//! Combinatorial propensity helpers.
//!
//! In stochastic chemistry the number of distinct ways a reaction can pick
//! `k` molecules out of `n` available ones is `C(n, k)`.  Concentrations are
//! stored as `f64`, so [`concentration_propensity`] truncates the available
//! amount and rounds the required amount up before taking the binomial.

/// `C(n, k)` as a real number.
///
/// Returns `0.0` when `k > n` (the usual convention), `1.0` when `k == 0`.
/// Uses the multiplicative form over the smaller of `k` and `n - k`, then
/// rounds to the nearest integer to absorb accumulated floating-point error.
pub fn binomial_coefficient(n: u64, k: u64) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    if k == 0 {
        return 1.0;
    }
    let mut result = 1.0_f64;
    for i in 1..=k {
        result = result * (n - k + i) as f64 / i as f64;
        if result.is_infinite() {
            return f64::INFINITY;
        }
    }
    result.round()
}

/// Combinatorial weight of `available` units against a minimum `threshold`.
///
/// - `available < threshold` (or NaN) → `0.0`
/// - otherwise `C(trunc(available), ceil(threshold))`
///
/// Fractional quantities are tolerated: `available = 0.7, threshold = 0.5`
/// yields `C(0, 1) = 0` even though the threshold is met.
pub fn concentration_propensity(available: f64, threshold: f64) -> f64 {
    if !(available >= threshold) {
        return 0.0;
    }
    // Saturating float → int casts: negatives become 0, +∞ becomes u64::MAX.
    let n = available.trunc() as u64;
    let k = threshold.ceil() as u64;
    binomial_coefficient(n, k)
}
