//! Weighted least squares regression.
//!
//! ## Purpose
//!
//! This module provides the core data types and logic for 1D weighted linear
//! regression:
//! - Single-pass accumulation of the weighted normal-equation sums.
//! - A solver returning slope, intercept, and weighted means.
//! - The [`LinearFit`] result type used for both the per-bin fits and the
//!   final slope model.
//!
//! ## Design notes
//!
//! * **Single pass**: All five sums are accumulated in one traversal.
//! * **Stability**: The solve guards against non-positive weight sums and
//!   vanishing weighted variance.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Non-goals
//!
//! * This module does not compute weights (see `weighting` and `huber`).
//! * This module does not decide what a degenerate solve means for a bin.

// External dependencies
use num_traits::Float;

// ============================================================================
// Accumulation and Solving
// ============================================================================

/// Single-pass accumulation for 1D weighted least squares.
#[inline]
pub fn accumulate_wls<T: Float>(x: &[T], y: &[T], weights: &[T]) -> (T, T, T, T, T) {
    let n = x.len();
    if n == 0 {
        return (T::zero(), T::zero(), T::zero(), T::zero(), T::zero());
    }

    let mut sum_w = T::zero();
    let mut sum_wx = T::zero();
    let mut sum_wy = T::zero();
    let mut sum_wxx = T::zero();
    let mut sum_wxy = T::zero();

    for i in 0..n {
        let w = weights[i];
        let x_val = x[i];
        let y_val = y[i];

        let wx = w * x_val;

        sum_w = sum_w + w;
        sum_wx = sum_wx + wx;
        sum_wy = sum_wy + w * y_val;
        sum_wxx = sum_wxx + wx * x_val;
        sum_wxy = sum_wxy + wx * y_val;
    }

    (sum_w, sum_wx, sum_wy, sum_wxx, sum_wxy)
}

/// Solve the 1D weighted least squares system.
///
/// Returns `(slope, intercept, x_mean, y_mean)`, or `None` when the weight
/// sum is non-positive or the weighted variance of x falls below `tol`.
#[inline]
pub fn solve_wls<T: Float>(
    sum_w: T,
    sum_wx: T,
    sum_wy: T,
    sum_wxx: T,
    sum_wxy: T,
    tol: T,
) -> Option<(T, T, T, T)> {
    if sum_w <= T::zero() {
        return None;
    }

    let x_mean = sum_wx / sum_w;
    let y_mean = sum_wy / sum_w;
    let variance = sum_wxx - (sum_wx * sum_wx) / sum_w;

    if variance <= tol {
        return None;
    }

    let covariance = sum_wxy - (sum_wx * sum_wy) / sum_w;
    let slope = covariance / variance;
    let intercept = y_mean - slope * x_mean;

    Some((slope, intercept, x_mean, y_mean))
}

// ============================================================================
// LinearFit
// ============================================================================

/// Linear regression fit result (slope and intercept).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit<T> {
    /// Slope (beta_1)
    pub slope: T,

    /// Intercept (beta_0)
    pub intercept: T,

    /// Weighted mean of x-values
    pub x_mean: T,

    /// Weighted mean of y-values
    pub y_mean: T,
}

impl<T: Float> LinearFit<T> {
    /// Predict the y-value for a given x using the model.
    #[inline]
    pub fn predict(&self, x: T) -> T {
        self.intercept + self.slope * x
    }

    /// Predict y-values for every x in a batch.
    pub fn predict_many(&self, xs: &[T]) -> Vec<T> {
        xs.iter().map(|&x| self.predict(x)).collect()
    }

    /// Fit weighted least squares regression of `y` on `x`.
    ///
    /// Returns `None` when the system is degenerate (non-positive weight sum
    /// or no spread in x).
    pub fn fit_wls(x: &[T], y: &[T], weights: &[T]) -> Option<Self> {
        if x.is_empty() {
            return None;
        }

        let (sum_w, sum_wx, sum_wy, sum_wxx, sum_wxy) = accumulate_wls(x, y, weights);

        // Numerical stability tolerance, scaled by the magnitude of the sums
        let abs_tol = T::from(1e-12).unwrap();
        let rel_tol = T::epsilon() * sum_wxx.abs();
        let tol = abs_tol.max(rel_tol);

        solve_wls(sum_w, sum_wx, sum_wy, sum_wxx, sum_wxy, tol).map(
            |(slope, intercept, x_mean, y_mean)| Self {
                slope,
                intercept,
                x_mean,
                y_mean,
            },
        )
    }

    /// Residuals `y_i - predict(x_i)` of this fit.
    pub fn residuals(&self, x: &[T], y: &[T]) -> Vec<T> {
        x.iter()
            .zip(y.iter())
            .map(|(&xi, &yi)| yi - self.predict(xi))
            .collect()
    }
}
