//! Robust linear regression via iteratively reweighted least squares.
//!
//! ## Purpose
//!
//! This module implements a Huber-loss linear fit: quadratic loss for small
//! residuals, linear beyond the transition threshold. The minimizer is found
//! by iteratively reweighted least squares (IRLS), alternating between a
//! weighted solve and a residual-based weight update.
//!
//! ## Design notes
//!
//! * **Loss shape**: The transition parameter epsilon defaults to 1.01, so
//!   nearly all residuals beyond one scale unit fall on the linear branch.
//! * **Scale**: The residual scale is re-estimated each iteration with the
//!   NMAD, falling back to the mean absolute residual when the NMAD
//!   collapses toward zero.
//! * **Sample weights**: Caller-supplied per-row weights multiply the
//!   robustness weights on every iteration.
//!
//! ## Key concepts
//!
//! * **IRLS**: Re-fits the model with weights `w(u) = 1` for `|u| <= eps`
//!   and `w(u) = eps / |u|` beyond, where `u = r / scale`.
//! * **Convergence**: Stops when both coefficients move less than the
//!   tolerance (relative to their magnitude), or after `max_iterations`.
//!
//! ## Invariants
//!
//! * Robustness weights are in (0, 1].
//! * Scale estimates used for weighting are strictly positive.
//!
//! ## Non-goals
//!
//! * This module does not compute density weights (see `weighting`).
//! * This module does not decide what a degenerate solve means for a bin.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::regression::LinearFit;
use crate::math::scaling::nmad;

// ============================================================================
// Huber Regressor
// ============================================================================

/// Huber-loss linear regressor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HuberRegressor<T> {
    /// Transition between the quadratic and linear loss branches, in scale
    /// units.
    pub epsilon: T,

    /// Maximum number of reweighting iterations.
    pub max_iterations: usize,

    /// Relative convergence tolerance on the coefficients.
    pub tolerance: T,
}

impl<T: Float> Default for HuberRegressor<T> {
    fn default() -> Self {
        Self {
            epsilon: T::from(Self::DEFAULT_EPSILON).unwrap(),
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            tolerance: T::from(Self::DEFAULT_TOLERANCE).unwrap(),
        }
    }
}

impl<T: Float> HuberRegressor<T> {
    // ========================================================================
    // Constants
    // ========================================================================

    /// Default transition parameter.
    ///
    /// A value of 1.01 keeps only residuals within one scale unit on the
    /// quadratic branch, matching the reference fitting procedure.
    const DEFAULT_EPSILON: f64 = 1.01;

    /// Default iteration cap.
    const DEFAULT_MAX_ITERATIONS: usize = 100;

    /// Default relative convergence tolerance on the coefficients.
    const DEFAULT_TOLERANCE: f64 = 1e-8;

    /// Minimum scale threshold relative to the mean absolute residual.
    ///
    /// If NMAD < SCALE_THRESHOLD × MAR, use MAR instead of NMAD.
    const SCALE_THRESHOLD: f64 = 1e-7;

    /// Minimum absolute scale epsilon to avoid division by zero.
    const MIN_SCALE: f64 = 1e-12;

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a regressor with explicit parameters.
    pub fn new(epsilon: T, max_iterations: usize, tolerance: T) -> Self {
        Self {
            epsilon,
            max_iterations,
            tolerance,
        }
    }

    // ========================================================================
    // Main API
    // ========================================================================

    /// Fit `y ≈ intercept + slope * x` robustly with per-row sample weights.
    ///
    /// Returns `None` when the weighted system is degenerate (no spread in
    /// x, or a non-positive weight sum).
    pub fn fit(&self, x: &[T], y: &[T], sample_weights: &[T]) -> Option<LinearFit<T>> {
        let n = x.len();
        if n < 2 {
            return None;
        }

        // Initial fit with the caller's weights only
        let mut model = LinearFit::fit_wls(x, y, sample_weights)?;
        let mut weights = vec![T::zero(); n];

        for _ in 0..self.max_iterations {
            // Update combined weights from the current residuals
            let residuals = model.residuals(x, y);
            let scale = match self.residual_scale(&residuals) {
                Some(scale) => scale,
                // Every residual is zero: the fit is already exact
                None => break,
            };

            for i in 0..n {
                weights[i] = sample_weights[i] * self.huber_weight(residuals[i], scale);
            }

            let next = LinearFit::fit_wls(x, y, &weights)?;

            let d_slope = (next.slope - model.slope).abs();
            let d_intercept = (next.intercept - model.intercept).abs();
            let step = d_slope.max(d_intercept);
            let magnitude = T::one() + model.slope.abs().max(model.intercept.abs());

            model = next;

            if step < self.tolerance * magnitude {
                break;
            }
        }

        Some(model)
    }

    // ========================================================================
    // Scale Estimation
    // ========================================================================

    /// Robust residual scale with a mean-absolute-residual fallback.
    ///
    /// Returns `None` only when every residual is exactly zero, in which
    /// case the current fit is already exact and the caller keeps it.
    fn residual_scale(&self, residuals: &[T]) -> Option<T> {
        let scale = nmad(residuals);

        let n = residuals.len();
        let mut sum_abs = T::zero();
        for &r in residuals {
            sum_abs = sum_abs + r.abs();
        }
        let mean_abs = sum_abs / T::from(n).unwrap();

        let relative_threshold = T::from(Self::SCALE_THRESHOLD).unwrap() * mean_abs;
        let absolute_threshold = T::from(Self::MIN_SCALE).unwrap();
        let scale_threshold = relative_threshold.max(absolute_threshold);

        if scale > scale_threshold {
            Some(scale)
        } else if mean_abs > absolute_threshold {
            // NMAD collapsed but residual mass remains: fall back to MAR
            Some(mean_abs)
        } else {
            None
        }
    }

    // ========================================================================
    // Weight Function
    // ========================================================================

    /// Compute the Huber IRLS weight.
    ///
    /// # Formula
    ///
    /// u = |r| / s
    ///
    /// w(u) = 1        if u <= eps
    ///
    /// w(u) = eps / u  if u > eps
    #[inline]
    fn huber_weight(&self, residual: T, scale: T) -> T {
        if scale <= T::zero() {
            return T::one();
        }

        let u = (residual / scale).abs();
        if u <= self.epsilon {
            T::one()
        } else {
            self.epsilon / u
        }
    }
}
