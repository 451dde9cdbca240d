//! Piecewise-linear interpolation with extrapolation.
//!
//! ## Purpose
//!
//! This module provides a piecewise-linear interpolant over a set of knots,
//! extended linearly beyond the knot range. It is the density estimator used
//! to flatten the effective redshift distribution inside a bin: sub-bin
//! counts become knots and the interpolant is evaluated at every member's
//! exact redshift.
//!
//! ## Design notes
//!
//! * **Extrapolation**: Queries outside the knot range continue the first or
//!   last segment's line (no clamping).
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * Knot x-values are strictly increasing.
//! * At least two knots are present.
//!
//! ## Non-goals
//!
//! * This module does not sort or validate the query points.
//! * This module does not provide higher-order interpolation.

// External dependencies
use num_traits::Float;

// ============================================================================
// Linear Interpolator
// ============================================================================

/// Piecewise-linear interpolant with linear extrapolation beyond the knots.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolator<T> {
    /// Knot x-values (strictly increasing).
    xs: Vec<T>,

    /// Knot y-values.
    ys: Vec<T>,
}

impl<T: Float> LinearInterpolator<T> {
    /// Build an interpolant from knots.
    ///
    /// Returns `None` when fewer than two knots are given, when the lengths
    /// differ, or when the x-values are not strictly increasing.
    pub fn new(xs: Vec<T>, ys: Vec<T>) -> Option<Self> {
        if xs.len() < 2 || xs.len() != ys.len() {
            return None;
        }
        if xs.windows(2).any(|w| w[0] >= w[1]) {
            return None;
        }
        Some(Self { xs, ys })
    }

    /// Evaluate the interpolant at `x`.
    ///
    /// Interior queries interpolate between the bracketing knots; queries
    /// below the first knot or above the last continue the end segments.
    pub fn eval(&self, x: T) -> T {
        let n = self.xs.len();

        // Segment index: bracketing pair (seg - 1, seg), end segments reused
        // for extrapolation.
        let upper = self.xs.partition_point(|&k| k < x);
        let seg = upper.clamp(1, n - 1);

        let x0 = self.xs[seg - 1];
        let x1 = self.xs[seg];
        let y0 = self.ys[seg - 1];
        let y1 = self.ys[seg];

        let slope = (y1 - y0) / (x1 - x0);
        y0 + (x - x0) * slope
    }

    /// Evaluate the interpolant at every query point.
    pub fn eval_many(&self, queries: &[T]) -> Vec<T> {
        queries.iter().map(|&x| self.eval(x)).collect()
    }
}
