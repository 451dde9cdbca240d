//! Output types for correction fitting.
//!
//! ## Purpose
//!
//! This module defines the [`CorrectionFit`] struct which encapsulates the
//! outputs of one fit: the slope model, the surviving per-bin coefficients,
//! and per-bin summaries.
//!
//! ## Design notes
//!
//! * **Generics**: Results are generic over `Float` types.
//! * **Ergonomics**: Implements `Display` for human-readable output.
//! * **Self-contained**: The result owns everything; no borrow ties it to
//!   the fitting call.
//!
//! ## Invariants
//!
//! * `a1s`, `mean_colors`, and the surviving subset of `bins` correspond
//!   index-for-index, in ascending boundary order.
//! * Every surviving bin satisfies `nmad < 2.5 * min_nmad`.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.
//! * This module does not provide serialization/deserialization logic.

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::regression::LinearFit;

// ============================================================================
// Per-Bin Summary
// ============================================================================

/// Summary of one fitted reference-color bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinFit<T> {
    /// Lower reference-color boundary.
    pub lower: T,

    /// Upper reference-color boundary.
    pub upper: T,

    /// Number of member rows.
    pub count: usize,

    /// Mean reference color of the members.
    pub mean_color: T,

    /// Fitted slope of observed color vs. redshift.
    pub a1: T,

    /// NMAD of the fit residuals.
    pub nmad: T,

    /// Whether the bin survived the scatter cutoff.
    pub survived: bool,
}

// ============================================================================
// Result Structure
// ============================================================================

/// Output of one correction fit.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionFit<T> {
    /// The slope model: `a1 ≈ intercept + slope * mean_restframe_color`.
    pub model: LinearFit<T>,

    /// Surviving per-bin slope coefficients, in ascending boundary order.
    pub a1s: Vec<T>,

    /// Mean reference colors corresponding to `a1s`.
    pub mean_colors: Vec<T>,

    /// All fitted bins, including the ones cut by the scatter filter.
    pub bins: Vec<BinFit<T>>,

    /// Minimum fit-residual NMAD across all fitted bins.
    pub min_nmad: T,

    /// Rows dropped into the unfitted trailing partial bin.
    pub dropped_rows: usize,
}

impl<T: Float> CorrectionFit<T> {
    // ========================================================================
    // Prediction
    // ========================================================================

    /// Predict the correction coefficient `a1` at a reference color.
    #[inline]
    pub fn predict(&self, restframe_color: T) -> T {
        self.model.predict(restframe_color)
    }

    /// Predict `a1` for a batch of reference colors.
    pub fn predict_many(&self, restframe_colors: &[T]) -> Vec<T> {
        self.model.predict_many(restframe_colors)
    }

    // ========================================================================
    // Query Methods
    // ========================================================================

    /// Number of bins that were fitted.
    pub fn bins_fitted(&self) -> usize {
        self.bins.len()
    }

    /// Number of bins that survived the scatter cutoff.
    pub fn bins_used(&self) -> usize {
        self.a1s.len()
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for CorrectionFit<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Bins fitted:  {}", self.bins_fitted())?;
        writeln!(f, "  Bins used:    {}", self.bins_used())?;
        writeln!(f, "  Dropped rows: {}", self.dropped_rows)?;
        writeln!(
            f,
            "  Minimum NMAD: {:.6}",
            self.min_nmad.to_f64().unwrap_or(f64::NAN)
        )?;
        writeln!(
            f,
            "  Slope model:  a1 = {:.6} + {:.6} * color",
            self.model.intercept.to_f64().unwrap_or(f64::NAN),
            self.model.slope.to_f64().unwrap_or(f64::NAN)
        )?;
        writeln!(f)?;

        writeln!(f, "Bin Fits:")?;
        writeln!(
            f,
            "{:>5} {:>8} {:>12} {:>12} {:>12} {:>6}",
            "Bin", "Count", "Mean_Color", "a1", "NMAD", "Used"
        )?;
        writeln!(f, "{:-<60}", "")?;

        for (i, bin) in self.bins.iter().enumerate() {
            writeln!(
                f,
                "{:>5} {:>8} {:>12.4} {:>12.4} {:>12.6} {:>6}",
                i + 1,
                bin.count,
                bin.mean_color.to_f64().unwrap_or(f64::NAN),
                bin.a1.to_f64().unwrap_or(f64::NAN),
                bin.nmad.to_f64().unwrap_or(f64::NAN),
                if bin.survived { "yes" } else { "no" }
            )?;
        }

        Ok(())
    }
}
