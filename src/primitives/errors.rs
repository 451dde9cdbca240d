//! Error types for correction fitting.
//!
//! ## Purpose
//!
//! This module defines error conditions that can occur during correction
//! fitting, including input validation, parameter constraints, degenerate
//! bins, and empty survivor sets.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., actual lengths, bin indices).
//! * **Deferred**: Builder misconfiguration is caught and stored until `build()`.
//! * **Fatal**: Every variant aborts the whole fit; there is no partial result.
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Empty arrays, mismatched lengths, non-finite values.
//! 2. **Parameter validation**: Invalid bin population, epsilon, iterations, or tolerance.
//! 3. **Degenerate bins**: Bins too small or too flat for weighting and regression.
//! 4. **Survivor set**: The scatter cutoff removing every bin, or too few bins remaining.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * Error messages are consistent in tone and formatting.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

// External dependencies
use core::fmt::{Display, Formatter, Result};
use std::error::Error;

// ============================================================================
// Error Type
// ============================================================================

/// Error type for correction fitting operations.
#[derive(Debug, Clone, PartialEq)]
pub enum KcorrError {
    /// Input arrays are empty; fitting requires at least 2 rows.
    EmptyInput,

    /// All three input arrays must have the same number of elements.
    MismatchedInputs {
        /// Number of elements in the observed-color array.
        observed_len: usize,
        /// Number of elements in the rest-frame-color array.
        restframe_len: usize,
        /// Number of elements in the redshift array.
        redshift_len: usize,
    },

    /// Input data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// Number of rows is below the minimum requirement.
    TooFewPoints {
        /// Number of rows provided.
        got: usize,
        /// Minimum required rows.
        min: usize,
    },

    /// Target bin population must be at least 2.
    InvalidSamplePerBin(usize),

    /// Huber transition parameter must be finite and greater than 1.
    InvalidEpsilon(f64),

    /// Robust fitting requires between 1 and 1000 reweighting iterations.
    InvalidIterations(usize),

    /// Convergence tolerance must be positive and finite.
    InvalidTolerance(f64),

    /// A usable reference-color bin has too few members for weighting/regression.
    DegenerateBin {
        /// 1-based bin index.
        bin: usize,
        /// Number of members in the bin.
        points: usize,
    },

    /// A bin has zero redshift spread, making density weighting ill-defined.
    ConstantRedshift {
        /// 1-based bin index.
        bin: usize,
    },

    /// A bin has zero observed-color scatter, making the weight formula ill-defined.
    ZeroScatter {
        /// 1-based bin index.
        bin: usize,
    },

    /// The weighted regression for a bin could not be solved.
    DegenerateFit {
        /// 1-based bin index.
        bin: usize,
    },

    /// The surviving slope coefficients have no reference-color spread, so
    /// the slope model cannot be constrained.
    DegenerateSecondaryFit {
        /// Number of surviving bins.
        points: usize,
    },

    /// The scatter cutoff excluded every bin from the secondary fit.
    AllBinsExcluded {
        /// Minimum fit-residual NMAD across bins.
        min_nmad: f64,
        /// The exclusion threshold (2.5 × min_nmad).
        threshold: f64,
    },

    /// Too few bins survived the cutoff to constrain the slope model.
    TooFewSurvivors {
        /// Number of surviving bins.
        got: usize,
        /// Minimum bins required for the secondary fit.
        min: usize,
    },

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for KcorrError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input arrays are empty"),
            Self::MismatchedInputs {
                observed_len,
                restframe_len,
                redshift_len,
            } => {
                write!(
                    f,
                    "Length mismatch: observed has {observed_len} rows, restframe has {restframe_len}, redshift has {redshift_len}"
                )
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::TooFewPoints { got, min } => {
                write!(f, "Too few rows: got {got}, need at least {min}")
            }
            Self::InvalidSamplePerBin(n) => {
                write!(f, "Invalid sample_per_bin: {n} (must be at least 2)")
            }
            Self::InvalidEpsilon(eps) => {
                write!(f, "Invalid epsilon: {eps} (must be finite and > 1)")
            }
            Self::InvalidIterations(iter) => {
                write!(f, "Invalid iterations: {iter} (must be in [1, 1000])")
            }
            Self::InvalidTolerance(tol) => {
                write!(f, "Invalid tolerance: {tol} (must be > 0 and finite)")
            }
            Self::DegenerateBin { bin, points } => {
                write!(
                    f,
                    "Degenerate bin {bin}: {points} members (need at least 2)"
                )
            }
            Self::ConstantRedshift { bin } => {
                write!(f, "Degenerate bin {bin}: zero redshift spread")
            }
            Self::ZeroScatter { bin } => {
                write!(f, "Degenerate bin {bin}: zero observed-color scatter")
            }
            Self::DegenerateFit { bin } => {
                write!(f, "Weighted regression failed for bin {bin}")
            }
            Self::DegenerateSecondaryFit { points } => {
                write!(
                    f,
                    "Secondary fit over {points} surviving bins is degenerate (no reference-color spread)"
                )
            }
            Self::AllBinsExcluded { min_nmad, threshold } => {
                write!(
                    f,
                    "Scatter cutoff excluded every bin (min NMAD {min_nmad}, threshold {threshold})"
                )
            }
            Self::TooFewSurvivors { got, min } => {
                write!(
                    f,
                    "Too few bins survived the cutoff: got {got}, need at least {min}"
                )
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for KcorrError {}
