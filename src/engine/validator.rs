//! Input validation for correction fitting.
//!
//! ## Purpose
//!
//! This module provides validation functions for the fitting configuration
//! and input data. It checks requirements such as matching input lengths,
//! finite values, and parameter bounds.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not sort, transform, or filter input data. Catalog
//!   cleaning (sentinel values, selection cuts) is the caller's job and
//!   happens before these checks.
//! * This module does not perform the fitting itself.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::KcorrError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for fitting configuration and input data.
///
/// Provides static methods returning `Result<(), KcorrError>` that fail
/// fast upon identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate the three catalog columns.
    pub fn validate_inputs<T: Float>(
        observed: &[T],
        restframe: &[T],
        redshift: &[T],
    ) -> Result<(), KcorrError> {
        // Check 1: Non-empty arrays
        if observed.is_empty() || restframe.is_empty() || redshift.is_empty() {
            return Err(KcorrError::EmptyInput);
        }

        // Check 2: Matching lengths
        let n = observed.len();
        if restframe.len() != n || redshift.len() != n {
            return Err(KcorrError::MismatchedInputs {
                observed_len: n,
                restframe_len: restframe.len(),
                redshift_len: redshift.len(),
            });
        }

        // Check 3: Sufficient rows for regression
        if n < 2 {
            return Err(KcorrError::TooFewPoints { got: n, min: 2 });
        }

        // Check 4: All values finite (combined loop for cache locality)
        for i in 0..n {
            if !observed[i].is_finite() {
                return Err(KcorrError::InvalidNumericValue(format!(
                    "observed_color[{}]={}",
                    i,
                    observed[i].to_f64().unwrap_or(f64::NAN)
                )));
            }
            if !restframe[i].is_finite() {
                return Err(KcorrError::InvalidNumericValue(format!(
                    "restframe_color[{}]={}",
                    i,
                    restframe[i].to_f64().unwrap_or(f64::NAN)
                )));
            }
            if !redshift[i].is_finite() {
                return Err(KcorrError::InvalidNumericValue(format!(
                    "redshift[{}]={}",
                    i,
                    redshift[i].to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the target bin population.
    pub fn validate_sample_per_bin(sample_per_bin: usize) -> Result<(), KcorrError> {
        if sample_per_bin < 2 {
            return Err(KcorrError::InvalidSamplePerBin(sample_per_bin));
        }
        Ok(())
    }

    /// Validate the Huber transition parameter.
    pub fn validate_epsilon<T: Float>(epsilon: T) -> Result<(), KcorrError> {
        if !epsilon.is_finite() || epsilon <= T::one() {
            return Err(KcorrError::InvalidEpsilon(
                epsilon.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the number of reweighting iterations.
    pub fn validate_iterations(iterations: usize) -> Result<(), KcorrError> {
        const MAX_ITERATIONS: usize = 1000;
        if iterations == 0 || iterations > MAX_ITERATIONS {
            return Err(KcorrError::InvalidIterations(iterations));
        }
        Ok(())
    }

    /// Validate the convergence tolerance.
    pub fn validate_tolerance<T: Float>(tol: T) -> Result<(), KcorrError> {
        if !tol.is_finite() || tol <= T::zero() {
            return Err(KcorrError::InvalidTolerance(
                tol.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), KcorrError> {
        if let Some(param) = duplicate_param {
            return Err(KcorrError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
