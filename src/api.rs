//! High-level API for correction fitting.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder pattern for configuring the fit and produces an executable
//! [`CorrectionModel`].
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated when `build()` is called.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! * **Configuration Flow**: Builder pattern ending in `.build()`, then
//!   `fit` (or `fit_with_reporter`) on the resulting model.
//! * **Diagnostics**: `fit` reports through [`LogReporter`];
//!   `fit_with_reporter` injects any [`Reporter`] without affecting the
//!   numerical result.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`KcorrectionBuilder`] via `Kcorrection::new()`.
//! 2. Chain configuration methods (`.sample_per_bin()`, `.color_name()`, etc.).
//! 3. Call `.build()` to validate and obtain a [`CorrectionModel`].
//! 4. Call `.fit(&observed, &restframe, &redshift)`.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::executor;
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::algorithms::huber::HuberRegressor;
pub use crate::algorithms::regression::LinearFit;
pub use crate::diagnostics::report::{LogReporter, NullReporter, Reporter};
pub use crate::engine::executor::{CorrectionConfig, NMAD_CUTOFF};
pub use crate::engine::output::{BinFit, CorrectionFit};
pub use crate::primitives::errors::KcorrError;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring a correction fit.
#[derive(Debug, Clone)]
pub struct KcorrectionBuilder<T> {
    /// Target population per reference-color bin.
    pub sample_per_bin: Option<usize>,

    /// Diagnostic label for the observed color.
    pub color_name: Option<String>,

    /// Report per-bin populations.
    pub check_bins: Option<bool>,

    /// Report per-bin fit summaries.
    pub check_fits: Option<bool>,

    /// Huber transition parameter.
    pub epsilon: Option<T>,

    /// Iteration cap for the reweighting loops.
    pub max_iterations: Option<usize>,

    /// Relative convergence tolerance for the reweighting loops.
    pub tolerance: Option<T>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for KcorrectionBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> KcorrectionBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            sample_per_bin: None,
            color_name: None,
            check_bins: None,
            check_fits: None,
            epsilon: None,
            max_iterations: None,
            tolerance: None,
            duplicate_param: None,
        }
    }

    /// Set the target population per reference-color bin.
    ///
    /// Aim for roughly 20 usable bins; use `check_bins` to verify the
    /// populations come out approximately equal.
    pub fn sample_per_bin(mut self, sample_per_bin: usize) -> Self {
        if self.sample_per_bin.is_some() {
            self.duplicate_param = Some("sample_per_bin");
        }
        self.sample_per_bin = Some(sample_per_bin);
        self
    }

    /// Set the diagnostic label for the observed color.
    pub fn color_name(mut self, name: &str) -> Self {
        if self.color_name.is_some() {
            self.duplicate_param = Some("color_name");
        }
        self.color_name = Some(name.to_string());
        self
    }

    /// Enable or disable per-bin population reporting.
    pub fn check_bins(mut self, enabled: bool) -> Self {
        if self.check_bins.is_some() {
            self.duplicate_param = Some("check_bins");
        }
        self.check_bins = Some(enabled);
        self
    }

    /// Enable or disable per-bin fit reporting.
    pub fn check_fits(mut self, enabled: bool) -> Self {
        if self.check_fits.is_some() {
            self.duplicate_param = Some("check_fits");
        }
        self.check_fits = Some(enabled);
        self
    }

    /// Set the Huber transition parameter (default 1.01).
    pub fn epsilon(mut self, epsilon: T) -> Self {
        if self.epsilon.is_some() {
            self.duplicate_param = Some("epsilon");
        }
        self.epsilon = Some(epsilon);
        self
    }

    /// Set the iteration cap for the reweighting loops (default 100).
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        if self.max_iterations.is_some() {
            self.duplicate_param = Some("max_iterations");
        }
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Set the convergence tolerance for the reweighting loops (default 1e-8).
    pub fn tolerance(mut self, tolerance: T) -> Self {
        if self.tolerance.is_some() {
            self.duplicate_param = Some("tolerance");
        }
        self.tolerance = Some(tolerance);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Validate the configuration and build the executable model.
    pub fn build(self) -> Result<CorrectionModel<T>, KcorrError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let defaults = CorrectionConfig::<T>::default();
        let config = CorrectionConfig {
            sample_per_bin: self.sample_per_bin.unwrap_or(defaults.sample_per_bin),
            color_name: self.color_name.unwrap_or(defaults.color_name),
            check_bins: self.check_bins.unwrap_or(defaults.check_bins),
            check_fits: self.check_fits.unwrap_or(defaults.check_fits),
            epsilon: self.epsilon.unwrap_or(defaults.epsilon),
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            tolerance: self.tolerance.unwrap_or(defaults.tolerance),
        };

        Validator::validate_sample_per_bin(config.sample_per_bin)?;
        Validator::validate_epsilon(config.epsilon)?;
        Validator::validate_iterations(config.max_iterations)?;
        Validator::validate_tolerance(config.tolerance)?;

        Ok(CorrectionModel { config })
    }
}

// ============================================================================
// Correction Model
// ============================================================================

/// Executable correction fitter.
#[derive(Debug, Clone)]
pub struct CorrectionModel<T> {
    config: CorrectionConfig<T>,
}

impl<T: Float + Send + Sync> CorrectionModel<T> {
    /// Fit the correction model to a catalog, reporting through the `log`
    /// facade.
    ///
    /// The caller is responsible for catalog cleaning (sentinel values,
    /// redshift/error selection cuts) before this call; non-finite inputs
    /// are rejected.
    pub fn fit(
        &self,
        observed: &[T],
        restframe: &[T],
        redshift: &[T],
    ) -> Result<CorrectionFit<T>, KcorrError> {
        self.fit_with_reporter(observed, restframe, redshift, &LogReporter)
    }

    /// Fit the correction model with an injected diagnostic sink.
    pub fn fit_with_reporter(
        &self,
        observed: &[T],
        restframe: &[T],
        redshift: &[T],
        reporter: &dyn Reporter,
    ) -> Result<CorrectionFit<T>, KcorrError> {
        Validator::validate_inputs(observed, restframe, redshift)?;
        executor::run(observed, restframe, redshift, &self.config, reporter)
    }

    /// The validated configuration this model runs with.
    pub fn config(&self) -> &CorrectionConfig<T> {
        &self.config
    }
}
