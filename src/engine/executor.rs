//! Execution engine for correction fitting.
//!
//! ## Purpose
//!
//! This module orchestrates the fitting pipeline: partition the catalog into
//! reference-color bins, solve a weighted robust regression per bin, apply
//! the scatter cutoff, and fit the surviving slope coefficients against the
//! per-bin mean reference colors.
//!
//! ## Design notes
//!
//! * **Determinism**: Bins are processed and reported in ascending boundary
//!   order. With the `parallel` feature the per-bin fits fan out onto a
//!   rayon pool, results are collected into a bin-indexed vector, and all
//!   reporting happens sequentially afterwards; errors surface for the
//!   lowest-index failing bin.
//! * **Isolation**: Each bin's fit reads only its own member rows; there is
//!   no shared mutable state across bins.
//! * **Explicit failure**: Degenerate bins abort the call with a typed
//!   error; nothing is skipped silently and NaN never propagates.
//!
//! ## Invariants
//!
//! * Inputs are validated (equal lengths, finite) before this runs.
//! * Every usable bin yields exactly one `(mean_color, a1, nmad)` triple or
//!   a fatal error.
//!
//! ## Non-goals
//!
//! * This module does not validate input data (handled by `validator`).
//! * This module does not format results (handled by `output`).

// External dependencies
use num_traits::Float;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Internal dependencies
use crate::algorithms::binning::{self, ColorBins};
use crate::algorithms::huber::HuberRegressor;
use crate::algorithms::weighting::density_weights;
use crate::diagnostics::report::Reporter;
use crate::engine::output::{BinFit, CorrectionFit};
use crate::math::scaling::nmad;
use crate::primitives::errors::KcorrError;
use crate::primitives::sample::BinTable;

/// Fixed multiplicative scatter cutoff: bins with a fit-residual NMAD at or
/// above this multiple of the best bin's are excluded from the secondary fit.
pub const NMAD_CUTOFF: f64 = 2.5;

/// Minimum surviving bins required to constrain the slope model.
const MIN_SURVIVORS: usize = 2;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for one correction fit.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionConfig<T> {
    /// Target population per reference-color bin.
    pub sample_per_bin: usize,

    /// Diagnostic label for the observed color (reporting only).
    pub color_name: String,

    /// Report per-bin populations.
    pub check_bins: bool,

    /// Report per-bin fit summaries.
    pub check_fits: bool,

    /// Huber transition parameter for both fitting stages.
    pub epsilon: T,

    /// Iteration cap for the reweighting loops.
    pub max_iterations: usize,

    /// Relative convergence tolerance for the reweighting loops.
    pub tolerance: T,
}

impl<T: Float> Default for CorrectionConfig<T> {
    fn default() -> Self {
        let huber = HuberRegressor::default();
        Self {
            sample_per_bin: 5000,
            color_name: String::new(),
            check_bins: true,
            check_fits: true,
            epsilon: huber.epsilon,
            max_iterations: huber.max_iterations,
            tolerance: huber.tolerance,
        }
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Run the full fitting pipeline over a validated catalog.
pub fn run<T: Float + Send + Sync>(
    observed: &[T],
    restframe: &[T],
    redshift: &[T],
    config: &CorrectionConfig<T>,
    reporter: &dyn Reporter,
) -> Result<CorrectionFit<T>, KcorrError> {
    let huber = HuberRegressor::new(config.epsilon, config.max_iterations, config.tolerance);

    // Stage 1: equal-population bins over the reference color
    let bins = binning::partition(restframe, config.sample_per_bin);

    if config.check_bins {
        for (i, members) in bins.members.iter().enumerate() {
            reporter.bin_population(i + 1, members.len());
        }
    }
    if !config.color_name.is_empty() {
        reporter.note(&format!("Solving for observed ({}) color.", config.color_name));
    }

    // Stage 2: weighted robust fit per bin
    let mut fitted = fit_bins(observed, restframe, redshift, &bins, &huber)?;

    if config.check_fits {
        for (i, bin) in fitted.iter().enumerate() {
            reporter.bin_fit(
                i + 1,
                bin.mean_color.to_f64().unwrap_or(f64::NAN),
                bin.a1.to_f64().unwrap_or(f64::NAN),
                bin.nmad.to_f64().unwrap_or(f64::NAN),
            );
        }
    }

    // Stage 3: scatter cutoff relative to the best-behaved bin
    let min_nmad = fitted
        .iter()
        .map(|b| b.nmad)
        .fold(T::infinity(), T::min);
    let threshold = T::from(NMAD_CUTOFF).unwrap() * min_nmad;

    let mut a1s = Vec::new();
    let mut mean_colors = Vec::new();
    for bin in fitted.iter_mut() {
        if bin.nmad < threshold {
            bin.survived = true;
            a1s.push(bin.a1);
            mean_colors.push(bin.mean_color);
        }
    }

    reporter.survivor_summary(
        min_nmad.to_f64().unwrap_or(f64::NAN),
        threshold.to_f64().unwrap_or(f64::NAN),
        fitted.len() - a1s.len(),
        fitted.len(),
    );

    if a1s.is_empty() {
        return Err(KcorrError::AllBinsExcluded {
            min_nmad: min_nmad.to_f64().unwrap_or(f64::NAN),
            threshold: threshold.to_f64().unwrap_or(f64::NAN),
        });
    }
    if a1s.len() < MIN_SURVIVORS {
        return Err(KcorrError::TooFewSurvivors {
            got: a1s.len(),
            min: MIN_SURVIVORS,
        });
    }

    // Stage 4: robust fit of the slope coefficients vs. mean reference color
    let unit_weights = vec![T::one(); a1s.len()];
    let model = huber
        .fit(&mean_colors, &a1s, &unit_weights)
        .ok_or(KcorrError::DegenerateSecondaryFit { points: a1s.len() })?;

    Ok(CorrectionFit {
        model,
        a1s,
        mean_colors,
        bins: fitted,
        min_nmad,
        dropped_rows: bins.dropped,
    })
}

// ============================================================================
// Per-Bin Fitting
// ============================================================================

/// Fit every usable bin, serially or on a rayon pool.
///
/// Results come back in ascending boundary order either way; on failure the
/// error of the lowest-index failing bin is returned.
fn fit_bins<T: Float + Send + Sync>(
    observed: &[T],
    restframe: &[T],
    redshift: &[T],
    bins: &ColorBins<T>,
    huber: &HuberRegressor<T>,
) -> Result<Vec<BinFit<T>>, KcorrError> {
    let fit_one = |index: usize, members: &[usize]| -> Result<BinFit<T>, KcorrError> {
        fit_bin(observed, restframe, redshift, bins, index, members, huber)
    };

    #[cfg(feature = "parallel")]
    let results: Vec<Result<BinFit<T>, KcorrError>> = bins
        .members
        .par_iter()
        .enumerate()
        .map(|(i, members)| fit_one(i, members))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<BinFit<T>, KcorrError>> = bins
        .members
        .iter()
        .enumerate()
        .map(|(i, members)| fit_one(i, members))
        .collect();

    let mut fitted = Vec::with_capacity(results.len());
    for result in results {
        fitted.push(result?);
    }
    Ok(fitted)
}

/// Solve the weighted robust regression for one bin.
fn fit_bin<T: Float>(
    observed: &[T],
    restframe: &[T],
    redshift: &[T],
    bins: &ColorBins<T>,
    index: usize,
    members: &[usize],
    huber: &HuberRegressor<T>,
) -> Result<BinFit<T>, KcorrError> {
    let bin = index + 1;
    let count = members.len();
    if count < 2 {
        return Err(KcorrError::DegenerateBin { bin, points: count });
    }

    let mut table = BinTable::gather(observed, restframe, redshift, members);
    table.sort_by_redshift();

    // Redshift spread is required for both weighting and the slope
    if table.redshift[count - 1] <= table.redshift[0] {
        return Err(KcorrError::ConstantRedshift { bin });
    }

    // Overall observed-color scatter of the bin
    let scatter = nmad(&table.observed);
    if scatter <= T::zero() {
        return Err(KcorrError::ZeroScatter { bin });
    }

    // Redshift-density weights flattening the effective n(z)
    let weights =
        density_weights(&table.redshift, scatter).ok_or(KcorrError::ConstantRedshift { bin })?;
    if weights.iter().any(|w| !w.is_finite()) {
        return Err(KcorrError::DegenerateFit { bin });
    }
    table.weight = weights;

    // Robust linear fit of observed color on redshift
    let model = huber
        .fit(&table.redshift, &table.observed, &table.weight)
        .ok_or(KcorrError::DegenerateFit { bin })?;

    // Residual scatter of this fit (distinct from the raw scatter above)
    let residuals = model.residuals(&table.redshift, &table.observed);
    let residual_nmad = nmad(&residuals);

    let (lower, upper) = bins.bounds(index);

    Ok(BinFit {
        lower,
        upper,
        count,
        mean_color: table.mean_restframe(),
        a1: model.slope,
        nmad: residual_nmad,
        survived: false,
    })
}
