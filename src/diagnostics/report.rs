//! Progress reporting for correction fits.
//!
//! ## Purpose
//!
//! This module defines the reporting collaborator injected into the fitting
//! engine. Reporters receive per-bin populations, per-bin fit summaries, and
//! the survivor cutoff summary; they are strictly best-effort observers.
//!
//! ## Design notes
//!
//! * **Injected**: The engine takes `&dyn Reporter`; tests pass recording
//!   sinks, applications pass [`LogReporter`] or their own.
//! * **Object-safe**: All values cross the trait as `f64` so the trait has
//!   no generic methods.
//! * **Best-effort**: Methods return `()`; a reporter can never abort the
//!   numerical computation.
//!
//! ## Non-goals
//!
//! * This module does not render plots.
//! * This module does not buffer or aggregate; sinks decide that themselves.

// ============================================================================
// Reporter Trait
// ============================================================================

/// Observer for fitting progress. All methods default to no-ops.
pub trait Reporter {
    /// A free-form progress note (e.g., which color is being solved).
    fn note(&self, _message: &str) {}

    /// Population of one usable bin, in ascending boundary order.
    fn bin_population(&self, _bin: usize, _count: usize) {}

    /// Summary of one per-bin fit, in ascending boundary order.
    fn bin_fit(&self, _bin: usize, _mean_color: f64, _a1: f64, _nmad: f64) {}

    /// Outcome of the scatter cutoff over all fitted bins.
    fn survivor_summary(&self, _min_nmad: f64, _threshold: f64, _excluded: usize, _total: usize) {}
}

// ============================================================================
// Standard Sinks
// ============================================================================

/// Reporter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Reporter that emits through the `log` facade.
///
/// With no logger installed the calls are no-ops, so this is a safe default.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn note(&self, message: &str) {
        log::info!("{message}");
    }

    fn bin_population(&self, bin: usize, count: usize) {
        log::info!("{count} objects in bin {bin}");
    }

    fn bin_fit(&self, bin: usize, mean_color: f64, a1: f64, nmad: f64) {
        log::debug!("bin {bin}: mean color {mean_color:.4}, a1 {a1:.4}, nmad {nmad:.4}");
    }

    fn survivor_summary(&self, min_nmad: f64, threshold: f64, excluded: usize, total: usize) {
        log::info!("The minimum NMAD is {min_nmad}");
        log::info!(
            "{excluded} of {total} slope coefficients were excluded from the secondary fit by the cutoff of {threshold:.3}"
        );
    }
}
