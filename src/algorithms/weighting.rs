//! Redshift-density weighting within a reference-color bin.
//!
//! ## Purpose
//!
//! This module computes the per-row regression weights used by the per-bin
//! fits. The weight combines two corrections in a single formula:
//!
//! ```text
//! weight_j = (1 / nmad²) * (mean(sub-bin counts) / gal_nz_j)
//! ```
//!
//! where `nmad` is the bin's observed-color scatter and `gal_nz_j` is a
//! local estimate of the redshift density at row `j`, obtained by counting
//! members in equal-width redshift sub-bins and interpolating the counts at
//! each member's exact redshift. The density term flattens the effective
//! redshift distribution inside the bin; the scatter term downweights noisy
//! bins uniformly.
//!
//! ## Design notes
//!
//! * **Fixed granularity**: 40 sub-bin edges (39 sub-bins) spanning the
//!   bin's own redshift range, matching the reference procedure.
//! * **Counting**: Members are counted by bucketing against the 38 interior
//!   edges, so every count index pairs with a sub-bin center.
//! * **No clamping**: Interpolated densities are used as-is; the combined
//!   formula is preserved exactly, including its conflation of an
//!   across-bin scatter correction with a within-bin density correction.
//!
//! ## Invariants
//!
//! * The bin has at least 2 members, nonzero redshift spread, and nonzero
//!   observed-color scatter (enforced by the engine before this is called).
//!
//! ## Non-goals
//!
//! * This module does not perform the regression itself.
//! * This module does not validate the bin (the engine rejects degenerate
//!   bins explicitly).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::interp::LinearInterpolator;
use crate::primitives::sample::digitize;

/// Number of equal-width sub-bin edges spanning a bin's redshift range.
pub const REDSHIFT_EDGES: usize = 40;

// ============================================================================
// Density Weights
// ============================================================================

/// Compute per-row weights for one bin.
///
/// `redshift` holds the bin members' redshifts and `scatter` the bin's
/// observed-color NMAD. Returns `None` when the density interpolant cannot
/// be constructed (degenerate redshift spread).
pub fn density_weights<T: Float>(redshift: &[T], scatter: T) -> Option<Vec<T>> {
    let n = redshift.len();
    if n == 0 {
        return None;
    }

    let z_min = redshift.iter().copied().fold(T::infinity(), T::min);
    let z_max = redshift.iter().copied().fold(T::neg_infinity(), T::max);

    // Equal-width edges spanning the bin's own redshift range
    let edges = linspace(z_min, z_max, REDSHIFT_EDGES);
    let sub_bins = REDSHIFT_EDGES - 1;

    // Sub-bin centers
    let half = T::from(0.5).unwrap();
    let centers: Vec<T> = (0..sub_bins)
        .map(|i| edges[i] + (edges[i + 1] - edges[i]) * half)
        .collect();

    // Count members per sub-bin against the interior edges
    let interior = &edges[1..REDSHIFT_EDGES - 1];
    let mut counts = vec![T::zero(); sub_bins];
    for &z in redshift {
        let idx = digitize(z, interior);
        counts[idx] = counts[idx] + T::one();
    }

    let mean_count = counts.iter().copied().fold(T::zero(), |acc, c| acc + c)
        / T::from(sub_bins).unwrap();

    // Local density at every member's exact redshift
    let density = LinearInterpolator::new(centers, counts)?;
    let gal_nz = density.eval_many(redshift);

    let inv_scatter_sq = T::one() / (scatter * scatter);
    let weights = gal_nz
        .iter()
        .map(|&nz| inv_scatter_sq * (mean_count / nz))
        .collect();

    Some(weights)
}

// ============================================================================
// Helpers
// ============================================================================

/// `count` evenly spaced values from `start` to `end` inclusive.
fn linspace<T: Float>(start: T, end: T, count: usize) -> Vec<T> {
    let step = (end - start) / T::from(count - 1).unwrap();
    (0..count)
        .map(|i| {
            if i == count - 1 {
                end
            } else {
                start + step * T::from(i).unwrap()
            }
        })
        .collect()
}
