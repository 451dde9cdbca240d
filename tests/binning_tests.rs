//! Tests for the equal-population binning contract, observed through the
//! public fit result.
//!
//! The catalogs here are fully deterministic: reference colors are distinct
//! and ascending, and each bin receives an evenly spaced redshift grid that
//! is decoupled from the color ordering. That keeps the focus on the binning
//! structure rather than on fit quality.
//!
//! ## Test Organization
//!
//! 1. **Coverage** - every row in exactly one usable bin or dropped
//! 2. **Boundaries** - non-decreasing, closing boundary at the maximum
//! 3. **Populations** - target population except the last usable bin

use kcorr::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

/// Deterministic catalog: distinct ascending colors, an interleaved even
/// redshift grid per block of `period` rows, and a clean linear relation.
fn structured_catalog(n: usize, period: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut observed = Vec::with_capacity(n);
    let mut restframe = Vec::with_capacity(n);
    let mut redshift = Vec::with_capacity(n);

    for j in 0..n {
        let m = j % period;
        // Interleave low and high grid points so redshift is uncorrelated
        // with the in-bin color ordering.
        let u = if m % 2 == 0 { m / 2 } else { period - 1 - m / 2 };
        let color = j as f64 / n as f64;
        let z = 0.04 + 0.26 * u as f64 / (period - 1) as f64;

        observed.push(color + 2.0 * z + 1e-3 * (j as f64 * 0.7).sin());
        restframe.push(color);
        redshift.push(z);
    }

    (observed, restframe, redshift)
}

fn fit(
    observed: &[f64],
    restframe: &[f64],
    redshift: &[f64],
    sample_per_bin: usize,
) -> CorrectionFit<f64> {
    Kcorrection::new()
        .sample_per_bin(sample_per_bin)
        .build()
        .unwrap()
        .fit_with_reporter(observed, restframe, redshift, &NullReporter)
        .unwrap()
}

// ============================================================================
// Coverage Tests
// ============================================================================

/// Test that bin populations plus dropped rows account for every input row.
#[test]
fn test_rows_are_fully_accounted_for() {
    let (observed, restframe, redshift) = structured_catalog(2_000, 100);
    let result = fit(&observed, &restframe, &redshift, 100);

    let assigned: usize = result.bins.iter().map(|b| b.count).sum();
    assert_eq!(assigned + result.dropped_rows, 2_000);
}

/// Test that only the maximum-color row is dropped for an exact multiple.
#[test]
fn test_exact_multiple_drops_only_the_maximum() {
    let (observed, restframe, redshift) = structured_catalog(2_000, 100);
    let result = fit(&observed, &restframe, &redshift, 100);

    assert_eq!(result.dropped_rows, 1);
}

// ============================================================================
// Boundary Tests
// ============================================================================

/// Test that bin boundaries are non-decreasing and contiguous.
#[test]
fn test_boundaries_are_ordered_and_contiguous() {
    let (observed, restframe, redshift) = structured_catalog(2_000, 100);
    let result = fit(&observed, &restframe, &redshift, 100);

    for window in result.bins.windows(2) {
        assert!(window[0].lower <= window[0].upper);
        assert_eq!(window[0].upper, window[1].lower);
    }

    // Closing boundary sits at the global maximum
    let max_color = restframe.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(result.bins.last().unwrap().upper, max_color);
}

/// Test that each bin's mean color lies inside its boundaries.
#[test]
fn test_mean_color_within_bounds() {
    let (observed, restframe, redshift) = structured_catalog(2_000, 100);
    let result = fit(&observed, &restframe, &redshift, 100);

    for bin in &result.bins {
        assert!(bin.lower <= bin.mean_color && bin.mean_color <= bin.upper);
    }
}

// ============================================================================
// Population Tests
// ============================================================================

/// Test populations for an exact multiple of the target.
///
/// Interior bins hold exactly the target; the last usable bin is short by
/// the one dropped maximum row.
#[test]
fn test_populations_for_exact_multiple() {
    let (observed, restframe, redshift) = structured_catalog(2_000, 100);
    let result = fit(&observed, &restframe, &redshift, 100);

    assert_eq!(result.bins_fitted(), 20);
    for bin in &result.bins[..19] {
        assert_eq!(bin.count, 100);
    }
    assert_eq!(result.bins[19].count, 99);
}

/// Test populations when the row count is not a multiple of the target.
///
/// The extra rows form an undersized final usable bin, which is still
/// fitted.
#[test]
fn test_partial_final_bin_is_fitted() {
    let (observed, restframe, redshift) = structured_catalog(2_050, 100);
    let result = fit(&observed, &restframe, &redshift, 100);

    assert_eq!(result.bins_fitted(), 21);
    for bin in &result.bins[..20] {
        assert_eq!(bin.count, 100);
    }
    assert_eq!(result.bins[20].count, 49);
    assert_eq!(result.dropped_rows, 1);
}
