#![cfg(feature = "dev")]
//! Tests for the math layer: robust scale estimation and interpolation.
//!
//! ## Test Organization
//!
//! 1. **Median** - odd/even lengths, unordered input
//! 2. **NMAD** - known values, outlier resistance, Gaussian consistency
//! 3. **Interpolation** - interior, knot, and extrapolated queries

use approx::assert_relative_eq;

use kcorr::internals::math::interp::LinearInterpolator;
use kcorr::internals::math::scaling::{median_inplace, nmad, NMAD_CONSISTENCY};

// ============================================================================
// Median Tests
// ============================================================================

/// Test the median of an odd-length unordered slice.
#[test]
fn test_median_odd_length() {
    let mut vals = vec![3.0f64, 1.0, 2.0];
    assert_relative_eq!(median_inplace(&mut vals), 2.0, epsilon = 1e-12);
}

/// Test the median of an even-length slice (average of middle pair).
#[test]
fn test_median_even_length() {
    let mut vals = vec![4.0f64, 1.0, 3.0, 2.0];
    assert_relative_eq!(median_inplace(&mut vals), 2.5, epsilon = 1e-12);
}

/// Test the median of a single element and an empty slice.
#[test]
fn test_median_degenerate_lengths() {
    let mut single = vec![7.0f64];
    assert_relative_eq!(median_inplace(&mut single), 7.0, epsilon = 1e-12);

    let mut empty: Vec<f64> = Vec::new();
    assert_relative_eq!(median_inplace(&mut empty), 0.0, epsilon = 1e-12);
}

// ============================================================================
// NMAD Tests
// ============================================================================

/// Test NMAD against a hand-computed value.
///
/// values = [1, 2, 3, 4, 100]: median 3, |x - 3| = [2, 1, 0, 1, 97],
/// MAD = 1, NMAD = 1.4826.
#[test]
fn test_nmad_known_value() {
    let vals = vec![1.0f64, 2.0, 3.0, 4.0, 100.0];
    assert_relative_eq!(nmad(&vals), NMAD_CONSISTENCY, epsilon = 1e-12);
}

/// Test that a single wild outlier barely moves the NMAD.
#[test]
fn test_nmad_resists_outliers() {
    let clean: Vec<f64> = (0..101).map(|i| i as f64 * 0.01).collect();
    let mut polluted = clean.clone();
    polluted[50] = 1e6;

    let reference = nmad(&clean);
    assert!((nmad(&polluted) - reference).abs() < 0.05 * reference);
}

/// Test the Gaussian consistency of the scale factor.
///
/// For evenly spaced quantile-like data the NMAD tracks the spread; a
/// uniform grid on [0, 1] has MAD 0.25.
#[test]
fn test_nmad_uniform_grid() {
    let vals: Vec<f64> = (0..1001).map(|i| i as f64 / 1000.0).collect();
    assert_relative_eq!(nmad(&vals), NMAD_CONSISTENCY * 0.25, epsilon = 1e-3);
}

/// Test that constant input has zero NMAD.
#[test]
fn test_nmad_constant_input() {
    let vals = vec![5.0f64; 32];
    assert_relative_eq!(nmad(&vals), 0.0, epsilon = 1e-12);
}

// ============================================================================
// Interpolation Tests
// ============================================================================

/// Test exact reproduction at the knots.
#[test]
fn test_interpolator_hits_knots() {
    let interp =
        LinearInterpolator::new(vec![0.0f64, 1.0, 2.0], vec![10.0f64, 20.0, 40.0]).unwrap();

    assert_relative_eq!(interp.eval(0.0), 10.0, epsilon = 1e-12);
    assert_relative_eq!(interp.eval(1.0), 20.0, epsilon = 1e-12);
    assert_relative_eq!(interp.eval(2.0), 40.0, epsilon = 1e-12);
}

/// Test interior linear interpolation.
#[test]
fn test_interpolator_interior() {
    let interp =
        LinearInterpolator::new(vec![0.0f64, 1.0, 2.0], vec![10.0f64, 20.0, 40.0]).unwrap();

    assert_relative_eq!(interp.eval(0.5), 15.0, epsilon = 1e-12);
    assert_relative_eq!(interp.eval(1.5), 30.0, epsilon = 1e-12);
}

/// Test linear extrapolation beyond both ends.
#[test]
fn test_interpolator_extrapolates() {
    let interp =
        LinearInterpolator::new(vec![0.0f64, 1.0, 2.0], vec![10.0f64, 20.0, 40.0]).unwrap();

    // Below the first knot: continue the first segment (slope 10)
    assert_relative_eq!(interp.eval(-1.0), 0.0, epsilon = 1e-12);
    // Above the last knot: continue the last segment (slope 20)
    assert_relative_eq!(interp.eval(3.0), 60.0, epsilon = 1e-12);
}

/// Test batch evaluation matches scalar evaluation.
#[test]
fn test_interpolator_batch_matches_scalar() {
    let interp =
        LinearInterpolator::new(vec![0.0f64, 1.0, 2.0], vec![10.0f64, 20.0, 40.0]).unwrap();

    let queries = vec![-0.5, 0.25, 1.75, 2.5];
    let batch = interp.eval_many(&queries);
    for (q, b) in queries.iter().zip(batch.iter()) {
        assert_relative_eq!(interp.eval(*q), *b, epsilon = 1e-12);
    }
}

/// Test that malformed knot sets are refused.
#[test]
fn test_interpolator_rejects_bad_knots() {
    // Too few knots
    assert!(LinearInterpolator::new(vec![0.0f64], vec![1.0f64]).is_none());
    // Length mismatch
    assert!(LinearInterpolator::new(vec![0.0f64, 1.0], vec![1.0f64]).is_none());
    // Non-increasing x
    assert!(LinearInterpolator::new(vec![0.0f64, 0.0], vec![1.0f64, 2.0]).is_none());
}
