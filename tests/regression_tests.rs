#![cfg(feature = "dev")]
//! Tests for the regression algorithms: weighted least squares, the Huber
//! IRLS fit, and the supporting binning/weighting internals.
//!
//! ## Test Organization
//!
//! 1. **WLS** - exact line recovery, weight sensitivity, degenerate systems
//! 2. **Huber IRLS** - outlier resistance versus plain least squares
//! 3. **Partitioning** - boundary layout and tie handling
//! 4. **Density Weights** - flattening behavior on skewed redshifts

use approx::assert_relative_eq;

use kcorr::internals::algorithms::binning::partition;
use kcorr::internals::algorithms::huber::HuberRegressor;
use kcorr::internals::algorithms::regression::LinearFit;
use kcorr::internals::algorithms::weighting::density_weights;

// ============================================================================
// WLS Tests
// ============================================================================

/// Test exact recovery of a noiseless line.
#[test]
fn test_wls_recovers_exact_line() {
    let x: Vec<f64> = (0..50).map(|i| i as f64 * 0.1).collect();
    let y: Vec<f64> = x.iter().map(|&xi| 3.0 * xi - 1.0).collect();
    let w = vec![1.0f64; 50];

    let fit = LinearFit::fit_wls(&x, &y, &w).unwrap();
    assert_relative_eq!(fit.slope, 3.0, epsilon = 1e-9);
    assert_relative_eq!(fit.intercept, -1.0, epsilon = 1e-9);
}

/// Test that uniform weight scaling does not change the solution.
#[test]
fn test_wls_invariant_to_weight_scale() {
    let x = vec![0.0f64, 1.0, 2.0, 3.0];
    let y = vec![1.0f64, 2.9, 5.1, 7.0];
    let w1 = vec![1.0f64; 4];
    let w2 = vec![250.0f64; 4];

    let a = LinearFit::fit_wls(&x, &y, &w1).unwrap();
    let b = LinearFit::fit_wls(&x, &y, &w2).unwrap();
    assert_relative_eq!(a.slope, b.slope, epsilon = 1e-9);
    assert_relative_eq!(a.intercept, b.intercept, epsilon = 1e-9);
}

/// Test that a zero-weight point is ignored.
#[test]
fn test_wls_ignores_zero_weight_points() {
    let x = vec![0.0f64, 1.0, 2.0, 3.0];
    let y = vec![0.0f64, 2.0, 4.0, 1000.0];
    let w = vec![1.0f64, 1.0, 1.0, 0.0];

    let fit = LinearFit::fit_wls(&x, &y, &w).unwrap();
    assert_relative_eq!(fit.slope, 2.0, epsilon = 1e-9);
    assert_relative_eq!(fit.intercept, 0.0, epsilon = 1e-9);
}

/// Test degenerate systems: no x spread, zero weights, empty input.
#[test]
fn test_wls_degenerate_systems() {
    // No spread in x
    let fit = LinearFit::fit_wls(&[1.0f64, 1.0], &[2.0, 3.0], &[1.0, 1.0]);
    assert!(fit.is_none());

    // All weights zero
    let fit = LinearFit::fit_wls(&[0.0f64, 1.0], &[2.0, 3.0], &[0.0, 0.0]);
    assert!(fit.is_none());

    // Empty
    let fit = LinearFit::<f64>::fit_wls(&[], &[], &[]);
    assert!(fit.is_none());
}

/// Test prediction and residual helpers.
#[test]
fn test_linear_fit_predict_and_residuals() {
    let fit = LinearFit {
        slope: 2.0f64,
        intercept: 1.0,
        x_mean: 0.0,
        y_mean: 0.0,
    };

    assert_relative_eq!(fit.predict(3.0), 7.0, epsilon = 1e-12);

    let preds = fit.predict_many(&[0.0, 1.0, 2.0]);
    assert_eq!(preds, vec![1.0, 3.0, 5.0]);

    let resid = fit.residuals(&[0.0, 1.0], &[1.5, 2.5]);
    assert_relative_eq!(resid[0], 0.5, epsilon = 1e-12);
    assert_relative_eq!(resid[1], -0.5, epsilon = 1e-12);
}

// ============================================================================
// Huber IRLS Tests
// ============================================================================

/// Test that the Huber fit shrugs off a planted outlier that drags the
/// plain least-squares fit away.
#[test]
fn test_huber_resists_planted_outlier() {
    let n = 60;
    let x: Vec<f64> = (0..n).map(|i| i as f64 * 0.05).collect();
    let mut y: Vec<f64> = x
        .iter()
        .enumerate()
        .map(|(i, &xi)| 1.5 * xi + 0.2 + 1e-2 * (i as f64 * 1.3).sin())
        .collect();
    y[30] += 50.0;
    let w = vec![1.0f64; n];

    let plain = LinearFit::fit_wls(&x, &y, &w).unwrap();
    let robust = HuberRegressor::default().fit(&x, &y, &w).unwrap();

    assert!(
        (robust.slope - 1.5).abs() < 0.05,
        "robust slope {} should stay near 1.5",
        robust.slope
    );
    assert!(
        (robust.slope - 1.5).abs() < (plain.slope - 1.5).abs(),
        "robust fit must beat plain WLS on contaminated data"
    );
}

/// Test that a noiseless line is returned exactly (early convergence).
#[test]
fn test_huber_exact_line() {
    let x: Vec<f64> = (0..20).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|&xi| -0.5 * xi + 4.0).collect();
    let w = vec![1.0f64; 20];

    let fit = HuberRegressor::default().fit(&x, &y, &w).unwrap();
    assert_relative_eq!(fit.slope, -0.5, epsilon = 1e-9);
    assert_relative_eq!(fit.intercept, 4.0, epsilon = 1e-9);
}

/// Test that sample weights steer the robust fit.
#[test]
fn test_huber_honors_sample_weights() {
    // Two interleaved lines; the heavily weighted one must win
    let x: Vec<f64> = (0..40).map(|i| (i / 2) as f64 * 0.1).collect();
    let y: Vec<f64> = x
        .iter()
        .enumerate()
        .map(|(i, &xi)| if i % 2 == 0 { 2.0 * xi } else { -2.0 * xi })
        .collect();
    let w: Vec<f64> = (0..40).map(|i| if i % 2 == 0 { 100.0 } else { 0.01 }).collect();

    let fit = HuberRegressor::default().fit(&x, &y, &w).unwrap();
    assert!(
        (fit.slope - 2.0).abs() < 0.2,
        "weighted fit slope {} should follow the heavy line",
        fit.slope
    );
}

/// Test degenerate robust fits return None.
#[test]
fn test_huber_degenerate_inputs() {
    let huber = HuberRegressor::<f64>::default();

    assert!(huber.fit(&[1.0], &[2.0], &[1.0]).is_none());
    assert!(huber.fit(&[1.0, 1.0], &[2.0, 3.0], &[1.0, 1.0]).is_none());
}

// ============================================================================
// Partitioning Tests
// ============================================================================

/// Test boundary layout for distinct values.
#[test]
fn test_partition_boundary_layout() {
    let colors: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let bins = partition(&colors, 4);

    // Boundaries at sorted positions 0, 4, 8 plus the maximum
    assert_eq!(bins.boundaries, vec![0.0, 4.0, 8.0, 9.0]);
    assert_eq!(bins.len(), 3);
    assert_eq!(bins.members[0], vec![0, 1, 2, 3]);
    assert_eq!(bins.members[1], vec![4, 5, 6, 7]);
    assert_eq!(bins.members[2], vec![8]);
    assert_eq!(bins.dropped, 1);
}

/// Test that assignment is by value: ties at a boundary go to the upper bin.
#[test]
fn test_partition_ties_follow_value() {
    let colors = vec![0.0f64, 1.0, 1.0, 1.0, 2.0, 3.0];
    let bins = partition(&colors, 2);

    // Boundaries: sorted[0]=0, sorted[2]=1, sorted[4]=2, max=3
    assert_eq!(bins.boundaries, vec![0.0, 1.0, 2.0, 3.0]);
    // All three 1.0 rows share the middle bin regardless of sort position
    assert_eq!(bins.members[0], vec![0]);
    assert_eq!(bins.members[1], vec![1, 2, 3]);
    assert_eq!(bins.members[2], vec![4]);
    assert_eq!(bins.dropped, 1);
}

/// Test that identical values leave every usable bin empty.
#[test]
fn test_partition_identical_values() {
    let colors = vec![0.5f64; 8];
    let bins = partition(&colors, 4);

    assert!(bins.members.iter().all(|m| m.is_empty()));
    assert_eq!(bins.dropped, 8);
}

// ============================================================================
// Density Weight Tests
// ============================================================================

/// Test that an even redshift grid produces near-uniform weights.
#[test]
fn test_density_weights_flat_for_uniform_redshifts() {
    let redshift: Vec<f64> = (0..390).map(|i| 0.04 + 0.26 * i as f64 / 389.0).collect();
    let weights = density_weights(&redshift, 1.0).unwrap();

    let mean = weights.iter().sum::<f64>() / weights.len() as f64;
    for w in &weights {
        assert!(w.is_finite() && *w > 0.0);
        assert!((w - mean).abs() < 0.5 * mean, "weight {w} far from mean {mean}");
    }
}

/// Test that sparse redshift regions receive larger weights.
#[test]
fn test_density_weights_upweight_sparse_redshifts() {
    // Dense cluster at low z, a thin tail at high z
    let mut redshift: Vec<f64> = (0..300).map(|i| 0.05 + 0.0001 * i as f64).collect();
    redshift.extend((0..30).map(|i| 0.20 + 0.003 * i as f64));
    let weights = density_weights(&redshift, 1.0).unwrap();

    let dense_mean = weights[..300].iter().sum::<f64>() / 300.0;
    let sparse_mean = weights[300..].iter().sum::<f64>() / 30.0;
    assert!(
        sparse_mean > dense_mean,
        "sparse tail mean {sparse_mean} should exceed dense mean {dense_mean}"
    );
}

/// Test that the scatter factor scales all weights by 1/nmad^2.
#[test]
fn test_density_weights_scale_with_scatter() {
    let redshift: Vec<f64> = (0..100).map(|i| 0.04 + 0.002 * i as f64).collect();

    let unit = density_weights(&redshift, 1.0).unwrap();
    let halved = density_weights(&redshift, 2.0).unwrap();

    for (u, h) in unit.iter().zip(halved.iter()) {
        assert_relative_eq!(u / 4.0, h, max_relative = 1e-9);
    }
}
