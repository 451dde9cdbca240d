//! Robust scale estimation using the normalized median absolute deviation.
//!
//! This module provides the NMAD scale estimator, which is resistant to
//! outliers, together with the quickselect median it is built on.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

/// Consistency factor making the MAD match the standard deviation for
/// Gaussian data.
pub const NMAD_CONSISTENCY: f64 = 1.4826;

/// Compute the median in-place using Quickselect.
#[inline]
pub fn median_inplace<T: Float>(vals: &mut [T]) -> T {
    let n = vals.len();
    if n == 0 {
        return T::zero();
    }

    let mid = n / 2;

    if n % 2 == 0 {
        // Even length: average of two middle values
        vals.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Equal));
        let upper = vals[mid];

        // Find the largest value in the lower half using simple loop
        let mut lower = vals[0];
        let mut i = 1;
        while i < mid {
            if vals[i] > lower {
                lower = vals[i];
            }
            i += 1;
        }

        (lower + upper) / T::from(2.0).unwrap_or(T::one() + T::one())
    } else {
        // Odd length: middle value
        vals.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Equal));
        vals[mid]
    }
}

/// Compute the normalized median absolute deviation (NMAD).
///
/// # Formula
///
/// ```text
/// nmad(x) = 1.4826 * median(|x - median(x)|)
/// ```
pub fn nmad<T: Float>(values: &[T]) -> T {
    if values.is_empty() {
        return T::zero();
    }

    let mut work = values.to_vec();

    // Step 1: Compute median of values
    let median = median_inplace(&mut work);

    // Step 2: Compute absolute deviations from median
    work.copy_from_slice(values);
    for val in work.iter_mut() {
        *val = (*val - median).abs();
    }

    // Step 3: Return scaled median of absolute deviations
    let mad = median_inplace(&mut work);
    T::from(NMAD_CONSISTENCY).unwrap() * mad
}
