//! Ordering utilities and the per-bin record table.
//!
//! ## Purpose
//!
//! This module provides the stable argsort used to order the catalog by
//! reference color, the digitize primitive used for interval membership, and
//! the fixed-shape record table holding one bin's members.
//!
//! ## Design notes
//!
//! * **Stability**: Uses stable sorting to preserve the relative order of equal values.
//! * **Typed columns**: The bin table has named, typed columns; there is no
//!   runtime name-based field lookup.
//!
//! ## Invariants
//!
//! * The argsort result is a valid permutation of `0..n`.
//! * All columns of a [`BinTable`] have equal length at all times.
//!
//! ## Non-goals
//!
//! * This module does not perform data validation or any fitting.

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;

// ============================================================================
// Ordering Functions
// ============================================================================

/// Indices that would sort `values` in ascending order (stable).
#[inline]
pub fn argsort<T: Float>(values: &[T]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    // Stable sort to preserve order of equal values for determinism
    order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));
    order
}

/// Number of edges less than or equal to `value`.
///
/// For non-decreasing `edges` this matches histogram bucketing with
/// closed-left/open-right intervals: the result `i` satisfies
/// `edges[i-1] <= value < edges[i]`, with 0 for values below the first edge
/// and `edges.len()` for values at or beyond the last.
#[inline]
pub fn digitize<T: Float>(value: T, edges: &[T]) -> usize {
    edges.partition_point(|&e| e <= value)
}

// ============================================================================
// Bin Table
// ============================================================================

/// One reference-color bin's members as a fixed-shape column table.
#[derive(Debug, Clone, PartialEq)]
pub struct BinTable<T> {
    /// Observed color of each member.
    pub observed: Vec<T>,

    /// Rest-frame reference color of each member.
    pub restframe: Vec<T>,

    /// Redshift of each member.
    pub redshift: Vec<T>,

    /// Regression weight of each member (filled by the weighting stage).
    pub weight: Vec<T>,
}

impl<T: Float> BinTable<T> {
    /// Gather the rows at `indices` from the full catalog columns.
    pub fn gather(observed: &[T], restframe: &[T], redshift: &[T], indices: &[usize]) -> Self {
        Self {
            observed: indices.iter().map(|&i| observed[i]).collect(),
            restframe: indices.iter().map(|&i| restframe[i]).collect(),
            redshift: indices.iter().map(|&i| redshift[i]).collect(),
            weight: Vec::new(),
        }
    }

    /// Number of member rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.redshift.len()
    }

    /// Whether the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.redshift.is_empty()
    }

    /// Reorder all columns so that redshift is ascending (stable).
    pub fn sort_by_redshift(&mut self) {
        let order = argsort(&self.redshift);

        // Fast path: already ordered
        if order.iter().enumerate().all(|(pos, &i)| pos == i) {
            return;
        }

        self.observed = order.iter().map(|&i| self.observed[i]).collect();
        self.restframe = order.iter().map(|&i| self.restframe[i]).collect();
        self.redshift = order.iter().map(|&i| self.redshift[i]).collect();
        if !self.weight.is_empty() {
            self.weight = order.iter().map(|&i| self.weight[i]).collect();
        }
    }

    /// Mean of the rest-frame reference color column.
    pub fn mean_restframe(&self) -> T {
        if self.is_empty() {
            return T::zero();
        }
        let sum = self
            .restframe
            .iter()
            .copied()
            .fold(T::zero(), |acc, v| acc + v);
        sum / T::from(self.len()).unwrap_or(T::one())
    }
}
