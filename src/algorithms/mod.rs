//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer provides the core fitting algorithms:
//! - Weighted least squares and the linear fit type
//! - Robust (Huber) iteratively reweighted least squares
//! - Equal-population reference-color binning
//! - Redshift-density weighting
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Diagnostics
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Weighted least squares and the linear fit type.
pub mod regression;

/// Robust (Huber) iteratively reweighted least squares.
pub mod huber;

/// Equal-population reference-color binning.
pub mod binning;

/// Redshift-density weighting.
pub mod weighting;
