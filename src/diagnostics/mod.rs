//! Layer 4: Diagnostics
//!
//! # Purpose
//!
//! This layer provides the injected reporting collaborator. The numerical
//! core never prints or plots; everything a human might want to watch during
//! a fit flows through the [`report::Reporter`] trait, and the absence of a
//! sink cannot change a numerical result.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Diagnostics ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// The reporting collaborator trait and its standard sinks.
pub mod report;
