//! # kcorr: Empirical K-corrections from two-stage robust regression
//!
//! Fits an empirical "K-correction" style coefficient that maps an observed
//! photometric color of a galaxy, together with its redshift, to a rest-frame
//! color. The model assumes a rest-frame color of the form
//! `0(X-Y) = (X-Y) - a1 * z`, where the coefficient `a1` itself varies with a
//! second, well-behaved rest-frame reference color.
//!
//! ## How it works
//!
//! The catalog is split into bins of approximately equal population over the
//! reference rest-frame color. Within each bin, a robust (Huber) linear
//! regression of observed color against redshift is solved, weighted so that
//! the effective redshift distribution inside the bin is flat. Bins whose fit
//! residual scatter is anomalously large relative to the best-behaved bin are
//! discarded, and the surviving per-bin slope coefficients (`a1`) are fitted
//! robustly against the per-bin mean reference color. The resulting linear
//! model predicts `a1` for arbitrary new reference colors.
//!
//! ## Quick Start
//!
//! ```rust
//! use kcorr::prelude::*;
//!
//! // Synthetic catalog: observed = restframe + 2.0 * z, with the redshifts
//! // spread evenly and independently of the reference color.
//! let n = 400;
//! let mut observed = Vec::new();
//! let mut restframe = Vec::new();
//! let mut redshift = Vec::new();
//! for j in 0..n {
//!     let m = j % 100;
//!     let u = if m % 2 == 0 { m / 2 } else { 99 - m / 2 };
//!     let color = j as f64 / n as f64;
//!     let z = 0.05 + 0.25 * u as f64 / 99.0;
//!     observed.push(color + 2.0 * z + 1e-3 * (j as f64 * 0.7).sin());
//!     restframe.push(color);
//!     redshift.push(z);
//! }
//!
//! // Build the model
//! let model = Kcorrection::new()
//!     .sample_per_bin(100)    // Target population per reference-color bin
//!     .color_name("g-r")      // Diagnostic label only
//!     .build()?;
//!
//! // Fit the model to the catalog
//! let fit = model.fit(&observed, &restframe, &redshift)?;
//!
//! // Predict the correction coefficient at any reference color
//! let a1 = fit.predict(0.5);
//! assert!((a1 - 2.0).abs() < 0.2);
//! # Result::<(), KcorrError>::Ok(())
//! ```
//!
//! ## Result and Error Handling
//!
//! The `fit` method returns a `Result<CorrectionFit<T>, KcorrError>`.
//!
//! - **`Ok(CorrectionFit<T>)`**: Contains the slope model, the surviving
//!   per-bin coefficients, and per-bin summaries.
//! - **`Err(KcorrError)`**: Indicates a failure (e.g., mismatched input
//!   lengths, a degenerate bin, or an empty survivor set).
//!
//! The `?` operator is idiomatic. Catalog cleaning (sentinel values,
//! redshift/error selection cuts) is the caller's responsibility and must
//! happen before `fit` is invoked; non-finite inputs are rejected outright.
//!
//! ## Diagnostics
//!
//! Progress reporting (per-bin populations, per-bin fit summaries, the
//! survivor cutoff) goes through an injected [`Reporter`](prelude::Reporter)
//! collaborator. The default sink logs through the `log` facade; with no
//! logger installed the calls are no-ops, so diagnostics can never change a
//! numerical result.
//!
//! ## References
//!
//! - Hogg, D. W. et al. (2002). "The K correction"
//! - Huber, P. J. (1964). "Robust Estimation of a Location Parameter"

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Algorithms - binning, weighting, and robust regression.
mod algorithms;

// Layer 4: Diagnostics - injected reporting collaborator.
mod diagnostics;

// Layer 5: Engine - orchestration and execution control.
mod engine;

// High-level fluent API for correction fitting.
mod api;

// Standard kcorr prelude.
pub mod prelude {
    pub use crate::api::{
        BinFit, CorrectionFit, CorrectionModel, KcorrError, KcorrectionBuilder as Kcorrection,
        LogReporter, NullReporter, Reporter,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod diagnostics {
        pub use crate::diagnostics::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
