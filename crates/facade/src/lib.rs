//! Differentially private set union.
//!
//! Re-exports the core mechanism and provides the row-level pipeline used to
//! answer grouping queries: group `(user, item)` rows by user, run the
//! mechanism, and keep the rows whose item was released.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod pipeline;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use dpsu_core as core;

pub use dpsu_core::{
    allocate_user_budget, laplace_noise, reservoir_sample, stable_order_key, DpsuError,
    LaplaceNoise, NoiseSource, PrivacyParams, ReleaseThresholds, Result, SetUnion,
    WeightedHistogram, ALPHA, USER_BUDGET,
};
pub use pipeline::{retain_released, set_union_of_rows};

/// Convenience prelude covering the whole surface.
pub mod prelude {
    pub use crate::pipeline::{retain_released, set_union_of_rows};
    pub use dpsu_core::prelude::*;
}
