//! Core primitives for differentially private set union.
//!
//! Building blocks for releasing the union of per-user item sets under an
//! (eps, delta) guarantee: per-user contribution bounding, budgeted
//! water-filling into a shared weighted histogram, and noisy threshold
//! release.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod allocation;
pub mod error;
pub mod histogram;
pub mod mechanism;
pub mod noise;
pub mod order;
pub mod params;
pub mod sampling;

pub use allocation::{allocate_user_budget, USER_BUDGET};
pub use error::{DpsuError, Result};
pub use histogram::WeightedHistogram;
pub use mechanism::SetUnion;
pub use noise::{laplace_noise, LaplaceNoise, NoiseSource};
pub use order::stable_order_key;
pub use params::{PrivacyParams, ReleaseThresholds, ALPHA};
pub use sampling::reservoir_sample;

/// Common imports for downstream users.
pub mod prelude {
    pub use crate::{
        allocate_user_budget, laplace_noise, reservoir_sample, stable_order_key, DpsuError,
        LaplaceNoise, NoiseSource, PrivacyParams, ReleaseThresholds, Result, SetUnion,
        WeightedHistogram, ALPHA, USER_BUDGET,
    };
}
