//! Privacy parameters and release threshold derivation.

use crate::error::{DpsuError, Result};

/// Gap between the release threshold and the saturation target, in units of
/// the Laplace scale.
pub const ALPHA: f64 = 3.0;

/// Privacy parameters for a set-union release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrivacyParams {
    /// Epsilon, > 0.
    pub eps: f64,
    /// Delta, in (0, 1).
    pub delta: f64,
    /// Maximum number of items kept per user.
    pub max_contrib: usize,
}

impl PrivacyParams {
    /// Default maximum per-user contribution.
    pub const DEFAULT_MAX_CONTRIB: usize = 5;

    /// Default delta, `e^-10`.
    pub fn default_delta() -> f64 {
        (-10.0f64).exp()
    }

    /// Create parameters with the default delta and contribution bound.
    pub fn new(eps: f64) -> Result<Self> {
        let params = Self {
            eps,
            delta: Self::default_delta(),
            max_contrib: Self::DEFAULT_MAX_CONTRIB,
        };
        params.validate()?;
        Ok(params)
    }

    /// Set delta.
    pub fn with_delta(mut self, delta: f64) -> Result<Self> {
        self.delta = delta;
        self.validate()?;
        Ok(self)
    }

    /// Set the per-user contribution bound.
    pub fn with_max_contrib(mut self, max_contrib: usize) -> Result<Self> {
        self.max_contrib = max_contrib;
        self.validate()?;
        Ok(self)
    }

    /// Laplace scale used for noise and threshold derivation.
    pub fn lambda(&self) -> f64 {
        1.0 / self.eps
    }

    /// Validate parameters.
    pub fn validate(&self) -> Result<()> {
        if !self.eps.is_finite() || self.eps <= 0.0 {
            return Err(DpsuError::invalid("eps must be positive and finite"));
        }
        if !self.delta.is_finite() || self.delta <= 0.0 || self.delta >= 1.0 {
            return Err(DpsuError::invalid("delta must be in (0, 1)"));
        }
        if self.max_contrib == 0 {
            return Err(DpsuError::invalid("max_contrib must be positive"));
        }
        Ok(())
    }
}

/// Derived release thresholds, fixed for a whole run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReleaseThresholds {
    /// Laplace noise scale, `1 / eps`.
    pub lambda: f64,
    /// Noisy-weight cutoff above which an item is released.
    pub rho: f64,
    /// Histogram weight at which an item needs no further contributions.
    pub gamma: f64,
}

impl ReleaseThresholds {
    /// Derive thresholds from privacy parameters.
    ///
    /// `rho` is the maximum over `i in 1..=max_contrib` of
    /// `1/i + lambda * ln(1 / (2 * (1 - (1 - delta)^(1/i))))`, and
    /// `gamma = rho + ALPHA * lambda`. The derivation depends only on the
    /// parameters, never on data.
    pub fn derive(params: &PrivacyParams) -> Result<Self> {
        params.validate()?;
        let lambda = params.lambda();

        let mut rho = f64::NEG_INFINITY;
        for i in 1..=params.max_contrib {
            let i = i as f64;
            let tail = 1.0 - (1.0 - params.delta).powf(1.0 / i);
            let arg = 1.0 / (2.0 * tail);
            if !arg.is_finite() || arg <= 0.0 {
                return Err(DpsuError::numerical(format!(
                    "release threshold undefined for delta={:e} at i={}",
                    params.delta, i
                )));
            }
            rho = rho.max(1.0 / i + lambda * arg.ln());
        }
        if !rho.is_finite() {
            return Err(DpsuError::numerical(
                "release threshold did not evaluate to a finite value",
            ));
        }

        Ok(Self {
            lambda,
            rho,
            gamma: rho + ALPHA * lambda,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = PrivacyParams::new(1.0).expect("valid params");
        assert_eq!(p.max_contrib, 5);
        assert!((p.delta - (-10.0f64).exp()).abs() < 1e-18);
        assert!((p.lambda() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(PrivacyParams::new(0.0).is_err());
        assert!(PrivacyParams::new(-1.0).is_err());
        assert!(PrivacyParams::new(f64::NAN).is_err());
        assert!(PrivacyParams::new(1.0).unwrap().with_delta(0.0).is_err());
        assert!(PrivacyParams::new(1.0).unwrap().with_delta(1.0).is_err());
        assert!(PrivacyParams::new(1.0).unwrap().with_max_contrib(0).is_err());
    }

    #[test]
    fn test_thresholds_single_contribution() {
        // For max_contrib = 1 the maximum collapses to its only term:
        // rho = 1 + lambda * ln(1 / (2 * delta)).
        let params = PrivacyParams::new(1.0)
            .unwrap()
            .with_max_contrib(1)
            .unwrap();
        let t = ReleaseThresholds::derive(&params).expect("thresholds");
        let expected = 1.0 + (0.5 * (10.0f64).exp()).ln();
        assert!((t.rho - expected).abs() < 1e-9);
        assert!((t.gamma - (expected + 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_thresholds_take_max_over_terms() {
        let params = PrivacyParams::new(1.0)
            .unwrap()
            .with_max_contrib(2)
            .unwrap();
        let t = ReleaseThresholds::derive(&params).expect("thresholds");

        let delta = PrivacyParams::default_delta();
        let term1 = 1.0 + (1.0 / (2.0 * delta)).ln();
        let term2 = 0.5 + (1.0 / (2.0 * (1.0 - (1.0 - delta).sqrt()))).ln();
        assert!((t.rho - term1.max(term2)).abs() < 1e-9);
        assert!(t.gamma > t.rho);
    }

    #[test]
    fn test_degenerate_delta_is_reported() {
        // Small enough that 1 - delta rounds to 1.0, sending the logarithm
        // argument to infinity.
        let params = PrivacyParams::new(1.0)
            .unwrap()
            .with_delta(1e-300)
            .unwrap();
        let err = ReleaseThresholds::derive(&params).unwrap_err();
        assert!(matches!(err, DpsuError::NumericalError { .. }));
    }
}
