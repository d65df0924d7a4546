//! The differentially private set-union mechanism.

use std::hash::Hash;

use rand::Rng;

use crate::allocation::allocate_user_budget;
use crate::error::Result;
use crate::histogram::WeightedHistogram;
use crate::noise::NoiseSource;
use crate::order::stable_order_key;
use crate::params::{PrivacyParams, ReleaseThresholds};
use crate::sampling::reservoir_sample;

/// Differentially private set union over per-user item sets.
///
/// Implements the policy mechanism of Gopi et al., "Differentially Private
/// Set Union" (<https://arxiv.org/abs/2002.09745>): each user's contribution
/// is bounded by reservoir sampling, water-filled into a shared weighted
/// histogram under a unit budget, and the union is released by thresholding
/// noisy weights.
///
/// Users must be folded in one at a time: every allocation reads the
/// histogram state left by the previous user, so the accumulation order is
/// part of the algorithm, not an implementation detail.
#[derive(Clone, Debug)]
pub struct SetUnion<I> {
    thresholds: ReleaseThresholds,
    max_contrib: usize,
    histogram: WeightedHistogram<I>,
}

impl<I: Eq + Hash> SetUnion<I> {
    /// Create a mechanism, validating parameters and deriving thresholds
    /// before any histogram work.
    pub fn new(params: &PrivacyParams) -> Result<Self> {
        let thresholds = ReleaseThresholds::derive(params)?;
        Ok(Self {
            thresholds,
            max_contrib: params.max_contrib,
            histogram: WeightedHistogram::new(),
        })
    }

    /// Derived thresholds in effect for this run.
    pub fn thresholds(&self) -> &ReleaseThresholds {
        &self.thresholds
    }

    /// The histogram accumulated so far.
    pub fn histogram(&self) -> &WeightedHistogram<I> {
        &self.histogram
    }

    /// Bound one user's items and fold them into the histogram.
    ///
    /// Returns the weight this user actually added, at most
    /// [`crate::allocation::USER_BUDGET`].
    pub fn accumulate_user<R: Rng>(&mut self, items: Vec<I>, rng: &mut R) -> f64 {
        let bounded = reservoir_sample(items, self.max_contrib, rng);
        allocate_user_budget(bounded, self.thresholds.gamma, &mut self.histogram)
    }

    /// Accumulate a collection of users, one at a time, in canonical hash
    /// order of their identifiers.
    ///
    /// The ordering makes a run reproducible regardless of how the input was
    /// collected; users with empty item lists simply contribute nothing.
    pub fn accumulate_all<U, R>(
        &mut self,
        users: impl IntoIterator<Item = (U, Vec<I>)>,
        rng: &mut R,
    ) where
        U: Hash,
        R: Rng,
    {
        let mut ordered: Vec<(u64, Vec<I>)> = users
            .into_iter()
            .map(|(user, items)| (stable_order_key(&user), items))
            .collect();
        ordered.sort_by_key(|(key, _)| *key);
        for (_, items) in ordered {
            self.accumulate_user(items, rng);
        }
    }

    /// Add one Laplace draw per histogram entry and release the items whose
    /// noisy weight strictly exceeds `rho`.
    ///
    /// Items never proposed by any user are absent from the histogram and
    /// are never released. Ties at the threshold are suppressed.
    pub fn release<N: NoiseSource>(self, noise: &mut N) -> Vec<I> {
        let ReleaseThresholds { lambda, rho, .. } = self.thresholds;

        let mut entries: Vec<(I, f64)> = self.histogram.into_entries().collect();
        // Noise is consumed in canonical item order so seeded runs reproduce.
        entries.sort_by_key(|(item, _)| stable_order_key(item));

        let mut released = Vec::new();
        for (item, weight) in entries {
            if weight + noise.sample(lambda) > rho {
                released.push(item);
            }
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct ConstNoise(f64);

    impl NoiseSource for ConstNoise {
        fn sample(&mut self, _scale: f64) -> f64 {
            self.0
        }
    }

    fn params(max_contrib: usize) -> PrivacyParams {
        PrivacyParams::new(1.0)
            .expect("valid params")
            .with_max_contrib(max_contrib)
            .expect("valid params")
    }

    #[test]
    fn test_contribution_is_bounded() {
        let mut mech = SetUnion::new(&params(5)).expect("mechanism");
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let spent = mech.accumulate_user((0..100).collect(), &mut rng);
        assert!(mech.histogram().len() <= 5);
        assert!(spent <= 1.0 + 1e-9);
    }

    #[test]
    fn test_empty_run_releases_nothing() {
        let mech: SetUnion<u32> = SetUnion::new(&params(5)).expect("mechanism");
        assert!(mech.histogram().is_empty());
        let released = mech.release(&mut ConstNoise(0.0));
        assert!(released.is_empty());
    }

    #[test]
    fn test_release_is_strictly_above_threshold() {
        let mut mech = SetUnion::new(&params(2)).expect("mechanism");
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        // A single item far below gamma takes the user's whole budget.
        mech.accumulate_user(vec!["x"], &mut rng);
        assert!((mech.histogram().weight(&"x") - 1.0).abs() < 1e-12);

        let rho = mech.thresholds().rho;
        let at_threshold = mech.clone().release(&mut ConstNoise(rho - 1.0));
        assert!(at_threshold.is_empty());

        let above = mech.release(&mut ConstNoise(rho - 1.0 + 1e-9));
        assert_eq!(above, vec!["x"]);
    }

    #[test]
    fn test_accumulation_order_is_canonical() {
        // carol exceeds the bound, so her reservoir draws consume randomness;
        // identical histograms require the canonical order to hold.
        let users = || {
            vec![
                ("carol", vec!["a", "b", "d"]),
                ("alice", vec!["b", "c"]),
                ("bob", vec!["a"]),
            ]
        };

        let mut forward = SetUnion::new(&params(2)).expect("mechanism");
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        forward.accumulate_all(users(), &mut rng);

        let mut reversed = SetUnion::new(&params(2)).expect("mechanism");
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        reversed.accumulate_all(users().into_iter().rev(), &mut rng);

        for item in ["a", "b", "c", "d"] {
            assert_eq!(
                forward.histogram().weight(&item),
                reversed.histogram().weight(&item)
            );
        }
    }
}
