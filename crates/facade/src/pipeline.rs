//! Row-level pipeline: group rows by user, run the mechanism, join back.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use rand::Rng;

use dpsu_core::{NoiseSource, PrivacyParams, Result, SetUnion};

/// Run the set-union mechanism over `(user, item)` rows.
///
/// Rows are grouped by user, the grouped records are folded into the shared
/// histogram one user at a time in canonical user order, and the released
/// items are returned. The input shape is trusted: one row per observed
/// (user, item) pair, as produced by the query front end.
pub fn set_union_of_rows<U, I, R, N>(
    rows: impl IntoIterator<Item = (U, I)>,
    params: &PrivacyParams,
    rng: &mut R,
    noise: &mut N,
) -> Result<Vec<I>>
where
    U: Eq + Hash,
    I: Eq + Hash,
    R: Rng,
    N: NoiseSource,
{
    let mut grouped: HashMap<U, Vec<I>> = HashMap::new();
    for (user, item) in rows {
        grouped.entry(user).or_default().push(item);
    }

    let mut mechanism = SetUnion::new(params)?;
    let num_users = grouped.len();
    mechanism.accumulate_all(grouped, rng);
    let candidates = mechanism.histogram().len();

    let released = mechanism.release(noise);
    log::debug!(
        "set union released {} of {} candidate items from {} users",
        released.len(),
        candidates,
        num_users
    );
    Ok(released)
}

/// Keep exactly the source rows whose item was released.
///
/// This is the join-back step: downstream consumers see the original rows
/// for disclosed items and nothing else.
pub fn retain_released<U, I: Eq + Hash>(rows: Vec<(U, I)>, released: &[I]) -> Vec<(U, I)> {
    let keep: HashSet<&I> = released.iter().collect();
    rows.into_iter()
        .filter(|(_, item)| keep.contains(item))
        .collect()
}
