//! Greedy water-filling allocation of a user's weight budget.

use std::collections::HashSet;
use std::hash::Hash;

use crate::histogram::WeightedHistogram;

/// Weight budget each user may add to the histogram.
pub const USER_BUDGET: f64 = 1.0;

/// Tolerance for the saturation-round budget comparison.
const BUDGET_TOL: f64 = 1e-9;

struct Candidate<I> {
    item: I,
    headroom: f64,
    applied: f64,
}

/// Distribute one user's budget across their items as histogram weight.
///
/// Items already at or above `gamma` need nothing from this user and are
/// skipped. The remaining candidates are sorted by headroom to `gamma` and
/// saturated cheapest-first: each round raises the whole unsaturated suffix
/// by the current item's headroom, charging `headroom * k` against the
/// budget. When a full round no longer fits, the leftover budget is spread
/// evenly over the suffix and the user is done. Returns the total weight
/// applied, never more than [`USER_BUDGET`].
pub fn allocate_user_budget<I: Eq + Hash>(
    items: Vec<I>,
    gamma: f64,
    histogram: &mut WeightedHistogram<I>,
) -> f64 {
    let unique: HashSet<I> = items.into_iter().collect();
    let mut candidates: Vec<Candidate<I>> = unique
        .into_iter()
        .filter_map(|item| {
            let weight = histogram.weight(&item);
            (weight < gamma).then(|| Candidate {
                headroom: gamma - weight,
                applied: 0.0,
                item,
            })
        })
        .collect();
    candidates.sort_by(|a, b| a.headroom.total_cmp(&b.headroom));

    let mut budget = USER_BUDGET;
    let mut spent = 0.0;
    let n = candidates.len();
    for idx in 0..n {
        let k = (n - idx) as f64;
        let step = candidates[idx].headroom;
        let round_cost = step * k;
        if round_cost <= budget + BUDGET_TOL {
            // Saturates the current item; every remaining item rises with it.
            for candidate in &mut candidates[idx..] {
                candidate.applied += step;
                candidate.headroom -= step;
            }
            budget = (budget - round_cost).max(0.0);
            spent += round_cost;
        } else {
            // Budget exhausted: spread what is left evenly and stop.
            let share = budget / k;
            for candidate in &mut candidates[idx..] {
                candidate.applied += share;
            }
            spent += budget;
            break;
        }
    }

    for candidate in candidates {
        if candidate.applied > 0.0 {
            histogram.add_weight(candidate.item, candidate.applied);
        }
    }
    spent
}
