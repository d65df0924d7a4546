//! Per-user contribution bounding.

use rand::Rng;

/// Draw a uniform sample of at most `max_contrib` items in a single pass.
///
/// Classic reservoir sampling (Algorithm R): the first `max_contrib` items
/// fill the reservoir, and the i-th item afterwards replaces a uniformly
/// chosen slot with probability `max_contrib / (i + 1)`. Inputs that already
/// fit are returned unchanged, so no randomness is consumed for them. This
/// bound is the mechanism's sensitivity control: it caps how much weight any
/// single user can push into the histogram.
pub fn reservoir_sample<T, R: Rng>(
    items: impl IntoIterator<Item = T>,
    max_contrib: usize,
    rng: &mut R,
) -> Vec<T> {
    if max_contrib == 0 {
        return Vec::new();
    }

    let mut reservoir: Vec<T> = Vec::new();
    for (i, item) in items.into_iter().enumerate() {
        if i < max_contrib {
            reservoir.push(item);
        } else {
            let m = rng.gen_range(0..=i);
            if m < max_contrib {
                reservoir[m] = item;
            }
        }
    }
    reservoir
}
