//! Canonical ordering of opaque hashable keys.

use std::hash::{Hash, Hasher};

use siphasher::sip::SipHasher13;

// Fixed keys keep the ordering stable across processes and platforms.
const ORDER_KEY_0: u64 = 0x0123_4567_89ab_cdef;
const ORDER_KEY_1: u64 = 0xfedc_ba98_7654_3210;

/// Stable 64-bit ordering key for any hashable value.
///
/// Users are processed, and noise draws consumed, in ascending order of this
/// key. It pins a reproducible, input-order-independent canonicalization;
/// it is not a privacy boundary.
pub fn stable_order_key<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(ORDER_KEY_0, ORDER_KEY_1);
    value.hash(&mut hasher);
    hasher.finish()
}
