//! Bucket-count selection for both table variants.
//!
//! Prime bucket counts flatten the systematic clustering a non-uniform
//! hash produces under modulo reduction, so both selection paths end on a
//! prime (or something close to one) whenever they can.

/// Ascending pool of precomputed primes used to size a
/// [`PolicyHashMap`](crate::PolicyHashMap).
///
/// Each entry is roughly double the previous one, up to `i32::MAX`.
pub const PRIME_POOL: [usize; 28] = [
    13,
    31,
    61,
    127,
    251,
    509,
    1021,
    2039,
    4093,
    8191,
    16381,
    32749,
    65521,
    131071,
    262139,
    524287,
    1048573,
    2097143,
    4194301,
    8388593,
    16777213,
    33554393,
    67108859,
    134217689,
    268435399,
    536870909,
    1073741789,
    2147483647,
];

/// Requests below this are used as-is; small tables are not second-guessed.
const DIRECT_BELOW: usize = 100;

/// Divisor for the forward prime scan's starting point.
const SCAN_DIVISOR: usize = 17;

/// Smallest pool prime at or above `capacity`, saturating at the pool's
/// largest entry.
pub fn pick_pool_prime(capacity: usize) -> usize {
    PRIME_POOL
        .iter()
        .copied()
        .find(|&p| p >= capacity)
        .unwrap_or(PRIME_POOL[PRIME_POOL.len() - 1])
}

/// Trial division with an exclusive `num / 2` bound on the divisors.
///
/// Deliberately loose: candidates 0 through 4 all pass, because the
/// divisor range is empty for them. [`adjust_bucket_count`] depends on
/// this exact behavior staying put, not on the test being a real
/// primality check.
fn is_loose_prime(num: usize) -> bool {
    (2..num / 2).all(|i| num % i != 0)
}

/// Adjust a requested bucket count for a [`SlotHashMap`](crate::SlotHashMap).
///
/// Requests below 100 come back unchanged. At or above that, the first
/// loose prime scanning upward from `requested / 17` wins; if the scan
/// reaches `requested` without a hit, the request itself is used, forced
/// odd. The scan start trades bucket count for cheap trial division: the
/// candidates stay small even for large requests.
pub fn adjust_bucket_count(requested: usize) -> usize {
    if requested < DIRECT_BELOW {
        return requested;
    }
    let start = requested / SCAN_DIVISOR;
    for candidate in start..requested {
        if is_loose_prime(candidate) {
            return candidate;
        }
    }
    if requested % 2 == 0 {
        requested + 1
    } else {
        requested
    }
}
