// Copyright (c) 2025 Poina Cuckoo Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Paired prime capacity schedule for the two cuckoo tables.
//!
//! Both tables always resize together, one schedule step at a time. The two
//! sequences are kept prime and distinct so the table A and table B index
//! reductions never degenerate into the same slot range.

/// Number of steps in the capacity schedule.
pub(crate) const SCHEDULE_STEPS: usize = 25;

/// Capacities for table A at each schedule step.
pub(crate) const PRIMES_TABLE_A: [usize; SCHEDULE_STEPS] = [
    7, 17, 37, 79, 163, 331, 673, 1361, 2729, 5471, 10949, 21911, 43853, 87719, 175447, 350899,
    701819, 1403641, 2807303, 5614657, 11229331, 22458671, 44917381, 89834777, 179669557,
];

/// Capacities for table B at each schedule step.
pub(crate) const PRIMES_TABLE_B: [usize; SCHEDULE_STEPS] = [
    11, 19, 41, 83, 167, 337, 677, 1367, 2731, 5477, 10957, 21929, 43867, 87721, 175453, 350941,
    701837, 1403651, 2807323, 5614673, 11229341, 22458677, 44917399, 89834821, 179669563,
];

/// Returns the `(table A, table B)` capacities at `index`, or `None` when the
/// index falls outside the schedule.
pub(crate) fn capacities(index: usize) -> Option<(usize, usize)> {
    if index < SCHEDULE_STEPS {
        Some((PRIMES_TABLE_A[index], PRIMES_TABLE_B[index]))
    } else {
        None
    }
}
