// Copyright (c) 2025 Poina Cuckoo Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Hash functions for the Poina Cuckoo Hash table.
//!
//! A single FNV hash code is computed per key; each table reduces that code
//! into its own slot range. The table B reduction additionally folds the code
//! through two fixed odd multipliers, so keys that collide under the table A
//! reduction are unlikely to collide identically under table B's.

use std::hash::{Hash, Hasher};

use fnv::FnvHasher;

/// Mask keeping the low 31 bits of a hash code, so both reductions work on
/// the same non-negative range.
const HASH_MASK: u64 = 0x7fff_ffff;

/// Odd multipliers folding the code for the table B reduction.
const FOLD_MULTIPLIER_A: u64 = 31;
const FOLD_MULTIPLIER_B: u64 = 37;

/// Computes the 64-bit hash code for a key.
///
/// The same code feeds both index reductions and the degenerate-collision
/// guard, so every caller must obtain it through this function.
pub(crate) fn hash_code<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = FnvHasher::default();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Reduces a hash code into `[0, capacity)` for table A.
pub(crate) fn index_a(code: u64, capacity: usize) -> usize {
    ((code & HASH_MASK) % capacity as u64) as usize
}

/// Reduces a hash code into `[0, capacity)` for table B.
pub(crate) fn index_b(code: u64, capacity: usize) -> usize {
    let reduced = (code & HASH_MASK) % capacity as u64;
    ((reduced * FOLD_MULTIPLIER_A + reduced * FOLD_MULTIPLIER_B) % capacity as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_stay_in_range() {
        for key in 0..1_000u32 {
            let code = hash_code(&key);
            assert!(index_a(code, 7) < 7);
            assert!(index_b(code, 11) < 11);
        }
    }

    #[test]
    fn hash_code_is_deterministic() {
        let key = "cuckoo".to_string();
        assert_eq!(hash_code(&key), hash_code(&key));
        assert_eq!(hash_code(&key), hash_code("cuckoo"));
    }

    #[test]
    fn table_b_reduction_folds_before_modulus() {
        // The fold is (r*31 + r*37) % m over the masked residue r.
        let code = hash_code(&42u64);
        let reduced = (code & HASH_MASK) % 11;
        assert_eq!(index_b(code, 11), ((reduced * 68) % 11) as usize);
    }

    #[test]
    fn reductions_decorrelate_first_table_collisions() {
        // Keys sharing a table A slot should mostly spread out in table B.
        let (cap_a, cap_b) = (163, 167);
        let colliding: Vec<u64> = (0..10_000u64)
            .filter(|k| index_a(hash_code(k), cap_a) == 0)
            .collect();
        assert!(colliding.len() > 1);
        let mut b_slots: Vec<usize> = colliding
            .iter()
            .map(|k| index_b(hash_code(k), cap_b))
            .collect();
        b_slots.sort_unstable();
        b_slots.dedup();
        assert!(b_slots.len() > 1);
    }
}
