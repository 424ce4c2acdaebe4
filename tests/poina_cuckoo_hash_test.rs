// Copyright (c) 2025 Poina Cuckoo Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Integration tests for the Poina Cuckoo Hash table.
//!
//! Exercises the public API end to end, including the forgetting scenario.
//! Collisions are engineered from outside the crate by reproducing the
//! table A reduction (FNV code, masked to 31 bits, modulo the table
//! capacity) and steering key hash inputs onto a chosen slot.

use std::hash::{Hash, Hasher};

use fnv::FnvHasher;
use poina_cuckoo_hash::{PoinaCuckooHash, PoinaCuckooHashConfig};

/// Key whose hash input is decoupled from its identity, so collisions can be
/// steered deterministically.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SteeredKey {
    id: u32,
    seed: u64,
}

impl Hash for SteeredKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.seed);
    }
}

fn steered(id: u32, seed: u64) -> SteeredKey {
    SteeredKey { id, seed }
}

/// The table A slot for a key at the smallest capacity (7 slots).
fn table_a_slot(key: &SteeredKey) -> u64 {
    let mut hasher = FnvHasher::default();
    key.hash(&mut hasher);
    (hasher.finish() & 0x7fff_ffff) % 7
}

/// Finds a key at or after `start` that is distinct from `reference` but
/// lands on its table A slot.
fn colliding_key(start: u64, reference: &SteeredKey) -> SteeredKey {
    let wanted = table_a_slot(reference);
    (start..start + 1_000_000)
        .map(|seed| steered(0, seed))
        .find(|key| key != reference && table_a_slot(key) == wanted)
        .expect("no colliding key in search range")
}

#[test]
fn test_basic_operations() {
    let mut table = PoinaCuckooHash::<String, u32>::new();

    table.put("alpha".to_string(), Some(1)).unwrap();
    table.put("beta".to_string(), Some(2)).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(&"alpha".to_string()), Some(&1));
    assert_eq!(table.get(&"missing".to_string()), None);

    table.put("alpha".to_string(), Some(10)).unwrap();
    assert_eq!(table.get(&"alpha".to_string()), Some(&10));
    assert_eq!(table.len(), 2);

    table.delete(&"alpha".to_string()).unwrap();
    assert!(!table.contains_key(&"alpha".to_string()));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_custom_configuration() {
    let config = PoinaCuckooHashConfig::new()
        .with_initial_schedule_index(3)
        .with_swap_logging(true);
    let mut table = PoinaCuckooHash::<u32, u32>::with_config(config);

    assert_eq!(table.capacity(), 79 + 83);
    table.put(1, Some(1)).unwrap();
    assert!(table.swap_average() >= 0.0);
}

#[test]
fn test_growth_and_shrink_round_trip() {
    let mut table = PoinaCuckooHash::<u32, String>::new();
    let initial_capacity = table.capacity();

    for key in 0..200 {
        table.put(key, Some(format!("value{key}"))).unwrap();
    }
    assert!(table.capacity() > initial_capacity);
    assert!(table.load_factor() <= 0.5);
    for key in 0..200 {
        assert_eq!(table.get(&key), Some(&format!("value{key}")));
    }

    for key in 0..200 {
        table.put(key, None).unwrap();
    }
    assert!(table.is_empty());
    assert_eq!(table.capacity(), initial_capacity);
}

#[test]
fn test_forgetting_evicts_stale_entry() {
    let mut table = PoinaCuckooHash::new();

    let victim = steered(1, 0);
    table.put(victim.clone(), Some("stale")).unwrap();

    // Cross the 24-hour TTL and enable forgetting.
    table.advance_time(25);

    let intruder = colliding_key(1, &victim);
    table.put(intruder.clone(), Some("fresh")).unwrap();

    assert!(!table.contains_key(&victim));
    assert_eq!(table.get(&intruder), Some(&"fresh"));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_no_forgetting_without_time_advance() {
    let mut table = PoinaCuckooHash::new();

    let resident = steered(1, 0);
    table.put(resident.clone(), Some(1)).unwrap();

    let intruder = colliding_key(1, &resident);
    table.put(intruder.clone(), Some(2)).unwrap();

    assert!(table.contains_key(&resident));
    assert!(table.contains_key(&intruder));
    assert_eq!(table.len(), 2);
}

#[test]
fn test_swap_statistics_lifecycle() {
    let mut table = PoinaCuckooHash::<u32, u32>::new();

    // Nothing logged while disabled.
    for key in 0..20 {
        table.put(key, Some(key)).unwrap();
    }
    assert_eq!(table.swap_average(), 0.0);
    assert_eq!(table.swap_variation(), 0.0);

    table.set_swap_logging(true);
    for key in 20..60 {
        table.put(key, Some(key)).unwrap();
    }
    assert!(table.swap_average() >= 0.0);
    assert!(table.swap_variation() >= 0.0);
}

#[test]
fn test_keys_snapshot_is_one_shot() {
    let mut table = PoinaCuckooHash::<u32, u32>::new();
    for key in 0..12 {
        table.put(key, Some(key)).unwrap();
    }

    let snapshot = table.keys();
    table.delete(&0).unwrap();

    // The snapshot was taken before the deletion.
    assert_eq!(snapshot.count(), 12);

    let mut remaining: Vec<u32> = table.keys().collect();
    remaining.sort_unstable();
    assert_eq!(remaining, (1..12).collect::<Vec<u32>>());
}
