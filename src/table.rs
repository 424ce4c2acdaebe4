// Copyright (c) 2025 Poina Cuckoo Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Implementation of the forgetting cuckoo hash table.
//!
//! Two fixed-capacity slot arrays back the table; every key has one candidate
//! slot per array. Insertion displaces incumbents between the arrays until a
//! slot is free, a bounded swap limit forces a growth step, or an expired
//! incumbent is forgotten outright. Capacity follows a paired prime schedule,
//! growing when the load factor reaches 0.5 and shrinking when it falls below
//! 0.125.

use std::cell::Cell;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::clock::SimulatedClock;
use crate::config::PoinaCuckooHashConfig;
use crate::error::{PoinaCuckooHashError, Result};
use crate::hash::{hash_code, index_a, index_b};
use crate::schedule;
use crate::stats::SwapLog;

/// Idle time in simulated milliseconds after which an entry may be forgotten.
const ENTRY_TTL_MILLIS: u64 = 24 * 3_600_000;

/// Maximum displacements for a single insertion before growing and retrying.
const MAX_SWAPS: u32 = 1000;

/// Load factor at or above which an insertion grows the tables first.
const GROW_THRESHOLD: f32 = 0.5;

/// Load factor below which a deletion shrinks the tables.
const SHRINK_THRESHOLD: f32 = 0.125;

/// Identifies one of the two cuckoo tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableId {
    A,
    B,
}

impl TableId {
    fn other(self) -> Self {
        match self {
            TableId::A => TableId::B,
            TableId::B => TableId::A,
        }
    }
}

/// Whether the current insertion runs inside a resize rebuild.
///
/// Threaded explicitly through the insertion path so every site that
/// suppresses timestamp refresh or forgetting shows the suppression in its
/// signature instead of reading a hidden flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RebuildMode {
    Normal,
    Rebuilding,
}

/// One occupied slot: the stored pair and its last-touch time.
///
/// The timestamp sits in a `Cell` so the read path can refresh it without
/// exclusive access; the table is single-threaded by contract and never
/// claims `Sync`.
#[derive(Debug)]
struct Slot<K, V> {
    key: K,
    value: V,
    touched_at: Cell<u64>,
}

impl<K, V> Slot<K, V> {
    fn new(key: K, value: V, now: u64) -> Self {
        Self {
            key,
            value,
            touched_at: Cell::new(now),
        }
    }
}

/// An associative table combining cuckoo hashing with time-based forgetting.
///
/// Lookups probe at most two bounded chains, one per table, giving O(1)
/// worst-case reads. Stale entries are not swept in the background: an entry
/// idle past its TTL is evicted opportunistically when an insertion needs its
/// slot, and only after [`advance_time`](Self::advance_time) has enabled
/// forgetting.
///
/// # Type Parameters
///
/// * `K` - The key type. Must implement `Eq + Hash + Clone`.
/// * `V` - The value type. Must implement `Clone`.
///
/// # Examples
///
/// ```
/// use poina_cuckoo_hash::PoinaCuckooHash;
///
/// let mut table = PoinaCuckooHash::<String, u32>::new();
///
/// table.put("hello".to_string(), Some(42)).unwrap();
/// assert_eq!(table.get(&"hello".to_string()), Some(&42));
///
/// // An absent value routes to deletion.
/// table.put("hello".to_string(), None).unwrap();
/// assert!(table.is_empty());
/// ```
#[derive(Debug)]
pub struct PoinaCuckooHash<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    slots_a: Vec<Option<Slot<K, V>>>,
    slots_b: Vec<Option<Slot<K, V>>>,
    len_a: usize,
    len_b: usize,
    schedule_index: usize,
    clock: SimulatedClock,
    swap_log: SwapLog,
}

impl<K, V> PoinaCuckooHash<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates an empty table at the smallest capacity step.
    pub fn new() -> Self {
        Self::with_config(PoinaCuckooHashConfig::default())
    }

    /// Creates an empty table with the specified configuration.
    pub fn with_config(config: PoinaCuckooHashConfig) -> Self {
        let index = config
            .initial_schedule_index
            .min(schedule::SCHEDULE_STEPS - 1);
        let mut table = Self::with_state(index, SimulatedClock::new());
        table.swap_log.set_enabled(config.swap_logging);
        table
    }

    /// Internal constructor used both by the public entry points and by the
    /// resize rebuild, which carries the live clock into the scratch instance.
    fn with_state(schedule_index: usize, clock: SimulatedClock) -> Self {
        let capacity_a = schedule::PRIMES_TABLE_A[schedule_index];
        let capacity_b = schedule::PRIMES_TABLE_B[schedule_index];
        Self {
            slots_a: empty_slots(capacity_a),
            slots_b: empty_slots(capacity_b),
            len_a: 0,
            len_b: 0,
            schedule_index,
            clock,
            swap_log: SwapLog::new(),
        }
    }

    /// Number of live entries across both tables.
    pub fn len(&self) -> usize {
        self.len_a + self.len_b
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of both tables' current slot counts.
    pub fn capacity(&self) -> usize {
        self.slots_a.len() + self.slots_b.len()
    }

    /// Live entries divided by total capacity.
    pub fn load_factor(&self) -> f32 {
        self.len() as f32 / self.capacity() as f32
    }

    /// Whether the key is present. Never refreshes timestamps.
    pub fn contains_key(&self, key: &K) -> bool {
        self.probe(TableId::A, key).is_some() || self.probe(TableId::B, key).is_some()
    }

    /// Returns a reference to the value stored for `key`, or `None`.
    ///
    /// Every occupied slot visited along the probe path has its last-touch
    /// time refreshed, not just the matching one; a read keeps its whole
    /// collision neighborhood warm against forgetting.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.lookup(TableId::A, key)
            .or_else(|| self.lookup(TableId::B, key))
    }

    /// Inserts, updates, or deletes the entry for `key`.
    ///
    /// An absent `value` is a delete request. An existing key has its value
    /// overwritten in place with a timestamp refresh and no displacement.
    /// A new key triggers a growth step first whenever the load factor has
    /// reached 0.5, then runs the cuckoo displacement loop.
    ///
    /// # Errors
    ///
    /// [`PoinaCuckooHashError::DegenerateCollision`] when the key being
    /// placed finds both of its candidate slots held by keys with its exact
    /// hash code, which displacement can never resolve.
    pub fn put(&mut self, key: K, value: Option<V>) -> Result<()> {
        match value {
            Some(value) => self.put_entry(key, value, RebuildMode::Normal),
            None => self.delete(&key),
        }
    }

    /// Removes the entry for `key`; absent keys are a no-op.
    ///
    /// Both tables are probed in lockstep, one step each per round, stopping
    /// when either side matches or both probed slots are simultaneously
    /// empty. A removal that drops the load factor below 0.125 shrinks the
    /// tables one schedule step, never below the smallest step.
    ///
    /// # Errors
    ///
    /// [`PoinaCuckooHashError::DegenerateCollision`] if the shrink rebuild
    /// hits an unresolvable collision while reinserting survivors.
    pub fn delete(&mut self, key: &K) -> Result<()> {
        let capacity_a = self.slots_a.len();
        let capacity_b = self.slots_b.len();
        let code = hash_code(key);
        let mut index_in_a = index_a(code, capacity_a);
        let mut index_in_b = index_b(code, capacity_b);

        let mut found = None;
        for _ in 0..capacity_a.max(capacity_b) {
            let slot_a = &self.slots_a[index_in_a];
            let slot_b = &self.slots_b[index_in_b];
            if slot_a.is_none() && slot_b.is_none() {
                return Ok(());
            }
            if matches!(slot_a, Some(slot) if slot.key == *key) {
                found = Some((TableId::A, index_in_a));
                break;
            }
            if matches!(slot_b, Some(slot) if slot.key == *key) {
                found = Some((TableId::B, index_in_b));
                break;
            }
            index_in_a = (index_in_a + 1) % capacity_a;
            index_in_b = (index_in_b + 1) % capacity_b;
        }

        let Some((table, index)) = found else {
            return Ok(());
        };
        self.slots_mut(table)[index] = None;
        match table {
            TableId::A => self.len_a -= 1,
            TableId::B => self.len_b -= 1,
        }

        if self.load_factor() < SHRINK_THRESHOLD && self.schedule_index > 0 {
            self.rebuild(self.schedule_index - 1)?;
        }
        Ok(())
    }

    /// Returns a one-shot iterator over a snapshot of all live keys, taken at
    /// call time: table A slots in index order, then table B.
    pub fn keys(&self) -> Keys<K> {
        let mut snapshot = Vec::with_capacity(self.len());
        for slot in self.slots_a.iter().chain(self.slots_b.iter()).flatten() {
            snapshot.push(slot.key.clone());
        }
        Keys {
            inner: snapshot.into_iter(),
        }
    }

    /// Enables or disables per-insertion swap-count logging.
    pub fn set_swap_logging(&mut self, enabled: bool) {
        self.swap_log.set_enabled(enabled);
    }

    /// Mean displacement count over the last 100 logged insertions, or 0.0
    /// when logging is disabled or nothing was recorded.
    pub fn swap_average(&self) -> f32 {
        self.swap_log.average()
    }

    /// Population variance of the displacement counts over the last 100
    /// logged insertions, or 0.0 when logging is disabled or empty.
    pub fn swap_variation(&self) -> f32 {
        self.swap_log.variation()
    }

    /// Advances the simulated clock by `hours` and permanently enables
    /// forgetting. Entries idle longer than 24 simulated hours become
    /// eligible for eviction during insertion displacement.
    pub fn advance_time(&mut self, hours: u64) {
        self.clock.advance_hours(hours);
    }

    /// The cuckoo displacement loop shared by `put` and the resize rebuild.
    fn put_entry(&mut self, mut key: K, mut value: V, mode: RebuildMode) -> Result<()> {
        if self.contains_key(&key) {
            self.update_in_place(&key, value, mode);
            return Ok(());
        }

        if self.load_factor() >= GROW_THRESHOLD {
            self.rebuild(self.schedule_index + 1)?;
        }

        let now = self.clock.now_millis();
        let mut table = TableId::A;
        let mut swaps: u32 = 0;

        while swaps < MAX_SWAPS {
            let code = hash_code(&key);
            let index = self.target_index(table, code);

            if self.slots(table)[index].is_some() {
                if self.is_degenerate_collision(code) {
                    return Err(PoinaCuckooHashError::DegenerateCollision);
                }

                if self.slot_is_expired(table, index)
                    && self.clock.forgetting_enabled()
                    && mode == RebuildMode::Normal
                {
                    // Forget the expired incumbent and take its slot. One
                    // entry out, one in: the live count is unchanged and no
                    // shrink check runs.
                    self.slots_mut(table)[index] = Some(Slot::new(key, value, now));
                    trace!(table = ?table, index, "forgot expired incumbent during displacement");
                    self.swap_log.record(swaps);
                    return Ok(());
                }
            }

            match self.slots_mut(table)[index].replace(Slot::new(key, value, now)) {
                None => {
                    match table {
                        TableId::A => self.len_a += 1,
                        TableId::B => self.len_b += 1,
                    }
                    self.swap_log.record(swaps);
                    return Ok(());
                }
                Some(displaced) => {
                    key = displaced.key;
                    value = displaced.value;
                    table = table.other();
                    swaps += 1;
                }
            }
        }

        // The chain never settled: grow one step (the rebuild carries every
        // entry already in the arrays) and retry with the pair still in hand.
        debug!(swaps, "swap bound exceeded, growing before retrying insertion");
        self.rebuild(self.schedule_index + 1)?;
        self.put_entry(key, value, mode)
    }

    /// Overwrites the value at the slot where `key` actually resides,
    /// refreshing its timestamp outside of rebuilds.
    fn update_in_place(&mut self, key: &K, value: V, mode: RebuildMode) {
        let location = self
            .probe(TableId::A, key)
            .map(|index| (TableId::A, index))
            .or_else(|| self.probe(TableId::B, key).map(|index| (TableId::B, index)));
        let Some((table, index)) = location else {
            return;
        };
        let now = self.clock.now_millis();
        if let Some(slot) = self.slots_mut(table)[index].as_mut() {
            slot.value = value;
            if mode == RebuildMode::Normal {
                slot.touched_at.set(now);
            }
        }
    }

    /// Linear probe for `key` in one table, bounded by that table's capacity.
    /// Stops at the first empty slot.
    fn probe(&self, table: TableId, key: &K) -> Option<usize> {
        let capacity = self.capacity_of(table);
        let code = hash_code(key);
        let mut index = self.target_index(table, code);
        for _ in 0..capacity {
            match &self.slots(table)[index] {
                Some(slot) if slot.key == *key => return Some(index),
                Some(_) => index = (index + 1) % capacity,
                None => return None,
            }
        }
        None
    }

    /// Like [`probe`](Self::probe), but refreshes the last-touch time of
    /// every occupied slot visited and yields the matched value.
    fn lookup(&self, table: TableId, key: &K) -> Option<&V> {
        let capacity = self.capacity_of(table);
        let code = hash_code(key);
        let now = self.clock.now_millis();
        let mut index = self.target_index(table, code);
        for _ in 0..capacity {
            match &self.slots(table)[index] {
                Some(slot) => {
                    slot.touched_at.set(now);
                    if slot.key == *key {
                        return Some(&slot.value);
                    }
                    index = (index + 1) % capacity;
                }
                None => return None,
            }
        }
        None
    }

    /// Approximate unresolvable-cycle check: the in-hand key's target slots
    /// in both tables are occupied by keys whose hash codes both equal its
    /// own. Deliberately narrower than true cycle detection.
    fn is_degenerate_collision(&self, code: u64) -> bool {
        let slot_a = &self.slots_a[index_a(code, self.slots_a.len())];
        let slot_b = &self.slots_b[index_b(code, self.slots_b.len())];
        match (slot_a, slot_b) {
            (Some(a), Some(b)) => hash_code(&a.key) == code && hash_code(&b.key) == code,
            _ => false,
        }
    }

    fn slot_is_expired(&self, table: TableId, index: usize) -> bool {
        match &self.slots(table)[index] {
            Some(slot) => {
                let idle = self.clock.now_millis().saturating_sub(slot.touched_at.get());
                idle > ENTRY_TTL_MILLIS
            }
            None => false,
        }
    }

    /// Rebuilds both tables at `target_index`, reinserting every live entry
    /// through the ordinary placement path and carrying surviving last-touch
    /// times forward by position. Out-of-schedule targets are a no-op.
    ///
    /// The scratch instance is built completely before any field of `self` is
    /// replaced, so a failed rebuild leaves the table untouched.
    fn rebuild(&mut self, target_index: usize) -> Result<()> {
        if schedule::capacities(target_index).is_none() {
            return Ok(());
        }

        debug!(
            from = self.schedule_index,
            to = target_index,
            entries = self.len(),
            "rebuilding cuckoo tables"
        );

        let mut scratch = Self::with_state(target_index, self.clock.clone());
        for slot in self.slots_a.iter().chain(self.slots_b.iter()).flatten() {
            scratch.put_entry(slot.key.clone(), slot.value.clone(), RebuildMode::Rebuilding)?;
        }

        // Best-effort positional carry of last-touch times: position i of the
        // new table inherits position i of the old one where both are live.
        carry_timestamps(&self.slots_a, &scratch.slots_a);
        carry_timestamps(&self.slots_b, &scratch.slots_b);

        // Adopt the fully built scratch state in one step; the clock and the
        // swap log stay with this instance. The scratch's own index is taken,
        // not `target_index`: reinsertion can blow the swap bound and grow
        // the scratch past the requested step.
        self.slots_a = scratch.slots_a;
        self.slots_b = scratch.slots_b;
        self.len_a = scratch.len_a;
        self.len_b = scratch.len_b;
        self.schedule_index = scratch.schedule_index;
        Ok(())
    }

    fn capacity_of(&self, table: TableId) -> usize {
        match table {
            TableId::A => self.slots_a.len(),
            TableId::B => self.slots_b.len(),
        }
    }

    fn slots(&self, table: TableId) -> &[Option<Slot<K, V>>] {
        match table {
            TableId::A => &self.slots_a,
            TableId::B => &self.slots_b,
        }
    }

    fn slots_mut(&mut self, table: TableId) -> &mut [Option<Slot<K, V>>] {
        match table {
            TableId::A => &mut self.slots_a,
            TableId::B => &mut self.slots_b,
        }
    }

    fn target_index(&self, table: TableId, code: u64) -> usize {
        match table {
            TableId::A => index_a(code, self.slots_a.len()),
            TableId::B => index_b(code, self.slots_b.len()),
        }
    }
}

impl<K, V> Default for PoinaCuckooHash<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot iterator over a snapshot of the table's keys.
///
/// The snapshot is taken when [`PoinaCuckooHash::keys`] is called; mutating
/// the table afterwards does not affect the sequence.
#[derive(Debug)]
pub struct Keys<K> {
    inner: std::vec::IntoIter<K>,
}

impl<K> Iterator for Keys<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for Keys<K> {}

fn empty_slots<K, V>(capacity: usize) -> Vec<Option<Slot<K, V>>> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

fn carry_timestamps<K, V>(old: &[Option<Slot<K, V>>], new: &[Option<Slot<K, V>>]) {
    for (old_slot, new_slot) in old.iter().zip(new.iter()) {
        if let (Some(old_slot), Some(new_slot)) = (old_slot.as_ref(), new_slot.as_ref()) {
            new_slot.touched_at.set(old_slot.touched_at.get());
        }
    }
}
