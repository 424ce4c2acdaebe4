// Copyright (c) 2025 Poina Cuckoo Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Poina Cuckoo Hash: a forgetting cuckoo hash table.
//!
//! An associative key-value store combining two-table cuckoo hashing
//! (guaranteed O(1) worst-case lookup) with a time-based forgetting policy
//! that opportunistically evicts stale entries under insertion pressure.
//! There is no background sweep: an entry idle past its 24-hour TTL is
//! evicted only when an insertion needs its slot, and only after the
//! simulated clock has been advanced at least once.
//!
//! # Features
//!
//! - Two prime-sized tables with one hash reduction each; every key has
//!   exactly one candidate slot per table
//! - Bounded displacement chains with automatic growth when a chain cannot
//!   settle
//! - Adaptive capacity along a paired prime schedule: grow at load factor
//!   0.5, shrink below 0.125, one step at a time
//! - Lazy TTL eviction gated by an explicitly advanced simulated clock,
//!   never wall-clock time
//! - Opt-in windowed statistics over per-insertion displacement counts
//! - Zero unsafe code
//!
//! # Example
//!
//! ```
//! use poina_cuckoo_hash::PoinaCuckooHash;
//!
//! let mut table = PoinaCuckooHash::<String, u32>::new();
//!
//! table.put("hello".to_string(), Some(42)).unwrap();
//! assert_eq!(table.get(&"hello".to_string()), Some(&42));
//! assert!(table.contains_key(&"hello".to_string()));
//!
//! // Overwriting in place never displaces.
//! table.put("hello".to_string(), Some(7)).unwrap();
//! assert_eq!(table.len(), 1);
//!
//! // Entries idle past 24 simulated hours become eligible for forgetting
//! // once time has been advanced; eviction happens lazily, when a later
//! // insertion collides with the stale slot.
//! table.advance_time(25);
//!
//! // An absent value is a delete request.
//! table.put("hello".to_string(), None).unwrap();
//! assert!(table.is_empty());
//! ```
//!
//! # Timing model
//!
//! Time is purely logical. The clock starts at zero and moves only through
//! [`PoinaCuckooHash::advance_time`], which also permanently enables the
//! forgetting policy. Reads refresh the last-touch time of every slot they
//! probe past, keeping hot collision neighborhoods resident.

// Module declarations
mod clock;
mod config;
mod error;
mod hash;
mod schedule;
mod stats;
mod table;

// Re-exports
pub use config::PoinaCuckooHashConfig;
pub use error::{PoinaCuckooHashError, Result};
pub use table::{Keys, PoinaCuckooHash};

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for the Poina Cuckoo Hash crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
