// Copyright (c) 2025 Poina Cuckoo Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration options for the Poina Cuckoo Hash table.

use crate::schedule::SCHEDULE_STEPS;

/// Configuration for the Poina Cuckoo Hash table.
///
/// The displacement bound, entry TTL, and resize thresholds are fixed
/// properties of the table; configuration covers only the starting capacity
/// step and whether swap statistics are collected from the start.
#[derive(Debug, Clone)]
pub struct PoinaCuckooHashConfig {
    /// Starting position in the paired prime capacity schedule.
    /// Step 0 is the smallest capacity pair (7 and 11 slots).
    pub initial_schedule_index: usize,

    /// Whether per-insertion swap counts are recorded from construction.
    /// Logging can also be toggled later through the table API.
    pub swap_logging: bool,
}

impl PoinaCuckooHashConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the starting schedule index, clamped to the schedule bounds.
    ///
    /// # Arguments
    ///
    /// * `index` - Position in the capacity schedule to start from.
    ///
    /// # Returns
    ///
    /// Self with the updated configuration.
    pub fn with_initial_schedule_index(mut self, index: usize) -> Self {
        self.initial_schedule_index = index.min(SCHEDULE_STEPS - 1);
        self
    }

    /// Enables or disables swap logging from construction.
    pub fn with_swap_logging(mut self, enabled: bool) -> Self {
        self.swap_logging = enabled;
        self
    }
}

impl Default for PoinaCuckooHashConfig {
    fn default() -> Self {
        Self {
            initial_schedule_index: 0,
            swap_logging: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_starts_at_smallest_step() {
        let config = PoinaCuckooHashConfig::default();
        assert_eq!(config.initial_schedule_index, 0);
        assert!(!config.swap_logging);
    }

    #[test]
    fn schedule_index_is_clamped_to_bounds() {
        let config = PoinaCuckooHashConfig::new().with_initial_schedule_index(usize::MAX);
        assert_eq!(config.initial_schedule_index, SCHEDULE_STEPS - 1);
    }
}
