// Copyright (c) 2025 Poina Cuckoo Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Simulated clock driving the forgetting policy.
//!
//! Time is purely logical: it starts at zero, moves only when the caller
//! advances it, and is completely decoupled from wall-clock time. The first
//! advance also enables forgetting, permanently.

/// Milliseconds in one simulated hour.
const MILLIS_PER_HOUR: u64 = 3_600_000;

/// Logical clock owned by a table instance.
#[derive(Debug, Clone)]
pub(crate) struct SimulatedClock {
    now_millis: u64,
    forgetting_enabled: bool,
}

impl SimulatedClock {
    /// Creates a clock at time zero with forgetting disabled.
    pub(crate) fn new() -> Self {
        Self {
            now_millis: 0,
            forgetting_enabled: false,
        }
    }

    /// Current logical time in milliseconds.
    pub(crate) fn now_millis(&self) -> u64 {
        self.now_millis
    }

    /// Whether a time advance has enabled forgetting.
    pub(crate) fn forgetting_enabled(&self) -> bool {
        self.forgetting_enabled
    }

    /// Advances the clock by the given number of simulated hours and enables
    /// forgetting. The flag is never reset afterwards. Time saturates at
    /// `u64::MAX` milliseconds rather than wrapping.
    pub(crate) fn advance_hours(&mut self, hours: u64) {
        self.now_millis = self
            .now_millis
            .saturating_add(hours.saturating_mul(MILLIS_PER_HOUR));
        self.forgetting_enabled = true;
    }
}
