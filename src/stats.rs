// Copyright (c) 2025 Poina Cuckoo Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Windowed swap-count statistics for insertions.
//!
//! Each completed insertion can record how many cuckoo displacements it took.
//! The average and variance are computed over the most recent window only, so
//! the numbers track the table's current behavior rather than its lifetime.

/// Number of most recent insertions considered by the windowed statistics.
const STATS_WINDOW: usize = 100;

/// Opt-in log of per-insertion displacement counts.
#[derive(Debug, Default)]
pub(crate) struct SwapLog {
    enabled: bool,
    counts: Vec<u32>,
}

impl SwapLog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Appends one insertion's swap count; ignored while logging is disabled.
    pub(crate) fn record(&mut self, swaps: u32) {
        if self.enabled {
            self.counts.push(swaps);
        }
    }

    /// Mean swap count over the most recent window.
    ///
    /// Returns 0.0 when logging is disabled or nothing has been recorded.
    pub(crate) fn average(&self) -> f32 {
        if !self.enabled || self.counts.is_empty() {
            return 0.0;
        }
        let window = self.window();
        let sum: u64 = window.iter().map(|&c| u64::from(c)).sum();
        sum as f32 / window.len() as f32
    }

    /// Population variance of the swap counts over the most recent window.
    ///
    /// Returns 0.0 when logging is disabled or nothing has been recorded.
    pub(crate) fn variation(&self) -> f32 {
        if !self.enabled || self.counts.is_empty() {
            return 0.0;
        }
        let average = self.average();
        let window = self.window();
        let sum: f32 = window
            .iter()
            .map(|&c| {
                let difference = c as f32 - average;
                difference * difference
            })
            .sum();
        sum / window.len() as f32
    }

    fn window(&self) -> &[u32] {
        let start = self.counts.len().saturating_sub(STATS_WINDOW);
        &self.counts[start..]
    }
}
