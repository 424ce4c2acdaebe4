// Copyright (c) 2025 Poina Cuckoo Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Test modules for the Poina Cuckoo Hash table.
//!
//! This module contains the cross-component tests:
//! - Scenario tests for the forgetting policy, driven by keys whose hash
//!   codes are steered onto chosen slots
//! - Property-based tests using proptest, checked against a model map
