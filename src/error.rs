// Copyright (c) 2025 Poina Cuckoo Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the Poina Cuckoo Hash table.
//!
//! Missing keys are reported through `Option`/`bool` returns, never through
//! this type. The error enum covers only structural failures of the table
//! itself.

/// Error type for Poina Cuckoo Hash operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PoinaCuckooHashError {
    /// Both of a displaced key's candidate slots are held by keys carrying an
    /// identical hash code, so displacement can never settle the key. The
    /// insertion is abandoned immediately rather than cycling until the swap
    /// bound.
    #[error("degenerate collision: both candidate slots are held by keys with the same hash code")]
    DegenerateCollision,
}

/// Result type for Poina Cuckoo Hash operations.
pub type Result<T> = std::result::Result<T, PoinaCuckooHashError>;
