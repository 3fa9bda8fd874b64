//! Integration test utilities for the warden API
//!
//! Spawns the real router over an in-memory database, the in-process
//! platform double and a manual clock.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
