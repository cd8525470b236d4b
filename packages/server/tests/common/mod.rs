//! Common test utilities for integration tests.

pub mod fixtures;
pub mod harness;

pub use fixtures::*;
pub use harness::TestHarness;
