//! Common test utilities for distfix CLI tests.
//!
//! - `TestEnv`: isolated project directory plus helpers to run the binary
//! - Fixtures: fake bundler scripts

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
