//! Application Layer
//!
//! Use cases that orchestrate domain ports and infrastructure.

pub mod finalize;

pub use finalize::{FinalizeReport, FinalizeUseCase};
