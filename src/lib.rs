//! distfix - static deploy finalizer
//!
//! Runs a front-end bundler, then flattens its nested output directory
//! (`dist/public`) into the deployment root (`dist`) so static hosts can
//! serve it, and checks that `index.html` ended up at the root.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{FinalizeReport, FinalizeUseCase};
pub use config::{BuildCommand, FinalizeConfig, MergeMode};
pub use domain::ports::{
    CommandOutcome, CommandRunner, CommandSpec, FinalizeEvent, FinalizeEventSink, NoopEventSink,
};
pub use domain::Stage;
pub use error::{FinalizeError, FinalizeResult, MergeError};
pub use infrastructure::fs::{merge_into, merge_into_staged, LocalFs, MergeStep};
pub use infrastructure::SystemCommandRunner;
