//! Infrastructure Layer
//!
//! Concrete implementations of domain ports and filesystem operations.
//!
//! - `fs/` - Output-root helpers and the directory merge
//! - `process/` - Child-process execution with timeouts

pub mod fs;
pub mod process;

pub use fs::LocalFs;
pub use process::SystemCommandRunner;
