//! File system operations
//!
//! - `LocalFs`: idempotent removal, listing and existence checks
//! - `merge`: relocating a nested directory's children into its parent

mod local;
pub mod merge;

pub use local::LocalFs;
pub use merge::{merge_into, merge_into_staged, MergeStep};
