//! Finalize Event Port
//!
//! Provides an observable interface for finalize runs.
//! Enables console progress reporting and test recording.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::Stage;

/// Event emitted during a finalize run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalizeEvent {
    /// A stage is about to run
    StageStarted { stage: Stage },

    /// Output root removed (or was already absent)
    Cleaned { path: PathBuf, existed: bool },

    /// Build command spawned
    BuildStarted { command: String },

    /// Build command killed after its timeout
    CommandTimedOut { command: String, timeout: Duration },

    /// Build command exited 0; its output is kept for verbose display
    BuildFinished { stdout: String, stderr: String },

    /// Nested directory found, relocation about to start
    RelocateStarted {
        from: PathBuf,
        to: PathBuf,
        entries: Vec<String>,
    },

    /// An existing root entry was replaced by a nested one
    Overwrote { name: String },

    /// Entry relocated to the root
    EntryMoved { name: String },

    /// Nested directory removed after draining
    NestedRemoved { path: PathBuf },

    /// No nested directory, root accepted as-is
    FlatOutput { root: PathBuf },

    /// Marker file present at the root
    MarkerFound { path: PathBuf },

    /// Server artifact removed from the root
    ServerFileRemoved { name: String },

    /// Non-fatal observation
    Warning { message: String },

    /// Final root listing
    Listed { root: PathBuf, entries: Vec<String> },

    /// Run finished successfully
    Completed,
}

/// Trait for receiving finalize events
///
/// Implementations can be:
/// - ConsoleEventSink: progress lines in the terminal
/// - NoopEventSink: silent operation
pub trait FinalizeEventSink {
    /// Handle a finalize event
    fn on_event(&self, event: FinalizeEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl FinalizeEventSink for NoopEventSink {
    fn on_event(&self, _event: FinalizeEvent) {}
}

impl<T: FinalizeEventSink + ?Sized> FinalizeEventSink for &T {
    fn on_event(&self, event: FinalizeEvent) {
        (**self).on_event(event)
    }
}
