//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod command_runner;
pub mod finalize_events;

pub use command_runner::{CommandOutcome, CommandRunner, CommandSpec, DEFAULT_TIMEOUT};
pub use finalize_events::{FinalizeEvent, FinalizeEventSink, NoopEventSink};
