//! Presentation Layer
//!
//! Command-line surface: argument parsing and its mapping onto configuration.

pub mod cli;

pub use cli::{Cli, ColorWhen};
