//! Terminal output for the distfix binary
//!
//! - `theme` - design tokens (colors, icons)
//! - `primitives` - icons and colored text
//! - `blocks` - reusable output blocks
//! - `views` - per-event rendering
//! - `console` - the `FinalizeEventSink` that prints progress

pub mod blocks;
pub mod console;
pub mod context;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
