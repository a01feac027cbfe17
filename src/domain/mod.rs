//! Domain Layer
//!
//! Pipeline vocabulary without I/O.
//!
//! - `stage` - The five finalize stages
//! - `ports/` - Interfaces implemented by the infrastructure layer

pub mod ports;
pub mod stage;

pub use stage::Stage;
