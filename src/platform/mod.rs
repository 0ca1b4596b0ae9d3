//! Platform abstraction layer
//!
//! Maps browser key events onto the logical controls the simulation reads.

pub mod input;

pub use input::{Control, InputState};
