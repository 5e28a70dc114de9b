//! Domain models for the clinic desk.

mod catalog;
mod patient;
mod visit;

pub use catalog::*;
pub use patient::*;
pub use visit::*;
