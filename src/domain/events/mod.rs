//! Domain events
//!
//! Topic names emitted after successful company mutations.

pub mod types;

pub use types::*;
