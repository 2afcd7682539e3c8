//! Core engine for genlab property-based testing.
//!
//! Splittable seeds, size-scaled ranges, lazy shrink trees, composable
//! generators and the property driver that samples, checks and shrinks.

pub mod data;
pub mod error;
pub mod gen;
pub mod property;
pub mod range;
pub mod tree;

pub use data::*;
pub use error::*;
pub use gen::*;
pub use property::*;
pub use range::*;
pub use tree::*;
