//! genlab: property-based testing with custom generators.
//!
//! Re-exports the generator engine from `genlab-core` and the `Generate`
//! derive, and adds the pieces properties are usually built from:
//!
//! - [`bucket`] compresses measurements into labelled buckets
//! - [`index`] groups key/value samples by key
//! - [`report`] turns measurements into event labels
//! - [`samples`] holds composite generators for structured domain values
//!
//! ```rust,ignore
//! use genlab::*;
//!
//! let prop = for_all(samples::kv_pairs(), |pairs| {
//!     let index = index::ukey(pairs);
//!     index.total_values() == pairs.len()
//! })
//! .label(|pairs| report::dupes_event(pairs).unwrap_or_else(|e| e.to_string()));
//!
//! assert!(prop.run(&Config::default()).is_pass());
//! ```

extern crate self as genlab;

pub use genlab_core::*;
pub use genlab_derive::Generate;

pub mod bucket;
pub mod index;
pub mod report;
pub mod samples;
