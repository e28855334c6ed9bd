//! Core support for the labeling engine.
//!
//! Currently this is the error handling layer: the crate-wide error enum,
//! helper constructors, and the [`DomainResult`] alias used throughout.

pub mod errors;

pub use errors::{DomainError, DomainResult};
