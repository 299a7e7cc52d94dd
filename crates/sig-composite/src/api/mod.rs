//! Public API for the sig-composite crate.
//!
//! This module provides the high-level API: the [`SignaturePipeline`]
//! builder and the [`CompositeError`] unified error type.

mod builder;
mod error;

pub use builder::{MaskOutcome, SignaturePipeline};
pub use error::CompositeError;
