//! Public API for the luma-quant crate.
//!
//! This module provides the high-level [`Quantizer`] builder and the
//! [`QuantizeError`] type shared by every fallible operation.

mod error;
mod quantizer;

pub use error::QuantizeError;
pub use quantizer::Quantizer;
