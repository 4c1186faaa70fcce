//! Lumabits - luminosity bit-depth quantizer
//!
//! HTTP service and CLI around the `luma-quant` core: PNG upload, quantized
//! export and luminosity histograms for visualising colour banding.
//! This library exposes modules for integration testing.

pub mod api;
pub mod cli;
pub mod codec;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
