pub mod image_store;
pub mod quantize_service;
pub mod rendition_cache;

pub use image_store::{ImageRepository, InMemoryImageStore, InsertOutcome};
pub use quantize_service::QuantizeService;
pub use rendition_cache::{Rendition, RenditionCache};
