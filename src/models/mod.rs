pub mod config;
pub mod image;

pub use config::AppConfig;
pub use image::{sanitize_stem, ImageId, StoredImage};
