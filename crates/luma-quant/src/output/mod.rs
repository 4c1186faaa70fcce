//! Output of a full quantize-then-histogram pass.

mod quantized_image;

pub use quantized_image::QuantizedImage;
