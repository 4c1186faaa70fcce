pub mod histogram;
pub mod images;

pub use histogram::{__path_handle_histogram, __path_handle_render};
pub use histogram::{handle_histogram, handle_render, HistogramResponse, RenderResponse};
pub use images::{__path_handle_original, __path_handle_quantized, __path_handle_upload};
pub use images::{
    handle_original, handle_quantized, handle_upload, DepthQuery, UploadQuery, UploadResponse,
    BIT_DEPTH_HEADER,
};
