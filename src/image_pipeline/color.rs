//! Color reconstruction module
//!
//! Chroma upsampling and the YUV to RGB transform, plus the 8-bit image type
//! every decode path produces.

mod upsample;
mod yuv_to_rgb;
pub mod types;

pub use upsample::upsample_bilinear;
pub use yuv_to_rgb::{yuv420_to_image, yuv_to_rgb};
pub use types::{ColorOrder, Image, PixelFormat};
