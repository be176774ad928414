//! Pipeline conversions module
//!
//! Configuration, single-frame decoding and the file-level pipeline that
//! drives it over one image or a whole multi-frame file.

mod frame_decoder;
mod raw_to_image;
mod sequence;
pub mod types;


pub use frame_decoder::FrameDecoder;
pub use raw_to_image::RawToImagePipeline;
pub use sequence::{FrameOutcome, SequenceDecoder};
pub use types::{ConversionConfig, ConversionConfigBuilder, RawLayout};
