//! Image encoding module
//!
//! Writes decoded images to disk, picking the container from the output path
//! extension.

mod writer;
mod tiff_writer;
mod standard_image_writer;
pub mod types;

pub use writer::ImageWriter;
pub use tiff_writer::write_tiff;
pub use standard_image_writer::{StandardImageWriter, default_output_path};
pub use types::{OutputFormat, TiffCompression};
