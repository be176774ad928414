//! Raw sample reading module
//!
//! Reads fixed-width little-endian samples out of headerless pixel dumps.

mod reader;
mod file_reader;
pub mod types;

pub use reader::SampleReader;
pub use file_reader::{FileSampleReader, read_samples_from};
pub use types::{SampleBuffer, SampleWidth};
