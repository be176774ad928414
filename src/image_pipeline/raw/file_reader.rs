//! Sample reader for headerless raw pixel dumps on disk.
//!
//! Every call opens the file, seeks to the requested offset, reads exactly the
//! requested byte count and drops the handle again, so nothing is held open
//! between frames of a multi-frame file.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raw::reader::SampleReader;
use crate::image_pipeline::raw::types::{SampleBuffer, SampleWidth};

/// Reads samples straight from a file path.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSampleReader;

impl SampleReader for FileSampleReader {
    /// Reads `sample_count` samples of `sample_width` bytes starting at `offset`.
    ///
    /// # Returns
    ///
    /// * `Ok(SampleBuffer)` - exactly `sample_count` samples
    /// * `Err(ConversionError::ShortRead)` - the file ends before the last sample
    /// * `Err(ConversionError::InputReadError)` - the file could not be opened
    fn read_samples(
        &self,
        path: &Path,
        offset: u64,
        sample_width: SampleWidth,
        sample_count: usize,
    ) -> Result<SampleBuffer> {
        let mut file = File::open(path).map_err(|e| {
            ConversionError::InputReadError(format!("{}: {}", path.display(), e))
        })?;
        read_samples_from(&mut file, offset, sample_width, sample_count)
    }
}

/// Reads samples from any seekable source.
pub fn read_samples_from<S: Read + Seek>(
    source: &mut S,
    offset: u64,
    sample_width: SampleWidth,
    sample_count: usize,
) -> Result<SampleBuffer> {
    let expected = sample_count.checked_mul(sample_width.bytes()).ok_or_else(|| {
        ConversionError::InputReadError(format!("sample count {} overflows", sample_count))
    })?;
    debug!(offset, expected, "Reading raw samples");

    // The buffer grows with what the source actually holds, so a short file
    // never reserves a full frame.
    source.seek(SeekFrom::Start(offset))?;
    let mut bytes = Vec::new();
    source.by_ref().take(expected as u64).read_to_end(&mut bytes)?;

    if bytes.len() < expected {
        return Err(ConversionError::ShortRead {
            offset,
            expected,
            available: bytes.len(),
        });
    }

    let samples: Vec<u16> = match sample_width {
        SampleWidth::One => bytes.iter().map(|&b| b as u16).collect(),
        SampleWidth::Two => bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect(),
    };

    Ok(SampleBuffer {
        samples,
        sample_width,
        offset,
    })
}
