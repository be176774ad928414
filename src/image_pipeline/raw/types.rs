//! Raw sample data types

use crate::image_pipeline::common::error::ConversionError;

/// Width of a single stored sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleWidth {
    /// One unsigned byte per sample
    One,
    /// Two little-endian bytes per sample
    Two,
}

impl SampleWidth {
    pub fn bytes(self) -> usize {
        match self {
            SampleWidth::One => 1,
            SampleWidth::Two => 2,
        }
    }

    /// Bit depth a full-scale sample of this width spans.
    pub fn bits(self) -> u32 {
        self.bytes() as u32 * 8
    }
}

impl TryFrom<usize> for SampleWidth {
    type Error = ConversionError;

    fn try_from(bpp: usize) -> Result<Self, Self::Error> {
        match bpp {
            1 => Ok(SampleWidth::One),
            2 => Ok(SampleWidth::Two),
            other => Err(ConversionError::UnsupportedFormat(format!(
                "unsupported bytes per pixel: {}",
                other
            ))),
        }
    }
}

/// Samples read from a byte range of a raw file
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    /// Decoded samples in file order
    ///
    /// Two-byte samples keep their bit pattern, so a signed reading of the
    /// same bytes is `sample as i16`.
    pub samples: Vec<u16>,
    /// Width each sample occupied on disk
    pub sample_width: SampleWidth,
    /// Byte offset the read started at
    pub offset: u64,
}

impl SampleBuffer {
    /// Number of bytes this buffer consumed from the file.
    pub fn bytes_read(&self) -> usize {
        self.samples.len() * self.sample_width.bytes()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_width_from_bpp() {
        assert_eq!(SampleWidth::try_from(1usize).unwrap(), SampleWidth::One);
        assert_eq!(SampleWidth::try_from(2usize).unwrap(), SampleWidth::Two);
        assert!(matches!(
            SampleWidth::try_from(3usize),
            Err(ConversionError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            SampleWidth::try_from(0usize),
            Err(ConversionError::UnsupportedFormat(_))
        ));
    }
}
