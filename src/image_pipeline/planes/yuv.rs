use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::planes::types::{ChromaOrder, Plane, YuvPlanes};

/// Rejects empty geometry, and odd geometry unless chroma truncation is allowed.
///
/// Odd sizes lose a chroma row or column to floor division, which shifts every
/// byte offset that follows.
pub fn check_dimensions(width: usize, height: usize, allow_odd: bool) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(ConversionError::InvalidDimensions(width, height));
    }
    if !allow_odd && (width % 2 != 0 || height % 2 != 0) {
        return Err(ConversionError::OddDimensions(width, height));
    }
    Ok(())
}

/// Number of samples a 4:2:0 frame occupies: `floor(width * height * 1.5)`.
pub fn yuv420_sample_count(width: usize, height: usize) -> usize {
    width * height * 3 / 2
}

/// Reshapes a luma-only frame into a single plane.
pub fn to_luma_plane(samples: &[u16], width: usize, height: usize) -> Result<Plane<u16>> {
    Plane::new(width, height, samples.to_vec())
}

/// Splits a planar 4:2:0 frame into Y, U and V.
///
/// Each chroma plane takes `width * height / 2 / 2` samples directly after the
/// previous plane and is shaped `(width / 2) x (height / 2)`. When those two
/// counts disagree (odd geometry) the frame cannot be shaped and the call fails.
pub fn to_yuv_planes(
    samples: &[u16],
    width: usize,
    height: usize,
    chroma: ChromaOrder,
) -> Result<YuvPlanes> {
    let expected = yuv420_sample_count(width, height);
    if samples.len() != expected {
        return Err(ConversionError::ShapeMismatch {
            expected,
            actual: samples.len(),
        });
    }

    let luma_len = width * height;
    let chroma_len = width * height / 2 / 2;
    let (chroma_width, chroma_height) = (width / 2, height / 2);

    debug!(
        luma_len,
        chroma_len, chroma_width, chroma_height, "Splitting 4:2:0 planes"
    );

    let y = Plane::new(width, height, samples[..luma_len].to_vec())?;
    let first = Plane::new(
        chroma_width,
        chroma_height,
        samples[luma_len..luma_len + chroma_len].to_vec(),
    )?;
    let second = Plane::new(
        chroma_width,
        chroma_height,
        samples[luma_len + chroma_len..luma_len + 2 * chroma_len].to_vec(),
    )?;

    let (u, v) = match chroma {
        ChromaOrder::Uv => (first, second),
        ChromaOrder::Vu => (second, first),
    };

    Ok(YuvPlanes { y, u, v })
}
