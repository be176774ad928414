//! Types for debayering operations

use crate::image_pipeline::color::{ColorOrder, Image};
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::planes::ChannelPlanes;

/// Demosaicing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemosaicMethod {
    /// Fixed 3x3 bilinear kernels over the scattered channel layers
    #[default]
    Kernel,
    /// Linear interpolation from the `bayer` crate (2x2 CFA layouts only)
    Linear,
}

pub trait Demosaicer {
    /// Reconstructs a 3-channel 8-bit image from scattered mosaic layers whose
    /// samples span `bit_depth` bits.
    fn demosaic(&self, planes: &ChannelPlanes, bit_depth: u32, order: ColorOrder) -> Result<Image>;
}

/// Full-scale sample value for `bit_depth`, rejecting depths a `u16` can't hold.
pub fn full_scale(bit_depth: u32) -> Result<f32> {
    if bit_depth == 0 || bit_depth > 16 {
        return Err(ConversionError::UnsupportedFormat(format!(
            "unsupported bit depth: {}",
            bit_depth
        )));
    }
    Ok(((1u32 << bit_depth) - 1) as f32)
}

pub(crate) fn require_three_channels(planes: &ChannelPlanes) -> Result<()> {
    if planes.channels.len() != 3 {
        return Err(ConversionError::UnsupportedFormat(format!(
            "demosaicing needs 3 channels, layout has {}",
            planes.channels.len()
        )));
    }
    Ok(())
}
