//! Debayering module for reconstructing color images from Bayer mosaics

pub mod kernel_debayer;
pub mod cpu_debayer;
pub mod types;

pub use kernel_debayer::KernelDebayer;
pub use cpu_debayer::CpuDebayer;
pub use types::{DemosaicMethod, Demosaicer};

use crate::image_pipeline::color::{ColorOrder, Image};
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::planes::ChannelPlanes;

/// Demosaics with the backend selected by `method`.
pub fn demosaic(
    planes: &ChannelPlanes,
    bit_depth: u32,
    method: DemosaicMethod,
    order: ColorOrder,
) -> Result<Image> {
    match method {
        DemosaicMethod::Kernel => KernelDebayer.demosaic(planes, bit_depth, order),
        DemosaicMethod::Linear => CpuDebayer.demosaic(planes, bit_depth, order),
    }
}
