use std::path::Path;

use tracing::debug;

use crate::image_pipeline::color::{Image, PixelFormat, yuv420_to_image};
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::conversions::types::{ConversionConfig, RawLayout};
use crate::image_pipeline::debayer::demosaic;
use crate::image_pipeline::planes::{to_channel_planes, to_luma_plane, to_yuv_planes};
use crate::image_pipeline::raw::SampleReader;

/// Reads one frame and runs it through the layout's decode path.
pub struct FrameDecoder<R: SampleReader> {
    reader: R,
    config: ConversionConfig,
}

impl<R: SampleReader> FrameDecoder<R> {
    pub fn new(reader: R, config: ConversionConfig) -> Self {
        Self { reader, config }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }

    /// Decodes the frame starting at byte `offset` of `path`.
    ///
    /// Returns the image together with the number of bytes the frame occupied.
    pub fn decode_at(&self, path: &Path, offset: u64) -> Result<(Image, usize)> {
        let buffer = {
            let _span = tracing::info_span!("read_samples", offset).entered();
            self.reader.read_samples(
                path,
                offset,
                self.config.sample_width,
                self.config.samples_per_frame(),
            )?
        };

        let image = self.decode_samples(&buffer.samples)?;
        Ok((image, buffer.bytes_read()))
    }

    /// Decodes one frame's worth of samples.
    pub fn decode_samples(&self, samples: &[u16]) -> Result<Image> {
        let (width, height) = self.config.frame_geometry();
        let order = self.config.color_order;

        match self.config.layout {
            RawLayout::Luma => {
                let _span = tracing::info_span!("decode_luma", width, height).entered();
                let plane = to_luma_plane(samples, width, height)?;
                Ok(Image {
                    width,
                    height,
                    format: PixelFormat::Gray,
                    data: plane.data.iter().map(|&s| s as u8).collect(),
                })
            }
            RawLayout::Yuv420 { chroma } => {
                let _span = tracing::info_span!("decode_yuv420", width, height).entered();
                let planes = to_yuv_planes(samples, width, height, chroma)?;
                yuv420_to_image(&planes, order)
            }
            RawLayout::Bayer { offsets } => {
                let _span = tracing::info_span!("decode_bayer", width, height).entered();
                let planes = to_channel_planes(samples, width, height, offsets)?;
                let bit_depth = self.config.effective_bit_depth();
                debug!(bit_depth, method = ?self.config.demosaic, "Demosaicing");
                demosaic(&planes, bit_depth, self.config.demosaic, order)
            }
        }
    }
}
