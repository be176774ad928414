//! Conversion configuration types

use tracing::warn;

use crate::image_pipeline::color::ColorOrder;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::debayer::DemosaicMethod;
use crate::image_pipeline::encode::TiffCompression;
use crate::image_pipeline::planes::{
    ChannelOffsetMap, ChromaOrder, Orientation, check_dimensions, yuv420_sample_count,
};
use crate::image_pipeline::raw::SampleWidth;

/// How samples of one frame are arranged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawLayout {
    /// Luma only, decoded to a gray image
    Luma,
    /// Planar 4:2:0: full-resolution Y followed by two quarter-size chroma planes
    Yuv420 { chroma: ChromaOrder },
    /// Single-channel color filter mosaic
    Bayer { offsets: ChannelOffsetMap },
}

impl Default for RawLayout {
    fn default() -> Self {
        RawLayout::Yuv420 {
            chroma: ChromaOrder::Uv,
        }
    }
}

/// Configuration for raw frame decoding
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
    /// Bytes per stored sample
    pub sample_width: SampleWidth,
    /// Plane layout of one frame
    pub layout: RawLayout,
    /// Row- or column-major sample order
    pub orientation: Orientation,
    /// Bytes skipped once at the start of the file
    pub header_len: u64,
    /// Channel order of decoded color images
    pub color_order: ColorOrder,
    /// Significant bits per Bayer sample; `None` means the full sample width
    pub bit_depth: Option<u32>,
    /// Accept odd YUV dimensions and truncate the chroma planes
    pub allow_odd_dimensions: bool,
    /// Largest accepted width or height
    pub max_dimension: Option<usize>,
    /// Demosaicing backend for Bayer layouts
    pub demosaic: DemosaicMethod,
    /// Compression used when the output is a TIFF
    pub tiff_compression: TiffCompression,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            sample_width: SampleWidth::One,
            layout: RawLayout::default(),
            orientation: Orientation::RowMajor,
            header_len: 0,
            color_order: ColorOrder::Rgb,
            bit_depth: None,
            allow_odd_dimensions: false,
            max_dimension: Some(50000),
            demosaic: DemosaicMethod::Kernel,
            tiff_compression: TiffCompression::None,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }

    /// Width and height the samples are shaped into.
    pub fn frame_geometry(&self) -> (usize, usize) {
        self.orientation.plane_geometry(self.width, self.height)
    }

    pub fn samples_per_frame(&self) -> usize {
        match self.layout {
            RawLayout::Yuv420 { .. } => yuv420_sample_count(self.width, self.height),
            RawLayout::Luma | RawLayout::Bayer { .. } => self.width * self.height,
        }
    }

    pub fn frame_bytes(&self) -> usize {
        self.samples_per_frame() * self.sample_width.bytes()
    }

    /// `frame_bytes` without wrapping; `None` when the frame size overflows `usize`.
    pub fn checked_frame_bytes(&self) -> Option<usize> {
        let pixels = self.width.checked_mul(self.height)?;
        let samples = match self.layout {
            RawLayout::Yuv420 { .. } => pixels.checked_mul(3)? / 2,
            RawLayout::Luma | RawLayout::Bayer { .. } => pixels,
        };
        samples.checked_mul(self.sample_width.bytes())
    }

    pub fn effective_bit_depth(&self) -> u32 {
        self.bit_depth.unwrap_or_else(|| self.sample_width.bits())
    }

    pub fn validate(&self) -> Result<()> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.max_dimension {
            if width > max || height > max {
                warn!("Image dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(ConversionError::InvalidDimensions(width, height));
            }
        }

        if self.checked_frame_bytes().is_none() {
            warn!("Frame size of {}x{} overflows", width, height);
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        if let RawLayout::Yuv420 { .. } = self.layout {
            check_dimensions(width, height, self.allow_odd_dimensions)?;
        }

        Ok(())
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    width: Option<usize>,
    height: Option<usize>,
    sample_width: Option<SampleWidth>,
    layout: Option<RawLayout>,
    orientation: Option<Orientation>,
    header_len: Option<u64>,
    color_order: Option<ColorOrder>,
    bit_depth: Option<Option<u32>>,
    allow_odd_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    demosaic: Option<DemosaicMethod>,
    tiff_compression: Option<TiffCompression>,
}

impl ConversionConfigBuilder {
    pub fn dimensions(mut self, width: usize, height: usize) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn sample_width(mut self, sample_width: SampleWidth) -> Self {
        self.sample_width = Some(sample_width);
        self
    }

    pub fn layout(mut self, layout: RawLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn header_len(mut self, header_len: u64) -> Self {
        self.header_len = Some(header_len);
        self
    }

    pub fn color_order(mut self, order: ColorOrder) -> Self {
        self.color_order = Some(order);
        self
    }

    pub fn bit_depth(mut self, bits: Option<u32>) -> Self {
        self.bit_depth = Some(bits);
        self
    }

    pub fn allow_odd_dimensions(mut self, allow: bool) -> Self {
        self.allow_odd_dimensions = Some(allow);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn demosaic(mut self, method: DemosaicMethod) -> Self {
        self.demosaic = Some(method);
        self
    }

    pub fn tiff_compression(mut self, compression: TiffCompression) -> Self {
        self.tiff_compression = Some(compression);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            width: self.width.unwrap_or(default.width),
            height: self.height.unwrap_or(default.height),
            sample_width: self.sample_width.unwrap_or(default.sample_width),
            layout: self.layout.unwrap_or(default.layout),
            orientation: self.orientation.unwrap_or(default.orientation),
            header_len: self.header_len.unwrap_or(default.header_len),
            color_order: self.color_order.unwrap_or(default.color_order),
            bit_depth: self.bit_depth.unwrap_or(default.bit_depth),
            allow_odd_dimensions: self
                .allow_odd_dimensions
                .unwrap_or(default.allow_odd_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            demosaic: self.demosaic.unwrap_or(default.demosaic),
            tiff_compression: self.tiff_compression.unwrap_or(default.tiff_compression),
        }
    }
}
