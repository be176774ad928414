//! Plane data types

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::planes::bayer::ChannelOffsetMap;

/// A single 2-D sample array, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Plane<T> {
    /// Width of the plane in samples
    pub width: usize,
    /// Height of the plane in samples
    pub height: usize,
    /// Samples, `width * height` of them
    pub data: Vec<T>,
}

impl<T: Copy> Plane<T> {
    pub fn new(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != width * height {
            return Err(ConversionError::ShapeMismatch {
                expected: width * height,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[y * self.width + x]
    }

    pub fn map<U, F: Fn(T) -> U>(&self, f: F) -> Plane<U> {
        Plane {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}

/// Storage order of the two chroma planes following luma
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChromaOrder {
    /// U plane first, then V (I420 / IYUV)
    #[default]
    Uv,
    /// V plane first, then U (YV12)
    Vu,
}

/// How the flat sample sequence maps onto the image grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Rows of `width` samples
    #[default]
    RowMajor,
    /// Rows of `height` samples: width and height trade places, the sample
    /// order is not transposed
    ColumnMajor,
}

impl Orientation {
    /// Returns the (width, height) the samples are laid out with.
    pub fn plane_geometry(self, width: usize, height: usize) -> (usize, usize) {
        match self {
            Orientation::RowMajor => (width, height),
            Orientation::ColumnMajor => (height, width),
        }
    }
}

/// Planar 4:2:0 frame split into its three planes
#[derive(Debug, Clone)]
pub struct YuvPlanes {
    /// Full resolution luma
    pub y: Plane<u16>,
    /// Half resolution blue-difference chroma
    pub u: Plane<u16>,
    /// Half resolution red-difference chroma
    pub v: Plane<u16>,
}

/// Bayer mosaic scattered into one layer per output channel
///
/// Positions a channel does not sample are zero.
#[derive(Debug, Clone)]
pub struct ChannelPlanes {
    pub width: usize,
    pub height: usize,
    pub channels: Vec<Plane<f32>>,
    /// Layout the layers were scattered with
    pub offsets: ChannelOffsetMap,
}
