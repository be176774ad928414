//! Decoded image types

/// Channel order of a 3-channel image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorOrder {
    /// Red, green, blue
    #[default]
    Rgb,
    /// Blue, green, red (the order OpenCV-style encoders expect)
    Bgr,
}

/// Pixel layout of an [`Image`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// One 8-bit channel
    Gray,
    /// Three interleaved 8-bit channels in the given order
    Color(ColorOrder),
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Gray => 1,
            PixelFormat::Color(_) => 3,
        }
    }
}

/// 8-bit image, row-major, channels interleaved
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Channel count and order of `data`
    pub format: PixelFormat,
    /// Pixel data, `width * height * channels` bytes
    pub data: Vec<u8>,
}

impl Image {
    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    /// Returns the pixel at `(x, y)` as a channel slice.
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let channels = self.channels();
        let start = (y * self.width + x) * channels;
        &self.data[start..start + channels]
    }

    /// Reorders a color image to `order`; gray images are returned unchanged.
    pub fn into_order(mut self, order: ColorOrder) -> Self {
        if let PixelFormat::Color(current) = self.format {
            if current != order {
                for pixel in self.data.chunks_exact_mut(3) {
                    pixel.swap(0, 2);
                }
                self.format = PixelFormat::Color(order);
            }
        }
        self
    }
}
