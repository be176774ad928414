//! Bilinear demosaicing with fixed 3x3 kernels.
//!
//! Every layer holds its samples at their mosaic positions and zero elsewhere.
//! Convolving a layer fills the gaps with the weighted mean of the sampled
//! neighbours: layers sampled once per 2x2 block use the full kernel, layers
//! sampled twice (green) use the cross kernel. Borders reflect without
//! repeating the edge sample, which keeps the mosaic phase intact.

use tracing::debug;

use crate::image_pipeline::color::{ColorOrder, Image, PixelFormat};
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::debayer::types::{Demosaicer, full_scale, require_three_channels};
use crate::image_pipeline::planes::{ChannelPlanes, Plane};

type Kernel = [[f32; 3]; 3];

const FULL_KERNEL: Kernel = [
    [0.25, 0.5, 0.25],
    [0.5, 1.0, 0.5],
    [0.25, 0.5, 0.25],
];

const CROSS_KERNEL: Kernel = [
    [0.0, 0.25, 0.0],
    [0.25, 1.0, 0.25],
    [0.0, 0.25, 0.0],
];

pub struct KernelDebayer;

fn kernel_for(positions: usize) -> Result<&'static Kernel> {
    match positions {
        1 => Ok(&FULL_KERNEL),
        2 => Ok(&CROSS_KERNEL),
        n => Err(ConversionError::UnsupportedFormat(format!(
            "no demosaic kernel for a channel sampled {} times per block",
            n
        ))),
    }
}

#[inline]
fn reflect_101(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    let i = if i < 0 { -i } else { i };
    let i = if i > last { 2 * last - i } else { i };
    i as usize
}

fn convolve(layer: &Plane<f32>, kernel: &Kernel) -> Vec<f32> {
    let (w, h) = (layer.width, layer.height);
    let mut out = vec![0.0f32; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (ky, row) in kernel.iter().enumerate() {
                let sy = reflect_101(y as isize + ky as isize - 1, h);
                for (kx, &weight) in row.iter().enumerate() {
                    if weight == 0.0 {
                        continue;
                    }
                    let sx = reflect_101(x as isize + kx as isize - 1, w);
                    acc += weight * layer.data[sy * w + sx];
                }
            }
            out[y * w + x] = acc;
        }
    }
    out
}

impl Demosaicer for KernelDebayer {
    fn demosaic(&self, planes: &ChannelPlanes, bit_depth: u32, order: ColorOrder) -> Result<Image> {
        require_three_channels(planes)?;
        let scale = full_scale(bit_depth)?;
        debug!(
            width = planes.width,
            height = planes.height,
            bit_depth,
            "Kernel demosaic"
        );

        let mut filtered = Vec::with_capacity(3);
        for (index, layer) in planes.channels.iter().enumerate() {
            let kernel = kernel_for(planes.offsets.positions(index))?;
            let normalized = layer.map(|v| v / scale);
            filtered.push(convolve(&normalized, kernel));
        }

        let channel_order = match order {
            ColorOrder::Rgb => [0, 1, 2],
            ColorOrder::Bgr => [2, 1, 0],
        };

        let pixels = planes.width * planes.height;
        let mut data = Vec::with_capacity(pixels * 3);
        for i in 0..pixels {
            for &c in &channel_order {
                data.push((filtered[c][i] * 255.0).round().clamp(0.0, 255.0) as u8);
            }
        }

        Ok(Image {
            width: planes.width,
            height: planes.height,
            format: PixelFormat::Color(order),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::planes::{ChannelOffsetMap, to_channel_planes};

    #[test]
    fn test_flat_field_passes_through() {
        for (w, h) in [(4, 4), (6, 2), (5, 3)] {
            let samples = vec![128u16; w * h];
            let planes = to_channel_planes(&samples, w, h, ChannelOffsetMap::RGGB).unwrap();
            let image = KernelDebayer.demosaic(&planes, 8, ColorOrder::Rgb).unwrap();

            assert_eq!(image.data.len(), w * h * 3);
            assert!(image.data.iter().all(|&v| v == 128), "{}x{}", w, h);
        }
    }

    #[test]
    fn test_bit_depth_normalization() {
        let samples = vec![16383u16; 16];
        let planes = to_channel_planes(&samples, 4, 4, ChannelOffsetMap::BGGR).unwrap();
        let image = KernelDebayer.demosaic(&planes, 14, ColorOrder::Rgb).unwrap();

        assert!(image.data.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_missing_red_is_interpolated() {
        // Red only on its own sites; green and blue sites get the average.
        let mut samples = vec![0u16; 16];
        for y in (0..4).step_by(2) {
            for x in (0..4).step_by(2) {
                samples[y * 4 + x] = 200;
            }
        }
        let planes = to_channel_planes(&samples, 4, 4, ChannelOffsetMap::RGGB).unwrap();
        let image = KernelDebayer.demosaic(&planes, 8, ColorOrder::Rgb).unwrap();

        assert_eq!(image.pixel(0, 0), &[200, 0, 0]);
        assert_eq!(image.pixel(1, 0)[0], 200);
        assert_eq!(image.pixel(1, 1)[0], 200);
        assert_eq!(image.pixel(1, 1)[1], 0);
    }

    #[test]
    fn test_bgr_output() {
        let mut samples = vec![0u16; 16];
        samples[0] = 255;
        let planes = to_channel_planes(&samples, 4, 4, ChannelOffsetMap::RGGB).unwrap();
        let image = KernelDebayer.demosaic(&planes, 8, ColorOrder::Bgr).unwrap();

        assert_eq!(image.format, PixelFormat::Color(ColorOrder::Bgr));
        assert_eq!(image.pixel(0, 0), &[0, 0, 255]);
    }

    #[test]
    fn test_unsupported_layouts() {
        let two = ChannelOffsetMap::new(2, 2, &[&[(0, 0), (1, 1)], &[(1, 0), (0, 1)]]);
        let planes = to_channel_planes(&[0; 16], 4, 4, two).unwrap();
        assert!(matches!(
            KernelDebayer.demosaic(&planes, 8, ColorOrder::Rgb),
            Err(ConversionError::UnsupportedFormat(_))
        ));

        let planes = to_channel_planes(&[0; 16], 4, 4, ChannelOffsetMap::RGGB).unwrap();
        assert!(KernelDebayer.demosaic(&planes, 17, ColorOrder::Rgb).is_err());
    }

    #[test]
    fn test_reflect_101() {
        assert_eq!(reflect_101(-1, 4), 1);
        assert_eq!(reflect_101(4, 4), 2);
        assert_eq!(reflect_101(2, 4), 2);
        assert_eq!(reflect_101(-1, 1), 0);
    }
}
