use std::io::Cursor;

use bayer::{BayerDepth, CFA, Demosaic, RasterDepth, RasterMut};
use tracing::info;

use crate::image_pipeline::color::{ColorOrder, Image, PixelFormat};
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::debayer::types::{Demosaicer, full_scale, require_three_channels};
use crate::image_pipeline::planes::{ChannelOffsetMap, ChannelPlanes};

/// Linear demosaicing through the `bayer` crate.
pub struct CpuDebayer;

fn cfa_for(offsets: &ChannelOffsetMap) -> Result<CFA> {
    match *offsets {
        m if m == ChannelOffsetMap::RGGB => Ok(CFA::RGGB),
        m if m == ChannelOffsetMap::BGGR => Ok(CFA::BGGR),
        m if m == ChannelOffsetMap::GRBG => Ok(CFA::GRBG),
        m if m == ChannelOffsetMap::GBRG => Ok(CFA::GBRG),
        _ => Err(ConversionError::UnsupportedFormat(
            "linear demosaic needs a standard 2x2 CFA layout".to_string(),
        )),
    }
}

impl Demosaicer for CpuDebayer {
    fn demosaic(&self, planes: &ChannelPlanes, bit_depth: u32, order: ColorOrder) -> Result<Image> {
        require_three_channels(planes)?;
        let scale = full_scale(bit_depth)?;
        let cfa = cfa_for(&planes.offsets)?;
        let width = planes.width;
        let height = planes.height;
        info!("Starting CPU debayering for image {}x{}", width, height);

        // Each position is sampled by exactly one layer, so the sum is the mosaic.
        // Samples above full scale clamp instead of wrapping when narrowed.
        let mosaic: Vec<u16> = (0..width * height)
            .map(|i| {
                let value = planes.channels.iter().map(|layer| layer.data[i]).sum::<f32>();
                value.clamp(0.0, scale) as u16
            })
            .collect();

        // bayer crate only supports 8 and 16 bit
        let (bayer_depth, raster_depth, bytes_per_pixel) = if bit_depth <= 8 {
            (BayerDepth::Depth8, RasterDepth::Depth8, 1)
        } else {
            (BayerDepth::Depth16LE, RasterDepth::Depth16, 2)
        };

        let bayer_bytes: Vec<u8> = if bit_depth <= 8 {
            mosaic.iter().map(|&val| val as u8).collect()
        } else {
            mosaic.iter().flat_map(|&val| val.to_le_bytes()).collect()
        };

        let mut output_buf = vec![0u8; width * height * 3 * bytes_per_pixel];
        let mut cursor = Cursor::new(&bayer_bytes[..]);
        let mut output_raster = RasterMut::new(width, height, raster_depth, &mut output_buf);

        bayer::run_demosaic(
            &mut cursor,
            bayer_depth,
            cfa,
            Demosaic::Linear,
            &mut output_raster,
        )
        .map_err(|e| ConversionError::UnsupportedFormat(format!("demosaic failed: {:?}", e)))?;

        let rgb: Vec<[u8; 3]> = output_buf
            .chunks_exact(bytes_per_pixel * 3)
            .map(|pixel_bytes| {
                let channel = |c: usize| -> f32 {
                    if bytes_per_pixel == 1 {
                        pixel_bytes[c] as f32
                    } else {
                        u16::from_le_bytes([pixel_bytes[2 * c], pixel_bytes[2 * c + 1]]) as f32
                    }
                };
                let to_u8 = |v: f32| (v / scale * 255.0).round().clamp(0.0, 255.0) as u8;
                [to_u8(channel(0)), to_u8(channel(1)), to_u8(channel(2))]
            })
            .collect();

        let data = rgb
            .into_iter()
            .flat_map(|[r, g, b]| match order {
                ColorOrder::Rgb => [r, g, b],
                ColorOrder::Bgr => [b, g, r],
            })
            .collect();

        Ok(Image {
            width,
            height,
            format: PixelFormat::Color(order),
            data,
        })
    }
}
