use tracing::debug;

use crate::image_pipeline::color::types::{ColorOrder, Image, PixelFormat};
use crate::image_pipeline::color::upsample::upsample_bilinear;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::planes::{Plane, YuvPlanes};

const CHROMA_BIAS: f64 = 128.0;
const R_FROM_V: f64 = 1.370705;
const G_FROM_V: f64 = 0.698001;
const G_FROM_U: f64 = 0.337633;
const B_FROM_U: f64 = 1.732446;

#[inline]
fn quantize(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Converts full-resolution Y, U and V planes into an 8-bit color image.
///
/// Each output channel is clamped to `[0, 255]` on its own and truncated to
/// 8 bits. Channels are written in `order`.
pub fn yuv_to_rgb(
    y: &Plane<f64>,
    u: &Plane<f64>,
    v: &Plane<f64>,
    order: ColorOrder,
) -> Result<Image> {
    for chroma in [u, v] {
        if chroma.width != y.width || chroma.height != y.height {
            return Err(ConversionError::ShapeMismatch {
                expected: y.data.len(),
                actual: chroma.data.len(),
            });
        }
    }

    let mut data = Vec::with_capacity(y.data.len() * 3);
    for ((&luma, &cb), &cr) in y.data.iter().zip(&u.data).zip(&v.data) {
        let cb = cb - CHROMA_BIAS;
        let cr = cr - CHROMA_BIAS;
        let r = quantize(luma + R_FROM_V * cr);
        let g = quantize(luma - G_FROM_V * cr - G_FROM_U * cb);
        let b = quantize(luma + B_FROM_U * cb);
        match order {
            ColorOrder::Rgb => data.extend_from_slice(&[r, g, b]),
            ColorOrder::Bgr => data.extend_from_slice(&[b, g, r]),
        }
    }

    Ok(Image {
        width: y.width,
        height: y.height,
        format: PixelFormat::Color(order),
        data,
    })
}

/// Upsamples the chroma of a 4:2:0 frame to luma resolution and converts it to color.
///
/// Chroma samples are narrowed to their low byte before resizing; luma keeps
/// its full value and only saturates in the final clamp.
pub fn yuv420_to_image(planes: &YuvPlanes, order: ColorOrder) -> Result<Image> {
    let (width, height) = (planes.y.width, planes.y.height);
    debug!(width, height, "Upsampling chroma");

    let u = upsample_bilinear(&planes.u.map(|s| s as u8), width, height)?;
    let v = upsample_bilinear(&planes.v.map(|s| s as u8), width, height)?;
    let y = planes.y.map(|s| s as f64);

    yuv_to_rgb(&y, &u, &v, order)
}
