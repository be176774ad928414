use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::planes::Plane;

/// Source coordinate and weight of the right/lower neighbour for one output index.
///
/// Pixel centres are aligned (`src = (dst + 0.5) * scale - 0.5`) and the source
/// index is clamped to the plane, so edges replicate.
#[inline]
fn source_tap(dst: usize, scale: f64, src_len: usize) -> (usize, usize, f64) {
    let pos = ((dst as f64 + 0.5) * scale - 0.5).max(0.0);
    let i0 = pos.floor() as usize;
    if i0 >= src_len - 1 {
        return (src_len - 1, src_len - 1, 0.0);
    }
    (i0, i0 + 1, pos - i0 as f64)
}

/// Resizes an 8-bit plane to `target_width x target_height` by bilinear interpolation.
///
/// Interpolated values are rounded back to 8 bits, then promoted to `f64` for
/// the color transform.
pub fn upsample_bilinear(
    plane: &Plane<u8>,
    target_width: usize,
    target_height: usize,
) -> Result<Plane<f64>> {
    if plane.width == 0 || plane.height == 0 {
        return Err(ConversionError::InvalidDimensions(plane.width, plane.height));
    }

    let scale_x = plane.width as f64 / target_width as f64;
    let scale_y = plane.height as f64 / target_height as f64;

    let columns: Vec<(usize, usize, f64)> = (0..target_width)
        .map(|x| source_tap(x, scale_x, plane.width))
        .collect();

    let mut data = Vec::with_capacity(target_width * target_height);
    for y in 0..target_height {
        let (y0, y1, wy) = source_tap(y, scale_y, plane.height);
        for &(x0, x1, wx) in &columns {
            let top = plane.get(x0, y0) as f64 * (1.0 - wx) + plane.get(x1, y0) as f64 * wx;
            let bottom = plane.get(x0, y1) as f64 * (1.0 - wx) + plane.get(x1, y1) as f64 * wx;
            let value = top * (1.0 - wy) + bottom * wy;
            data.push(value.round().clamp(0.0, 255.0));
        }
    }

    Plane::new(target_width, target_height, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_plane_stays_constant() {
        let plane = Plane::filled(3, 2, 77u8);
        let up = upsample_bilinear(&plane, 6, 4).unwrap();

        assert_eq!((up.width, up.height), (6, 4));
        assert!(up.data.iter().all(|&v| v == 77.0));
    }

    #[test]
    fn test_doubling_interpolates_between_samples() {
        let plane = Plane::new(2, 1, vec![0u8, 100]).unwrap();
        let up = upsample_bilinear(&plane, 4, 1).unwrap();

        // Centres map to -0.25, 0.25, 0.75, 1.25 in source space.
        assert_eq!(up.data, vec![0.0, 25.0, 75.0, 100.0]);
    }

    #[test]
    fn test_not_nearest_neighbour() {
        let plane = Plane::new(2, 2, vec![0u8, 200, 200, 0]).unwrap();
        let up = upsample_bilinear(&plane, 4, 4).unwrap();

        // Inner pixel (1,1) sits at source (0.25, 0.25).
        let expected = (0.0 * 0.75 + 200.0 * 0.25) * 0.75 + (200.0 * 0.75 + 0.0 * 0.25) * 0.25;
        assert_eq!(up.get(1, 1), f64::round(expected));
        assert_eq!(up.get(0, 0), 0.0);
    }

    #[test]
    fn test_empty_source_is_rejected() {
        let plane: Plane<u8> = Plane::new(0, 1, vec![]).unwrap();
        assert!(upsample_bilinear(&plane, 1, 2).is_err());
    }
}
