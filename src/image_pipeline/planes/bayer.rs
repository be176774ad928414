use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::planes::types::{ChannelPlanes, Plane};

/// Which `(x, y)` positions inside each mosaic block belong to which output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelOffsetMap {
    /// Block width (horizontal step)
    pub block_width: usize,
    /// Block height (vertical step)
    pub block_height: usize,
    /// Per channel, the `(x, y)` offsets inside the block it samples
    pub channels: &'static [&'static [(usize, usize)]],
}

impl ChannelOffsetMap {
    /// Red top-left, green on the anti-diagonal, blue bottom-right.
    pub const RGGB: ChannelOffsetMap = ChannelOffsetMap::new(
        2,
        2,
        &[&[(0, 0)], &[(1, 0), (0, 1)], &[(1, 1)]],
    );
    pub const BGGR: ChannelOffsetMap = ChannelOffsetMap::new(
        2,
        2,
        &[&[(1, 1)], &[(1, 0), (0, 1)], &[(0, 0)]],
    );
    pub const GRBG: ChannelOffsetMap = ChannelOffsetMap::new(
        2,
        2,
        &[&[(1, 0)], &[(0, 0), (1, 1)], &[(0, 1)]],
    );
    pub const GBRG: ChannelOffsetMap = ChannelOffsetMap::new(
        2,
        2,
        &[&[(0, 1)], &[(0, 0), (1, 1)], &[(1, 0)]],
    );

    pub const fn new(
        block_width: usize,
        block_height: usize,
        channels: &'static [&'static [(usize, usize)]],
    ) -> Self {
        Self {
            block_width,
            block_height,
            channels,
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of block positions the given channel samples.
    pub fn positions(&self, channel: usize) -> usize {
        self.channels[channel].len()
    }

    fn validate(&self) -> Result<()> {
        if self.block_width == 0 || self.block_height == 0 {
            return Err(ConversionError::UnsupportedFormat(format!(
                "empty mosaic block {}x{}",
                self.block_width, self.block_height
            )));
        }
        for &(x, y) in self.channels.iter().flat_map(|offsets| offsets.iter()) {
            if x >= self.block_width || y >= self.block_height {
                return Err(ConversionError::UnsupportedFormat(format!(
                    "offset ({}, {}) outside {}x{} block",
                    x, y, self.block_width, self.block_height
                )));
            }
        }
        Ok(())
    }
}

impl Default for ChannelOffsetMap {
    fn default() -> Self {
        ChannelOffsetMap::RGGB
    }
}

/// Scatters a `width x height` mosaic into one layer per channel.
pub fn to_channel_planes(
    samples: &[u16],
    width: usize,
    height: usize,
    offsets: ChannelOffsetMap,
) -> Result<ChannelPlanes> {
    offsets.validate()?;
    if samples.len() != width * height {
        return Err(ConversionError::ShapeMismatch {
            expected: width * height,
            actual: samples.len(),
        });
    }

    let channels = offsets
        .channels
        .iter()
        .map(|channel_offsets| {
            let mut layer = Plane::filled(width, height, 0.0f32);
            for &(ox, oy) in channel_offsets.iter() {
                for y in (oy..height).step_by(offsets.block_height) {
                    for x in (ox..width).step_by(offsets.block_width) {
                        let idx = y * width + x;
                        layer.data[idx] = samples[idx] as f32;
                    }
                }
            }
            layer
        })
        .collect();

    Ok(ChannelPlanes {
        width,
        height,
        channels,
        offsets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rggb_scatter() {
        let samples: Vec<u16> = (1..=16).collect();
        let planes = to_channel_planes(&samples, 4, 4, ChannelOffsetMap::RGGB).unwrap();

        assert_eq!(planes.channels.len(), 3);
        let red = &planes.channels[0];
        assert_eq!(red.get(0, 0), 1.0);
        assert_eq!(red.get(2, 0), 3.0);
        assert_eq!(red.get(0, 2), 9.0);
        assert_eq!(red.get(1, 0), 0.0);

        let green = &planes.channels[1];
        assert_eq!(green.get(1, 0), 2.0);
        assert_eq!(green.get(0, 1), 5.0);
        assert_eq!(green.get(0, 0), 0.0);
        assert_eq!(green.get(1, 1), 0.0);

        let blue = &planes.channels[2];
        assert_eq!(blue.get(1, 1), 6.0);
        assert_eq!(blue.get(3, 3), 16.0);
        assert_eq!(blue.data.iter().filter(|&&v| v != 0.0).count(), 4);
    }

    #[test]
    fn test_every_position_assigned_once() {
        let samples = vec![7u16; 6 * 4];
        let planes = to_channel_planes(&samples, 6, 4, ChannelOffsetMap::GBRG).unwrap();

        for idx in 0..samples.len() {
            let hits = planes
                .channels
                .iter()
                .filter(|layer| layer.data[idx] != 0.0)
                .count();
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn test_offset_outside_block_is_rejected() {
        let bad = ChannelOffsetMap::new(2, 2, &[&[(2, 0)]]);
        assert!(matches!(
            to_channel_planes(&[0; 4], 2, 2, bad),
            Err(ConversionError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_wrong_sample_count_is_rejected() {
        assert!(matches!(
            to_channel_planes(&[0; 5], 2, 2, ChannelOffsetMap::RGGB),
            Err(ConversionError::ShapeMismatch { expected: 4, actual: 5 })
        ));
    }
}
