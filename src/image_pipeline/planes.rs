//! Plane splitting module
//!
//! Turns a flat sample sequence into luma/chroma planes for planar YUV, or
//! into per-channel layers for Bayer mosaics.

mod yuv;
mod bayer;
pub mod types;

pub use yuv::{check_dimensions, to_luma_plane, to_yuv_planes, yuv420_sample_count};
pub use bayer::{ChannelOffsetMap, to_channel_planes};
pub use types::{ChannelPlanes, ChromaOrder, Orientation, Plane, YuvPlanes};
