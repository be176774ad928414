//! Raw frame decoding pipeline
//!
//! Turns headerless planar YUV and Bayer pixel dumps into 8-bit images:
//! sample reading, plane splitting, chroma upsampling, YUV to RGB conversion,
//! demosaicing, and encoding the result to disk.

pub mod raw;
pub mod planes;
pub mod color;
pub mod debayer;
pub mod encode;
pub mod conversions;
pub mod common;

pub use common::{
    ConversionError,
    Result,
};

pub use raw::{
    FileSampleReader,
    SampleBuffer,
    SampleReader,
    SampleWidth,
};

pub use planes::{
    ChannelOffsetMap,
    ChromaOrder,
    Orientation,
};

pub use color::{
    ColorOrder,
    Image,
    PixelFormat,
};

pub use debayer::DemosaicMethod;

pub use encode::{
    ImageWriter,
    StandardImageWriter,
    TiffCompression,
};

pub use conversions::{
    ConversionConfig,
    ConversionConfigBuilder,
    FrameOutcome,
    RawLayout,
    RawToImagePipeline,
    SequenceDecoder,
};
