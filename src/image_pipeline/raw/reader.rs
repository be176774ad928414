use std::path::Path;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raw::types::{SampleBuffer, SampleWidth};

pub trait SampleReader {
    fn read_samples(
        &self,
        path: &Path,
        offset: u64,
        sample_width: SampleWidth,
        sample_count: usize,
    ) -> Result<SampleBuffer>;
}
