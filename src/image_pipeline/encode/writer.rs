use std::path::Path;

use crate::image_pipeline::color::Image;
use crate::image_pipeline::common::error::Result;

pub trait ImageWriter {
    fn write_image(&self, image: &Image, path: &Path) -> Result<()>;
}
