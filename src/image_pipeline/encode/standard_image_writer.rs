use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{ExtendedColorType, ImageFormat};
use tracing::debug;

use crate::image_pipeline::color::{ColorOrder, Image, PixelFormat};
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::encode::tiff_writer::write_tiff;
use crate::image_pipeline::encode::types::{OutputFormat, TiffCompression};
use crate::image_pipeline::encode::writer::ImageWriter;

/// Writes TIFF through the `tiff` crate and PNG/JPEG through `image`.
#[derive(Debug, Default, Clone)]
pub struct StandardImageWriter {
    pub tiff_compression: TiffCompression,
}

impl StandardImageWriter {
    pub fn new(tiff_compression: TiffCompression) -> Self {
        Self { tiff_compression }
    }
}

impl ImageWriter for StandardImageWriter {
    fn write_image(&self, image: &Image, path: &Path) -> Result<()> {
        let format = OutputFormat::from_path(path)?;
        debug!(
            path = %path.display(),
            ?format,
            width = image.width,
            height = image.height,
            "Writing image"
        );

        if format == OutputFormat::Tiff {
            let file = File::create(path).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", path.display(), e))
            })?;
            let mut output = BufWriter::new(file);
            write_tiff(image, &mut output, self.tiff_compression)?;
            output.flush()?;
            return Ok(());
        }

        // Encoders take RGB; swap explicitly so BGR never reaches them.
        let (data, color_type) = match image.format {
            PixelFormat::Gray => (image.data.clone(), ExtendedColorType::L8),
            PixelFormat::Color(_) => (
                image.clone().into_order(ColorOrder::Rgb).data,
                ExtendedColorType::Rgb8,
            ),
        };
        let image_format = match format {
            OutputFormat::Png => ImageFormat::Png,
            _ => ImageFormat::Jpeg,
        };

        image::save_buffer_with_format(
            path,
            &data,
            image.width as u32,
            image.height as u32,
            color_type,
            image_format,
        )
        .map_err(|e| ConversionError::EncodeError(format!("{}: {}", path.display(), e)))
    }
}

/// Output path used when none is given: the input path with a `.jpg` extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("jpg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/data/frame.yuv")),
            PathBuf::from("/data/frame.jpg")
        );
        assert_eq!(
            default_output_path(Path::new("capture.v1.raw")),
            PathBuf::from("capture.v1.jpg")
        );
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let image = Image {
            width: 1,
            height: 1,
            format: PixelFormat::Gray,
            data: vec![0],
        };
        let result = StandardImageWriter::default().write_image(&image, Path::new("out.xyz"));
        assert!(matches!(result, Err(ConversionError::UnsupportedFormat(_))));
    }
}
