use std::io::Write;

use tracing::debug;

use crate::image_pipeline::color::{ColorOrder, Image, PixelFormat};
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::encode::types::TiffCompression;

/// Encodes an 8-bit image as a single-page TIFF.
///
/// BGR images are written as RGB, the only color order TIFF knows.
pub fn write_tiff(image: &Image, output: &mut dyn Write, compression: TiffCompression) -> Result<()> {
    debug!("Encoding TIFF image: {}x{}", image.width, image.height);

    let mut buffer = Vec::new();

    let compression = match compression {
        TiffCompression::None => tiff::encoder::Compression::Uncompressed,
        TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
        TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
        TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
        TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
    };

    {
        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?
            .with_compression(compression);

        let (width, height) = (image.width as u32, image.height as u32);
        let written = match image.format {
            PixelFormat::Gray => encoder
                .write_image::<tiff::encoder::colortype::Gray8>(width, height, &image.data),
            PixelFormat::Color(ColorOrder::Rgb) => encoder
                .write_image::<tiff::encoder::colortype::RGB8>(width, height, &image.data),
            PixelFormat::Color(ColorOrder::Bgr) => {
                let rgb = image.clone().into_order(ColorOrder::Rgb);
                encoder.write_image::<tiff::encoder::colortype::RGB8>(width, height, &rgb.data)
            }
        };
        written.map_err(|e| ConversionError::EncodeError(e.to_string()))?;
    }

    output.write_all(&buffer)?;

    debug!("TIFF encoding complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_tiff_header() {
        let image = Image {
            width: 2,
            height: 2,
            format: PixelFormat::Color(ColorOrder::Bgr),
            data: vec![10; 12],
        };
        let mut out = Vec::new();
        write_tiff(&image, &mut out, TiffCompression::Lzw).unwrap();

        assert!(out.starts_with(b"II*\0") || out.starts_with(b"MM\0*"));
    }
}
