use std::fs;
use std::path::Path;

use rawframe::image_pipeline::{
    ChannelOffsetMap, ColorOrder, ConversionConfig, ConversionError, FileSampleReader,
    PixelFormat, RawLayout, RawToImagePipeline, SampleReader, SampleWidth,
    TiffCompression, encode::default_output_path,
};

fn gray_yuv_frame(width: usize, height: usize, luma: u8) -> Vec<u8> {
    let mut frame = vec![luma; width * height];
    frame.extend(std::iter::repeat_n(128u8, width * height / 2));
    frame
}

fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn test_reader_reads_exact_byte_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "frame.raw", &[1, 0, 2, 0, 3, 0, 4]);

    let buffer = FileSampleReader
        .read_samples(&path, 0, SampleWidth::Two, 3)
        .unwrap();
    assert_eq!(buffer.samples, vec![1, 2, 3]);
    assert_eq!(buffer.bytes_read(), 6);

    let result = FileSampleReader.read_samples(&path, 2, SampleWidth::Two, 3);
    assert!(matches!(
        result,
        Err(ConversionError::ShortRead {
            expected: 6,
            available: 5,
            ..
        })
    ));
}

#[test]
fn test_yuv_file_to_png() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "gray.yuv", &gray_yuv_frame(8, 6, 128));
    let output = dir.path().join("gray.png");

    let config = ConversionConfig::builder().dimensions(8, 6).build();
    RawToImagePipeline::new(config)
        .convert_file(&input, &output)
        .unwrap();

    let decoded = image::open(&output).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (8, 6));
    assert!(decoded.pixels().all(|p| p.0 == [128, 128, 128]));
}

#[test]
fn test_bgr_image_is_swapped_before_encoding() {
    // Y=100, V=160: red is lifted, blue is not.
    let mut frame = vec![100u8; 16];
    frame.extend_from_slice(&[128u8; 4]);
    frame.extend_from_slice(&[160u8; 4]);

    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "tint.yuv", &frame);
    let output = dir.path().join("tint.png");

    let config = ConversionConfig::builder()
        .dimensions(4, 4)
        .color_order(ColorOrder::Bgr)
        .build();
    RawToImagePipeline::new(config)
        .convert_file(&input, &output)
        .unwrap();

    let decoded = image::open(&output).unwrap().to_rgb8();
    assert_eq!(decoded.get_pixel(0, 0).0[0], 143);
    assert_eq!(decoded.get_pixel(0, 0).0[2], 100);
}

#[test]
fn test_default_jpeg_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "luma.raw", &[200u8; 16 * 16]);
    let output = default_output_path(&input);

    let config = ConversionConfig::builder()
        .dimensions(16, 16)
        .layout(RawLayout::Luma)
        .build();
    RawToImagePipeline::new(config)
        .convert_file(&input, &output)
        .unwrap();

    assert_eq!(output.extension().unwrap(), "jpg");
    let decoded = image::open(&output).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (16, 16));
}

#[test]
fn test_bayer_file_to_tiff() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "mosaic.raw", &[128u8; 8 * 8]);
    let output = dir.path().join("mosaic.tiff");

    let config = ConversionConfig::builder()
        .dimensions(8, 8)
        .layout(RawLayout::Bayer {
            offsets: ChannelOffsetMap::RGGB,
        })
        .tiff_compression(TiffCompression::DeflateBalanced)
        .build();
    let pipeline = RawToImagePipeline::new(config);

    let image = pipeline.decode_file(&input).unwrap();
    assert_eq!(image.format, PixelFormat::Color(ColorOrder::Rgb));
    assert!(image.data.iter().all(|&v| v == 128));

    pipeline.convert_file(&input, &output).unwrap();
    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*"));
}

#[test]
fn test_video_file_to_frames() {
    let dir = tempfile::tempdir().unwrap();
    let mut video = vec![0u8; 16];
    for luma in [40u8, 120, 200] {
        video.extend(gray_yuv_frame(4, 4, luma));
    }
    video.extend_from_slice(&[7u8; 10]);
    let input = write_file(dir.path(), "video.yuv", &video);
    let frames_dir = dir.path().join("frames");

    let config = ConversionConfig::builder()
        .dimensions(4, 4)
        .header_len(16)
        .build();
    let pipeline = RawToImagePipeline::new(config);

    let images: Vec<_> = pipeline
        .decode_all(&input)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(images.len(), 3);
    assert_eq!(images[0].pixel(0, 0), &[40, 40, 40]);
    assert_eq!(images[1].pixel(0, 0), &[120, 120, 120]);
    assert_eq!(images[2].pixel(3, 3), &[200, 200, 200]);

    let written = pipeline.convert_sequence(&input, &frames_dir).unwrap();
    assert_eq!(written, 3);
    for index in 0..3 {
        assert!(frames_dir.join(format!("{}.png", index)).exists());
    }
    assert!(!frames_dir.join("3.png").exists());
}

#[test]
fn test_tiny_file_with_large_dimensions_is_a_short_read() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "tiny.yuv", &[0u8; 10]);

    let config = ConversionConfig::builder()
        .dimensions(50000, 50000)
        .sample_width(SampleWidth::Two)
        .build();
    let pipeline = RawToImagePipeline::new(config);

    assert!(matches!(
        pipeline.decode_file(&input),
        Err(ConversionError::ShortRead { available: 10, .. })
    ));
    let mut frames = pipeline.decode_all(&input).unwrap();
    assert!(frames.next().is_none());
    assert_eq!(frames.frames_decoded(), 0);
}

#[test]
fn test_missing_input_is_not_end_of_stream() {
    let dir = tempfile::tempdir().unwrap();
    let config = ConversionConfig::builder()
        .dimensions(4, 4)
        .layout(RawLayout::Luma)
        .build();
    let pipeline = RawToImagePipeline::new(config);

    let mut frames = pipeline.decode_all(dir.path().join("missing.raw")).unwrap();
    assert!(matches!(
        frames.next(),
        Some(Err(ConversionError::InputReadError(_)))
    ));
    assert!(frames.next().is_none());
}
