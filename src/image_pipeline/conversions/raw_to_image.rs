use std::path::Path;

use tracing::{info, instrument};

use crate::image_pipeline::{
    color::Image,
    common::error::{ConversionError, Result},
    conversions::{
        frame_decoder::FrameDecoder, sequence::SequenceDecoder, types::ConversionConfig,
    },
    encode::{ImageWriter, StandardImageWriter},
    raw::{FileSampleReader, SampleReader},
};

pub struct RawToImagePipeline<R: SampleReader, W: ImageWriter> {
    decoder: FrameDecoder<R>,
    writer: W,
}

impl RawToImagePipeline<FileSampleReader, StandardImageWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        let writer = StandardImageWriter::new(config.tiff_compression);
        Self {
            decoder: FrameDecoder::new(FileSampleReader, config),
            writer,
        }
    }
}

impl<R: SampleReader, W: ImageWriter> RawToImagePipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            decoder: FrameDecoder::new(reader, config),
            writer,
        }
    }

    /// Decodes the first frame of `input_path`.
    ///
    /// A file too short for one frame is an error here.
    #[instrument(skip(self, input_path))]
    pub fn decode_file<P: AsRef<Path>>(&self, input_path: P) -> Result<Image> {
        let config = self.config();
        {
            let _span = tracing::info_span!(
                "validate_dimensions",
                width = config.width,
                height = config.height
            )
            .entered();
            config.validate()?;
        }

        let (image, _) = self.decoder.decode_at(input_path.as_ref(), config.header_len)?;
        Ok(image)
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let image = self.decode_file(input_path)?;

        {
            let _span = tracing::info_span!("encode_image").entered();
            self.writer.write_image(&image, output_path)?;
        }

        info!(
            width = image.width,
            height = image.height,
            "Conversion complete"
        );
        Ok(())
    }

    /// Starts a frame-by-frame decode of `input_path` from its first frame.
    pub fn decode_all<P: AsRef<Path>>(&self, input_path: P) -> Result<SequenceDecoder<'_, R>> {
        self.config().validate()?;
        Ok(SequenceDecoder::new(&self.decoder, input_path))
    }

    /// Decodes every frame of `input_path` into `output_dir/<index>.png`.
    ///
    /// Returns the number of frames written.
    #[instrument(skip(self, input_path, output_dir))]
    pub fn convert_sequence<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_dir: Q,
    ) -> Result<usize> {
        let input_path = input_path.as_ref();
        let output_dir = output_dir.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_dir.display(),
            "Converting sequence"
        );

        std::fs::create_dir_all(output_dir).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", output_dir.display(), e))
        })?;

        let mut written = 0;
        for frame in self.decode_all(input_path)? {
            let image = frame?;
            let _span = tracing::info_span!("encode_frame", index = written).entered();
            self.writer
                .write_image(&image, &output_dir.join(format!("{}.png", written)))?;
            written += 1;
        }

        info!(frames = written, "Sequence complete");
        Ok(written)
    }

    pub fn config(&self) -> &ConversionConfig {
        self.decoder.config()
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.decoder.set_config(config);
    }
}
