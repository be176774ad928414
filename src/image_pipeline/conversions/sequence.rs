//! Frame-by-frame decoding of multi-frame raw files.
//!
//! Frames sit back to back after an optional header. The decoder pulls one
//! frame per step and stops at the first frame the file cannot fully hold;
//! any other failure is handed to the caller instead of ending the stream
//! quietly.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::image_pipeline::color::Image;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::conversions::frame_decoder::FrameDecoder;
use crate::image_pipeline::raw::SampleReader;

/// Result of one decode step
#[derive(Debug)]
pub enum FrameOutcome {
    /// A complete frame was decoded
    Frame(Image),
    /// The file holds no further complete frame
    EndOfStream,
    /// Decoding failed for a reason other than running out of data
    Error(ConversionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SequenceState {
    Reading,
    Exhausted,
}

/// Pull-based decoder over every frame of one file.
///
/// Not restartable: a fresh sequence starts again at the first frame.
pub struct SequenceDecoder<'a, R: SampleReader> {
    decoder: &'a FrameDecoder<R>,
    path: PathBuf,
    bytes_consumed: u64,
    frames: usize,
    state: SequenceState,
}

impl<'a, R: SampleReader> SequenceDecoder<'a, R> {
    pub fn new(decoder: &'a FrameDecoder<R>, path: impl AsRef<Path>) -> Self {
        Self {
            decoder,
            path: path.as_ref().to_path_buf(),
            bytes_consumed: 0,
            frames: 0,
            state: SequenceState::Reading,
        }
    }

    /// Number of frames decoded so far.
    pub fn frames_decoded(&self) -> usize {
        self.frames
    }

    /// Byte offset the next frame will be read from.
    pub fn next_offset(&self) -> u64 {
        self.decoder.config().header_len + self.bytes_consumed
    }

    pub fn next_frame(&mut self) -> FrameOutcome {
        if self.state == SequenceState::Exhausted {
            return FrameOutcome::EndOfStream;
        }

        let offset = self.next_offset();
        match self.decoder.decode_at(&self.path, offset) {
            Ok((image, bytes_read)) => {
                debug!(frame = self.frames, offset, bytes_read, "Decoded frame");
                self.bytes_consumed += bytes_read as u64;
                self.frames += 1;
                FrameOutcome::Frame(image)
            }
            Err(e) if e.is_end_of_stream() => {
                info!(frames = self.frames, "End of stream: {}", e);
                self.state = SequenceState::Exhausted;
                FrameOutcome::EndOfStream
            }
            Err(e) => {
                warn!(frame = self.frames, offset, "Frame decode failed: {}", e);
                self.state = SequenceState::Exhausted;
                FrameOutcome::Error(e)
            }
        }
    }
}

impl<R: SampleReader> Iterator for SequenceDecoder<'_, R> {
    type Item = Result<Image>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_frame() {
            FrameOutcome::Frame(image) => Some(Ok(image)),
            FrameOutcome::EndOfStream => None,
            FrameOutcome::Error(e) => Some(Err(e)),
        }
    }
}
