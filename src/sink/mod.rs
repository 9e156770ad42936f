//! Frame sinks: where rendered generations go.
//!
//! A sink is opened by its constructor, which fails fast with
//! [`SinkError::Open`] instead of handing back a sink that cannot be
//! written to.

mod ffmpeg;
mod memory;
mod png_sequence;
mod raw;

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::rendering::Frame;

pub use ffmpeg::{DEFAULT_CODEC, FfmpegSink};
pub use memory::MemorySink;
pub use png_sequence::PngSequenceSink;
pub use raw::RawSink;

/// Consumer of rendered frames, in emission order.
pub trait FrameSink {
    /// What the sink hands back once finalized
    type Output;

    /// `(width, height)` every written frame must have
    fn frame_size(&self) -> (usize, usize);

    /// Append one frame
    fn write(&mut self, frame: &Frame) -> Result<(), SinkError>;

    /// Flush and finalize the output
    fn close(self) -> Result<Self::Output, SinkError>;
}

/// Errors raised by frame sinks.
#[derive(Debug)]
pub enum SinkError {
    /// The sink could not be opened; nothing was written.
    Open { target: PathBuf, source: io::Error },
    /// Writing a frame failed.
    Write { frame: u64, source: io::Error },
    /// Finalizing the output failed.
    Close { reason: String },
    /// A frame did not match the size the sink was opened with.
    FrameSize {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { target, source } => {
                write!(f, "failed to open frame sink {}: {source}", target.display())
            }
            Self::Write { frame, source } => write!(f, "failed to write frame {frame}: {source}"),
            Self::Close { reason } => write!(f, "failed to finalize frame sink: {reason}"),
            Self::FrameSize { expected, found } => write!(
                f,
                "frame is {}x{} but sink expects {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub(crate) fn check_frame_size(expected: (usize, usize), frame: &Frame) -> Result<(), SinkError> {
    if frame.size() == expected {
        Ok(())
    } else {
        Err(SinkError::FrameSize {
            expected,
            found: frame.size(),
        })
    }
}
