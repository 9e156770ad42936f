//! Lossless video through an `ffmpeg` child process.
//!
//! Frames are piped to ffmpeg's stdin as headerless RGB24 and encoded
//! with a lossless codec into whatever container the output path names.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use tracing::{debug, warn};

use super::{FrameSink, SinkError, check_frame_size};
use crate::rendering::Frame;

/// FFV1 is lossless and muxes cleanly into Matroska.
pub const DEFAULT_CODEC: &str = "ffv1";

/// Both are `Some` until the sink is closed; dropping an unclosed sink
/// sends EOF and reaps the child.
pub struct FfmpegSink {
    path: PathBuf,
    size: (usize, usize),
    child: Option<Child>,
    stdin: Option<BufWriter<ChildStdin>>,
    written: u64,
}

impl FfmpegSink {
    /// Spawn ffmpeg writing `path` with `codec` at `frame_rate`, for frames of `(width, height)`.
    pub fn open(
        path: &Path,
        codec: &str,
        frame_rate: f64,
        size: (usize, usize),
    ) -> Result<Self, SinkError> {
        Self::spawn(Command::new("ffmpeg"), path, codec, frame_rate, size)
    }

    /// Like [`open`](Self::open), with the encoder command supplied by the caller.
    pub(crate) fn spawn(
        mut command: Command,
        path: &Path,
        codec: &str,
        frame_rate: f64,
        size: (usize, usize),
    ) -> Result<Self, SinkError> {
        let open_error = |source| SinkError::Open {
            target: path.to_path_buf(),
            source,
        };
        // ffmpeg only reports an unwritable output after it has started reading frames.
        File::create(path).map_err(open_error)?;

        let (width, height) = size;
        let mut child = command
            .args(["-y", "-loglevel", "error"])
            .args(["-f", "rawvideo", "-pixel_format", "rgb24"])
            .arg("-video_size")
            .arg(format!("{width}x{height}"))
            .arg("-framerate")
            .arg(frame_rate.to_string())
            .args(["-i", "-", "-c:v", codec])
            .arg(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(open_error)?;

        let exited = match child.try_wait() {
            Ok(status) => status.map(|s| format!("ffmpeg exited with {s} on startup")),
            Err(e) => Some(format!("polling ffmpeg: {e}")),
        };
        let stdin = child.stdin.take();
        let failure = match (exited, &stdin) {
            (Some(reason), _) => Some(reason),
            (None, None) => Some("ffmpeg stdin was not captured".to_string()),
            (None, Some(_)) => None,
        };
        if let Some(reason) = failure {
            let _ = child.kill();
            let _ = child.wait();
            return Err(open_error(io::Error::other(reason)));
        }

        debug!(path = %path.display(), codec, frame_rate, width, height, "spawned ffmpeg");
        Ok(Self {
            path: path.to_path_buf(),
            size,
            child: Some(child),
            stdin: stdin.map(BufWriter::new),
            written: 0,
        })
    }

    /// A broken pipe before the first frame means ffmpeg never opened its output.
    fn startup_failure(&mut self, source: io::Error) -> SinkError {
        self.stdin = None;
        let status = self.child.take().map(|mut child| child.wait());
        let reason = match status {
            Some(Ok(status)) => format!("ffmpeg exited with {status} before accepting frames"),
            Some(Err(e)) => format!("ffmpeg stopped before accepting frames: {e}"),
            None => source.to_string(),
        };
        SinkError::Open {
            target: self.path.clone(),
            source: io::Error::new(source.kind(), reason),
        }
    }

    /// Send EOF and wait for ffmpeg to finish the file.
    fn finish(&mut self) -> Result<(), SinkError> {
        let flushed = match self.stdin.take() {
            Some(stdin) => stdin.into_inner().map(drop).map_err(|e| e.into_error()),
            None => Ok(()),
        };
        if let Err(e) = &flushed {
            warn!(error = %e, "flushing ffmpeg stdin failed");
        }
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let status = child.wait().map_err(|e| SinkError::Close {
            reason: format!("waiting for ffmpeg: {e}"),
        })?;
        if !status.success() {
            return Err(SinkError::Close {
                reason: format!("ffmpeg exited with {status}"),
            });
        }
        flushed.map_err(|e| SinkError::Close {
            reason: format!("flushing ffmpeg stdin: {e}"),
        })
    }
}

impl FrameSink for FfmpegSink {
    type Output = PathBuf;

    fn frame_size(&self) -> (usize, usize) {
        self.size
    }

    fn write(&mut self, frame: &Frame) -> Result<(), SinkError> {
        check_frame_size(self.size, frame)?;
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(SinkError::Write {
                frame: self.written,
                source: io::Error::from(io::ErrorKind::BrokenPipe),
            });
        };
        let mut result = stdin.write_all(frame.data());
        if self.written == 0 {
            result = result.and_then(|()| stdin.flush());
        }
        match result {
            Ok(()) => {
                self.written += 1;
                Ok(())
            }
            Err(e) if self.written == 0 && e.kind() == io::ErrorKind::BrokenPipe => {
                Err(self.startup_failure(e))
            }
            Err(source) => Err(SinkError::Write {
                frame: self.written,
                source,
            }),
        }
    }

    fn close(mut self) -> Result<PathBuf, SinkError> {
        self.finish()?;
        debug!(path = %self.path.display(), frames = self.written, "ffmpeg finished");
        Ok(self.path.clone())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if self.child.is_some() {
            warn!(
                path = %self.path.display(),
                frames = self.written,
                "ffmpeg sink dropped without close"
            );
            if let Err(e) = self.finish() {
                warn!(error = %e, "ffmpeg did not finish cleanly");
            }
        }
    }
}
