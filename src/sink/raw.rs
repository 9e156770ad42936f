//! Headerless RGB24 stream, e.g. for
//! `ffmpeg -f rawvideo -pixel_format rgb24 -video_size WxH -framerate 30 -i out.rgb`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{FrameSink, SinkError, check_frame_size};
use crate::rendering::Frame;

pub struct RawSink {
    path: PathBuf,
    size: (usize, usize),
    out: BufWriter<File>,
    written: u64,
}

impl RawSink {
    pub fn open(path: &Path, size: (usize, usize)) -> Result<Self, SinkError> {
        let file = File::create(path).map_err(|source| SinkError::Open {
            target: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            size,
            out: BufWriter::new(file),
            written: 0,
        })
    }
}

impl FrameSink for RawSink {
    type Output = PathBuf;

    fn frame_size(&self) -> (usize, usize) {
        self.size
    }

    fn write(&mut self, frame: &Frame) -> Result<(), SinkError> {
        check_frame_size(self.size, frame)?;
        self.out
            .write_all(frame.data())
            .map_err(|source| SinkError::Write {
                frame: self.written,
                source,
            })?;
        self.written += 1;
        Ok(())
    }

    fn close(mut self) -> Result<PathBuf, SinkError> {
        self.out.flush().map_err(|e| SinkError::Close {
            reason: format!("flushing {}: {e}", self.path.display()),
        })?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Grid;
    use crate::rendering::CHANNELS;

    #[test]
    fn test_stream_length_is_frames_times_frame_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.rgb");
        let grid = Grid::from_rows(&["#o", ".."]).unwrap();
        let frame = Frame::from_grid(&grid);

        let mut sink = RawSink::open(&path, (2, 2)).unwrap();
        for _ in 0..3 {
            sink.write(&frame).unwrap();
        }
        let written = sink.close().unwrap();

        let bytes = std::fs::read(written).unwrap();
        assert_eq!(bytes.len(), 3 * 2 * 2 * CHANNELS);
        assert_eq!(&bytes[..6], &[255, 255, 255, 255, 0, 0]);
    }

    #[test]
    fn test_open_fails_in_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = RawSink::open(&dir.path().join("missing").join("out.rgb"), (1, 1));
        assert!(matches!(result, Err(SinkError::Open { .. })));
    }
}
