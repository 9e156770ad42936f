//! One PNG file per frame, numbered so `ffmpeg -i %08d.png` can assemble them.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use super::{FrameSink, SinkError, check_frame_size};
use crate::rendering::Frame;

pub struct PngSequenceSink {
    dir: PathBuf,
    size: (usize, usize),
    written: u64,
}

impl PngSequenceSink {
    /// Create (if needed) the output directory for frames of `(width, height)`.
    pub fn open(dir: &Path, size: (usize, usize)) -> Result<Self, SinkError> {
        fs::create_dir_all(dir).map_err(|source| SinkError::Open {
            target: dir.to_path_buf(),
            source,
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
            size,
            written: 0,
        })
    }

    /// Path the frame with index `frame` is written to
    pub fn frame_path(&self, frame: u64) -> PathBuf {
        self.dir.join(format!("{frame:08}.png"))
    }
}

fn save_png_rgb(path: &Path, frame: &Frame) -> io::Result<()> {
    let (width, height) = frame.size();
    let file = File::create(path)?;
    let w = BufWriter::new(file);
    let mut encoder = png::Encoder::new(w, width as u32, height as u32);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Fast);
    let mut writer = encoder.write_header().map_err(io::Error::other)?;
    writer.write_image_data(frame.data()).map_err(io::Error::other)?;
    writer.finish().map_err(io::Error::other)
}

impl FrameSink for PngSequenceSink {
    /// Number of frames written
    type Output = u64;

    fn frame_size(&self) -> (usize, usize) {
        self.size
    }

    fn write(&mut self, frame: &Frame) -> Result<(), SinkError> {
        check_frame_size(self.size, frame)?;
        let path = self.frame_path(self.written);
        save_png_rgb(&path, frame).map_err(|source| SinkError::Write {
            frame: self.written,
            source,
        })?;
        self.written += 1;
        Ok(())
    }

    fn close(self) -> Result<u64, SinkError> {
        Ok(self.written)
    }
}
