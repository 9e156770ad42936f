use super::{FrameSink, SinkError, check_frame_size};
use crate::rendering::Frame;

/// Keeps every frame in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    size: (usize, usize),
    frames: Vec<Frame>,
}

impl MemorySink {
    pub fn new(size: (usize, usize)) -> Self {
        Self {
            size,
            frames: Vec::new(),
        }
    }
}

impl FrameSink for MemorySink {
    type Output = Vec<Frame>;

    fn frame_size(&self) -> (usize, usize) {
        self.size
    }

    fn write(&mut self, frame: &Frame) -> Result<(), SinkError> {
        check_frame_size(self.size, frame)?;
        self.frames.push(frame.clone());
        Ok(())
    }

    fn close(self) -> Result<Vec<Frame>, SinkError> {
        Ok(self.frames)
    }
}
