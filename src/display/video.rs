// Video output - The boundary where finished frames leave the front-end
//
// A host video pipeline receives frames through the VideoRefresh trait as a
// pixel slice plus width, height and row pitch. FrameCapture is a sink that
// keeps a copy of the last frame, used for screenshots and headless runs.

use super::framebuffer::{PixelBuffer, BYTES_PER_PIXEL};
use super::palette::Color;

/// A frame handed to the video output
///
/// `data` holds RGBA rows of `pitch` bytes each, of which the first
/// `width * 4` bytes are pixels.
#[derive(Debug, Clone, Copy)]
pub struct VideoFrame<'a> {
    pub data: &'a [u8],
    pub width: usize,
    pub height: usize,
    pub pitch: usize,
}

impl<'a> VideoFrame<'a> {
    /// View a pixel buffer as a video frame
    pub fn from_buffer(buffer: &'a PixelBuffer) -> Self {
        Self {
            data: buffer.as_bytes(),
            width: buffer.width(),
            height: buffer.height(),
            pitch: buffer.stride(),
        }
    }

    /// Get the pixel bytes of one row, without any pitch padding
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.pitch;
        &self.data[start..start + self.width * BYTES_PER_PIXEL]
    }
}

/// Receiver of presented frames
pub trait VideoRefresh {
    /// Present one frame
    fn video_refresh(&mut self, frame: VideoFrame<'_>);
}

/// Video sink that keeps a copy of the most recent frame
#[derive(Debug, Default)]
pub struct FrameCapture {
    last_frame: Option<PixelBuffer>,
    frames_presented: u64,
}

impl FrameCapture {
    /// Create an empty capture
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently presented frame, if any
    pub fn last_frame(&self) -> Option<&PixelBuffer> {
        self.last_frame.as_ref()
    }

    /// Take ownership of the most recently presented frame
    pub fn take_frame(&mut self) -> Option<PixelBuffer> {
        self.last_frame.take()
    }

    /// Number of frames presented so far
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl VideoRefresh for FrameCapture {
    fn video_refresh(&mut self, frame: VideoFrame<'_>) {
        let mut copy = match self.last_frame.take() {
            Some(buffer) if buffer.width() == frame.width && buffer.height() == frame.height => {
                buffer
            }
            _ => PixelBuffer::new(frame.width, frame.height, Color::TRANSPARENT),
        };

        let stride = copy.stride();
        let bytes = copy.as_bytes_mut();
        for y in 0..frame.height {
            bytes[y * stride..(y + 1) * stride].copy_from_slice(frame.row(y));
        }

        self.last_frame = Some(copy);
        self.frames_presented += 1;
    }
}
