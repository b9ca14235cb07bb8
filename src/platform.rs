use embedded_graphics::prelude::Size;

use crate::panel::{
    render::FrameCanvas,
    touch::{RawTouch, TouchResolution},
    Result,
};

/// Where finished frames go.
pub trait DisplayOps {
    /// Size of the frame the layout should target, after rotation.
    fn logical_size(&self) -> Size;
    fn present(&mut self, frame: &FrameCanvas) -> Result<()>;
    fn blank(&mut self) -> Result<()>;
}

/// A blocking source of touch reports.
pub trait TouchOps {
    fn resolution(&self) -> TouchResolution;
    /// Blocks until the next complete report. `None` means the device is
    /// gone and no more reports will come.
    fn next_touch(&mut self) -> Result<Option<RawTouch>>;
}

/// Keeps the last frame in memory instead of showing it.
#[derive(Debug)]
pub struct HeadlessDisplay {
    size: Size,
    last_frame: Option<FrameCanvas>,
    presented: usize,
}

impl HeadlessDisplay {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            last_frame: None,
            presented: 0,
        }
    }

    pub fn last_frame(&self) -> Option<&FrameCanvas> {
        self.last_frame.as_ref()
    }

    pub fn presented(&self) -> usize {
        self.presented
    }
}

impl DisplayOps for HeadlessDisplay {
    fn logical_size(&self) -> Size {
        self.size
    }

    fn present(&mut self, frame: &FrameCanvas) -> Result<()> {
        self.last_frame = Some(frame.clone());
        self.presented += 1;
        Ok(())
    }

    fn blank(&mut self) -> Result<()> {
        self.last_frame = None;
        Ok(())
    }
}
