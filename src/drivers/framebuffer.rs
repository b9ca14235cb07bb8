use std::{
    fs::{File, OpenOptions},
    io::{Seek, SeekFrom, Write},
    os::fd::AsRawFd,
    path::Path,
};

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{Point, RgbColor, Size},
};
use tracing::info;

use crate::{
    panel::{config::Rotation, render::FrameCanvas, PanelError, Result},
    platform::DisplayOps,
};

const FBIOGET_VSCREENINFO: libc::c_ulong = 0x4600;
// struct fb_var_screeninfo is 40 u32 words.
const VSCREENINFO_WORDS: usize = 40;

/// Physical framebuffer geometry as reported by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FramebufferGeometry {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u32,
}

impl FramebufferGeometry {
    pub fn bytes_per_pixel(&self) -> usize {
        (self.bits_per_pixel as usize).div_ceil(8)
    }

    pub fn stride(&self) -> usize {
        (self.width as usize * self.bits_per_pixel as usize).div_ceil(8)
    }

    pub fn frame_len(&self) -> usize {
        self.stride() * self.height as usize
    }

    /// The frame the layout draws into; width and height swap for quarter
    /// turns.
    pub fn logical_size(&self, rotation: Rotation) -> Size {
        if rotation.swaps_axes() {
            Size::new(self.height, self.width)
        } else {
            Size::new(self.width, self.height)
        }
    }
}

/// Logical pixel shown at physical `(px, py)` when the logical frame of
/// `logical` size is rotated counter-clockwise onto the panel.
pub fn logical_source(rotation: Rotation, logical: Size, px: i32, py: i32) -> Point {
    let (w, h) = (logical.width as i32, logical.height as i32);
    match rotation {
        Rotation::Deg0 => Point::new(px, py),
        Rotation::Deg90 => Point::new(w - 1 - py, px),
        Rotation::Deg180 => Point::new(w - 1 - px, h - 1 - py),
        Rotation::Deg270 => Point::new(py, h - 1 - px),
    }
}

fn pack_pixel(color: Rgb888, bytes_per_pixel: usize, out: &mut Vec<u8>) {
    match bytes_per_pixel {
        2 => {
            let rgb565 = ((color.r() as u16 >> 3) << 11)
                | ((color.g() as u16 >> 2) << 5)
                | (color.b() as u16 >> 3);
            out.extend_from_slice(&rgb565.to_le_bytes());
        }
        3 => out.extend_from_slice(&[color.b(), color.g(), color.r()]),
        _ => out.extend_from_slice(&[color.b(), color.g(), color.r(), 0xff]),
    }
}

/// Rotates and packs a logical frame into the device's native layout:
/// RGB565 at 16 bpp, little-endian XRGB8888 otherwise.
pub fn pack_frame(
    frame: &FrameCanvas,
    geometry: FramebufferGeometry,
    rotation: Rotation,
    out: &mut Vec<u8>,
) {
    out.clear();
    out.reserve(geometry.frame_len());
    let bytes_per_pixel = geometry.bytes_per_pixel();
    let logical = geometry.logical_size(rotation);
    for py in 0..geometry.height as i32 {
        for px in 0..geometry.width as i32 {
            let source = logical_source(rotation, logical, px, py);
            let color = frame.pixel(source).unwrap_or(Rgb888::BLACK);
            pack_pixel(color, bytes_per_pixel, out);
        }
    }
}

/// Linux `/dev/fbN` device, written with plain `write` at offset 0.
pub struct Framebuffer {
    file: File,
    device: String,
    geometry: FramebufferGeometry,
    rotation: Rotation,
    scratch: Vec<u8>,
}

impl Framebuffer {
    pub fn open(device: &str, rotation: Rotation) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(Path::new(device))
            .map_err(|source| PanelError::Io {
                path: device.into(),
                source,
            })?;
        let geometry = query_geometry(&file, device)?;
        if !matches!(geometry.bits_per_pixel, 16 | 24 | 32) {
            return Err(PanelError::Framebuffer {
                device: device.into(),
                details: format!("unsupported depth {} bpp", geometry.bits_per_pixel),
            });
        }
        info!(
            "fb: {device} {}x{} {}bpp rotate={}",
            geometry.width,
            geometry.height,
            geometry.bits_per_pixel,
            rotation.degrees()
        );
        Ok(Self {
            file,
            device: device.into(),
            geometry,
            rotation,
            scratch: Vec::new(),
        })
    }

    pub fn geometry(&self) -> FramebufferGeometry {
        self.geometry
    }

    fn write_frame(&mut self) -> Result<()> {
        let device = self.device.as_str();
        self.file
            .seek(SeekFrom::Start(0))
            .and_then(|_| self.file.write_all(&self.scratch))
            .and_then(|()| self.file.flush())
            .map_err(|source| PanelError::Io {
                path: device.into(),
                source,
            })
    }
}

fn query_geometry(file: &File, device: &str) -> Result<FramebufferGeometry> {
    let mut info = [0u32; VSCREENINFO_WORDS];
    // SAFETY: `info` is large enough for fb_var_screeninfo and outlives the
    // call; the fd is open for the duration.
    let rc = unsafe { libc::ioctl(file.as_raw_fd(), FBIOGET_VSCREENINFO as _, info.as_mut_ptr()) };
    if rc < 0 {
        return Err(PanelError::Framebuffer {
            device: device.into(),
            details: format!(
                "FBIOGET_VSCREENINFO failed: {}",
                std::io::Error::last_os_error()
            ),
        });
    }
    Ok(FramebufferGeometry {
        width: info[0],
        height: info[1],
        bits_per_pixel: info[6],
    })
}

impl DisplayOps for Framebuffer {
    fn logical_size(&self) -> Size {
        self.geometry.logical_size(self.rotation)
    }

    fn present(&mut self, frame: &FrameCanvas) -> Result<()> {
        pack_frame(frame, self.geometry, self.rotation, &mut self.scratch);
        self.write_frame()
    }

    fn blank(&mut self) -> Result<()> {
        self.scratch.clear();
        self.scratch.resize(self.geometry.frame_len(), 0);
        self.write_frame()
    }
}
