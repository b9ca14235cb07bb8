use std::{
    fs::File,
    io::{ErrorKind, Read},
    os::fd::AsRawFd,
};

use tracing::{debug, info};

use crate::{
    panel::{
        touch::{RawTouch, TouchResolution},
        PanelError, Result,
    },
    platform::TouchOps,
};

const EV_SYN: u16 = 0x00;
const EV_KEY: u16 = 0x01;
const EV_ABS: u16 = 0x03;
const SYN_REPORT: u16 = 0x00;
const BTN_TOUCH: u16 = 0x14a;
const ABS_X: u16 = 0x00;
const ABS_Y: u16 = 0x01;
const ABS_MT_POSITION_X: u16 = 0x35;
const ABS_MT_POSITION_Y: u16 = 0x36;

// input_event is a timeval followed by type(u16) code(u16) value(i32); the
// timeval width depends on the target.
const EVENT_LEN: usize = core::mem::size_of::<libc::input_event>();
const EVENT_TAIL: usize = 8;

const fn eviocgabs(axis: u16) -> libc::c_ulong {
    // _IOR('E', 0x40 + axis, struct input_absinfo)
    const IOC_READ: libc::c_ulong = 2;
    const ABSINFO_LEN: libc::c_ulong = 24;
    (IOC_READ << 30) | (ABSINFO_LEN << 16) | ((b'E' as libc::c_ulong) << 8) | (0x40 + axis as libc::c_ulong)
}

/// Folds raw evdev records into one touch report per `SYN_REPORT`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EvdevDecoder {
    x: i32,
    y: i32,
    down: bool,
    dirty: bool,
}

impl EvdevDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, kind: u16, code: u16, value: i32) -> Option<RawTouch> {
        match (kind, code) {
            (EV_ABS, ABS_X | ABS_MT_POSITION_X) => {
                self.x = value;
                self.dirty = true;
            }
            (EV_ABS, ABS_Y | ABS_MT_POSITION_Y) => {
                self.y = value;
                self.dirty = true;
            }
            (EV_KEY, BTN_TOUCH) => {
                self.down = value != 0;
                self.dirty = true;
            }
            (EV_SYN, SYN_REPORT) if self.dirty => {
                self.dirty = false;
                return Some(RawTouch::new(self.x, self.y, self.down));
            }
            _ => {}
        }
        None
    }

    /// Decodes one raw `input_event` record.
    pub fn feed_record(&mut self, record: &[u8]) -> Option<RawTouch> {
        let tail = record.get(record.len().checked_sub(EVENT_TAIL)?..)?;
        let kind = u16::from_ne_bytes([tail[0], tail[1]]);
        let code = u16::from_ne_bytes([tail[2], tail[3]]);
        let value = i32::from_ne_bytes([tail[4], tail[5], tail[6], tail[7]]);
        self.feed(kind, code, value)
    }
}

/// Linux input device read as a stream of `input_event` records.
pub struct EvdevTouch {
    file: File,
    device: String,
    resolution: TouchResolution,
    decoder: EvdevDecoder,
}

impl EvdevTouch {
    /// `fallback` supplies the axis maxima when the device will not report
    /// its ranges; those axes are taken to start at zero.
    pub fn open(device: &str, fallback: (Option<u32>, Option<u32>)) -> Result<Self> {
        let file = File::open(device).map_err(|source| PanelError::Io {
            path: device.into(),
            source,
        })?;

        let x = query_axis_range(&file, ABS_X).or(fallback.0.map(|max| (0, max)));
        let y = query_axis_range(&file, ABS_Y).or(fallback.1.map(|max| (0, max)));
        let (Some((min_x, max_x)), Some((min_y, max_y))) = (x, y) else {
            return Err(PanelError::Touch {
                device: device.into(),
                details: "axis range unknown; set touch.max_x and touch.max_y".into(),
            });
        };

        info!("touch: {device} range x={min_x}..={max_x} y={min_y}..={max_y}");
        Ok(Self {
            file,
            device: device.into(),
            resolution: TouchResolution::new(max_x, max_y).with_origin(min_x, min_y),
            decoder: EvdevDecoder::new(),
        })
    }
}

/// `(minimum, maximum)` out of a raw `input_absinfo`, if it describes a
/// usable range.
fn axis_range(absinfo: &[i32; 6]) -> Option<(i32, u32)> {
    let (min, max) = (absinfo[1], absinfo[2]);
    if max <= min {
        return None;
    }
    u32::try_from(max).ok().filter(|max| *max > 0).map(|max| (min, max))
}

fn query_axis_range(file: &File, axis: u16) -> Option<(i32, u32)> {
    let mut absinfo = [0i32; 6];
    // SAFETY: `absinfo` matches struct input_absinfo (six i32) and outlives
    // the call.
    let rc = unsafe { libc::ioctl(file.as_raw_fd(), eviocgabs(axis) as _, absinfo.as_mut_ptr()) };
    if rc < 0 {
        debug!(
            "touch: EVIOCGABS({axis}) failed: {}",
            std::io::Error::last_os_error()
        );
        return None;
    }
    axis_range(&absinfo)
}

impl TouchOps for EvdevTouch {
    fn resolution(&self) -> TouchResolution {
        self.resolution
    }

    fn next_touch(&mut self) -> Result<Option<RawTouch>> {
        let mut record = [0u8; EVENT_LEN];
        loop {
            match self.file.read_exact(&mut record) {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::UnexpectedEof => return Ok(None),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(PanelError::Io {
                        path: self.device.clone().into(),
                        source,
                    })
                }
            }
            if let Some(touch) = self.decoder.feed_record(&record) {
                return Ok(Some(touch));
            }
        }
    }
}
