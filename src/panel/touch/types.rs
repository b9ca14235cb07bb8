/// One report from the input device, in native device coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawTouch {
    pub x: i32,
    pub y: i32,
    pub down: bool,
}

impl RawTouch {
    pub const fn new(x: i32, y: i32, down: bool) -> Self {
        Self { x, y, down }
    }
}

/// Reported range of each axis. Most controllers start at zero; some report
/// a raw minimum that has to be subtracted first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchResolution {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: u32,
    pub max_y: u32,
}

impl TouchResolution {
    pub const fn new(max_x: u32, max_y: u32) -> Self {
        Self {
            min_x: 0,
            min_y: 0,
            max_x,
            max_y,
        }
    }

    pub const fn with_origin(self, min_x: i32, min_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            ..self
        }
    }
}
