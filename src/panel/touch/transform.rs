use embedded_graphics::prelude::{Point, Size};

use super::types::{RawTouch, TouchResolution};
use crate::panel::config::Rotation;

/// Device space to logical screen space. The frame is rotated
/// counter-clockwise by `rotation` on its way to the panel, so touches are
/// rotated back the other way.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchTransform {
    resolution: TouchResolution,
    rotation: Rotation,
    logical: Size,
}

impl TouchTransform {
    pub fn new(resolution: TouchResolution, rotation: Rotation, logical: Size) -> Self {
        Self {
            resolution,
            rotation,
            logical,
        }
    }

    fn normalize(value: i32, min: i32, max: u32) -> f32 {
        let span = max as f32 - min as f32;
        if span <= 0.0 {
            return 0.0;
        }
        ((value as f32 - min as f32) / span).clamp(0.0, 1.0)
    }

    fn scale(unit: f32, extent: u32) -> i32 {
        if extent == 0 {
            return 0;
        }
        ((unit * extent as f32).round() as i32).clamp(0, extent as i32 - 1)
    }

    pub fn map(&self, touch: RawTouch) -> Point {
        let u = Self::normalize(touch.x, self.resolution.min_x, self.resolution.max_x);
        let v = Self::normalize(touch.y, self.resolution.min_y, self.resolution.max_y);
        let (x, y) = match self.rotation {
            Rotation::Deg0 => (u, v),
            Rotation::Deg90 => (1.0 - v, u),
            Rotation::Deg180 => (1.0 - u, 1.0 - v),
            Rotation::Deg270 => (v, 1.0 - u),
        };
        Point::new(
            Self::scale(x, self.logical.width),
            Self::scale(y, self.logical.height),
        )
    }

    pub fn logical_size(&self) -> Size {
        self.logical
    }
}
