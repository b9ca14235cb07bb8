use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{Point, Size},
    primitives::Rectangle,
};

use super::metrics::FontFace;
use crate::panel::config::{DEBUG_COLOR_CONTENT, DEBUG_COLOR_STRUCTURE, DEBUG_COLOR_WRAP_LINE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Which short ends of a bar are drawn as LCARS half-round caps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BarEnds {
    pub round_left: bool,
    pub round_right: bool,
}

impl BarEnds {
    pub const SQUARE: Self = Self {
        round_left: false,
        round_right: false,
    };
    pub const LEFT: Self = Self {
        round_left: true,
        round_right: false,
    };
    pub const RIGHT: Self = Self {
        round_left: false,
        round_right: true,
    };
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneItem {
    Bar {
        bounds: Rectangle,
        color: Rgb888,
        ends: BarEnds,
    },
    /// Text is vertically centered in `bounds` and aligned horizontally per
    /// `align`.
    Text {
        text: String,
        bounds: Rectangle,
        face: FontFace,
        color: Rgb888,
        align: TextAlign,
    },
    Outline {
        bounds: Rectangle,
        color: Rgb888,
    },
    Line {
        start: Point,
        end: Point,
        color: Rgb888,
    },
}

/// One frame's worth of drawing, in paint order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    pub size: Size,
    pub background: Rgb888,
    pub items: Vec<SceneItem>,
}

impl Scene {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            SceneItem::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn outlines(&self, color: Rgb888) -> impl Iterator<Item = &Rectangle> {
        self.items.iter().filter_map(move |item| match item {
            SceneItem::Outline { bounds, color: c } if *c == color => Some(bounds),
            _ => None,
        })
    }
}

/// Builds a `Rectangle` from signed extents, or nothing if it would be empty.
pub(super) fn rect(x: i32, y: i32, width: i32, height: i32) -> Option<Rectangle> {
    if width <= 0 || height <= 0 {
        return None;
    }
    Some(Rectangle::new(
        Point::new(x, y),
        Size::new(width as u32, height as u32),
    ))
}

/// Collects items and adds the debug overlay as it goes.
pub(super) struct SceneBuilder {
    items: Vec<SceneItem>,
    debug: bool,
}

impl SceneBuilder {
    pub(super) fn new(debug: bool) -> Self {
        Self {
            items: Vec::new(),
            debug,
        }
    }

    pub(super) fn bar(&mut self, bounds: Rectangle, color: Rgb888, ends: BarEnds) {
        self.items.push(SceneItem::Bar {
            bounds,
            color,
            ends,
        });
        self.structural(bounds);
    }

    /// Chrome or button text; gets a structural outline in debug.
    pub(super) fn label(
        &mut self,
        text: impl Into<String>,
        bounds: Rectangle,
        face: FontFace,
        color: Rgb888,
        align: TextAlign,
    ) {
        self.text(text, bounds, face, color, align);
        self.structural(bounds);
    }

    /// Content text; column outlines cover it instead.
    pub(super) fn text(
        &mut self,
        text: impl Into<String>,
        bounds: Rectangle,
        face: FontFace,
        color: Rgb888,
        align: TextAlign,
    ) {
        self.items.push(SceneItem::Text {
            text: text.into(),
            bounds,
            face,
            color,
            align,
        });
    }

    pub(super) fn content_region(&mut self, bounds: Rectangle) {
        if self.debug {
            self.items.push(SceneItem::Outline {
                bounds,
                color: DEBUG_COLOR_CONTENT,
            });
        }
    }

    pub(super) fn wrap_marker(&mut self, x: i32, top: i32, bottom: i32) {
        if self.debug && bottom > top {
            self.items.push(SceneItem::Line {
                start: Point::new(x, top),
                end: Point::new(x, bottom - 1),
                color: DEBUG_COLOR_WRAP_LINE,
            });
        }
    }

    fn structural(&mut self, bounds: Rectangle) {
        if self.debug {
            self.items.push(SceneItem::Outline {
                bounds,
                color: DEBUG_COLOR_STRUCTURE,
            });
        }
    }

    pub(super) fn finish(self, size: Size, background: Rgb888) -> Scene {
        Scene {
            size,
            background,
            items: self.items,
        }
    }
}
