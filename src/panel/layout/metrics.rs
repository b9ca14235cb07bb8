use embedded_graphics::prelude::Point;
use u8g2_fonts::{types::VerticalPosition, FontRenderer};

use crate::panel::config::{
    BODY_FONT, BUTTON_FONT, DISPLAY_FONT_16, DISPLAY_FONT_20, DISPLAY_FONT_24, DISPLAY_FONT_28,
    DISPLAY_FONT_32, DISPLAY_FONT_38, DISPLAY_FONT_46, DISPLAY_FONT_54, DISPLAY_FONT_58,
    DISPLAY_FONT_COUNT, DISPLAY_FONT_NOMINAL_PX, TITLE_FONT,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontFace {
    Title,
    Body,
    Button,
    /// Index into the clock ladder, 0 = largest.
    Display(u8),
}

impl FontFace {
    pub fn display_faces() -> impl Iterator<Item = FontFace> {
        (0..DISPLAY_FONT_COUNT).map(FontFace::Display)
    }

    pub fn renderer(self) -> &'static FontRenderer {
        match self {
            Self::Title => &TITLE_FONT,
            Self::Body => &BODY_FONT,
            Self::Button => &BUTTON_FONT,
            Self::Display(0) => &DISPLAY_FONT_58,
            Self::Display(1) => &DISPLAY_FONT_54,
            Self::Display(2) => &DISPLAY_FONT_46,
            Self::Display(3) => &DISPLAY_FONT_38,
            Self::Display(4) => &DISPLAY_FONT_32,
            Self::Display(5) => &DISPLAY_FONT_28,
            Self::Display(6) => &DISPLAY_FONT_24,
            Self::Display(7) => &DISPLAY_FONT_20,
            Self::Display(_) => &DISPLAY_FONT_16,
        }
    }

    /// Display faces only carry printable ASCII; the others carry Latin-1.
    pub fn sanitize(self, text: &str) -> String {
        let ascii_only = matches!(self, Self::Display(_));
        text.chars()
            .map(|ch| match ch {
                ' '..='~' => ch,
                '\u{a0}'..='\u{ff}' if !ascii_only => ch,
                '\t' | '\n' | '\r' => ' ',
                _ => '?',
            })
            .collect()
    }
}

/// Text measurement the layout depends on. Widths are advance widths in
/// pixels; heights are the face's line height.
pub trait TextMetrics {
    fn text_width(&self, face: FontFace, text: &str) -> u32;
    fn line_height(&self, face: FontFace) -> u32;
}

/// Metrics of the bitmap fonts the renderer actually draws with.
#[derive(Clone, Copy, Debug, Default)]
pub struct U8g2Metrics;

impl TextMetrics for U8g2Metrics {
    fn text_width(&self, face: FontFace, text: &str) -> u32 {
        if text.is_empty() {
            return 0;
        }
        let text = face.sanitize(text);
        face.renderer()
            .get_rendered_dimensions(text.as_str(), Point::zero(), VerticalPosition::Top)
            .map(|dims| dims.advance.x.max(0) as u32)
            .unwrap_or(0)
    }

    fn line_height(&self, face: FontFace) -> u32 {
        face.renderer().get_default_line_height()
    }
}

/// Every glyph has the same advance; used where exact pixel positions
/// matter more than realism.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedMetrics {
    pub advance: u32,
    pub title_height: u32,
    pub body_height: u32,
}

impl FixedMetrics {
    pub const fn new(advance: u32, title_height: u32, body_height: u32) -> Self {
        Self {
            advance,
            title_height,
            body_height,
        }
    }
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self::new(10, 24, 18)
    }
}

impl TextMetrics for FixedMetrics {
    fn text_width(&self, face: FontFace, text: &str) -> u32 {
        let chars = text.chars().count() as u32;
        match face {
            FontFace::Display(idx) => chars * (self.line_height(FontFace::Display(idx)) / 2),
            _ => chars * self.advance,
        }
    }

    fn line_height(&self, face: FontFace) -> u32 {
        match face {
            FontFace::Title => self.title_height,
            FontFace::Body | FontFace::Button => self.body_height,
            FontFace::Display(idx) => {
                let idx = (idx as usize).min(DISPLAY_FONT_NOMINAL_PX.len() - 1);
                DISPLAY_FONT_NOMINAL_PX[idx]
            }
        }
    }
}
