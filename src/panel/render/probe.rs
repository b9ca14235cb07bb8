use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{DrawTarget, OriginDimensions, Primitive, Size},
    primitives::{Circle, PrimitiveStyle, Rectangle},
    Drawable,
};

use crate::panel::config::{BG_COLOR, PROBE_COLOR};

const PROBE_STROKE_PX: u32 = 4;
const PROBE_EXTENT_PCT: u32 = 75;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ProbeShape {
    Square,
    Circle,
}

/// Geometry check: a centred square or circle spanning 75% of the shorter
/// side. A skewed or clipped shape on the panel means the rotation or the
/// framebuffer geometry is off.
pub fn draw_probe<T>(display: &mut T, shape: ProbeShape, fill: bool)
where
    T: DrawTarget<Color = Rgb888> + OriginDimensions,
{
    let size = display.size();
    let extent = size.width.min(size.height) * PROBE_EXTENT_PCT / 100;
    let center = Rectangle::new(Default::default(), size).center();
    let style = if fill {
        PrimitiveStyle::with_fill(PROBE_COLOR)
    } else {
        PrimitiveStyle::with_stroke(PROBE_COLOR, PROBE_STROKE_PX)
    };

    let _ = display.clear(BG_COLOR);
    let _ = match shape {
        ProbeShape::Square => Rectangle::with_center(center, Size::new(extent, extent))
            .into_styled(style)
            .draw(display),
        ProbeShape::Circle => Circle::with_center(center, extent)
            .into_styled(style)
            .draw(display),
    };
}
