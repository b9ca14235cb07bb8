use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{DrawTarget, Point, Primitive, Size},
    primitives::{CornerRadii, Line, PrimitiveStyle, Rectangle, RoundedRectangle},
    Drawable,
};
use u8g2_fonts::types::{FontColor, HorizontalAlignment, VerticalPosition};

use crate::panel::layout::{BarEnds, FontFace, Scene, SceneItem, TextAlign};

/// Paints a scene in item order over its background.
pub fn draw_scene<T>(scene: &Scene, display: &mut T)
where
    T: DrawTarget<Color = Rgb888>,
{
    let _ = display.clear(scene.background);
    for item in &scene.items {
        match item {
            SceneItem::Bar {
                bounds,
                color,
                ends,
            } => draw_bar(display, *bounds, *color, *ends),
            SceneItem::Text {
                text,
                bounds,
                face,
                color,
                align,
            } => draw_text(display, text, *bounds, *face, *color, *align),
            SceneItem::Outline { bounds, color } => {
                let _ = bounds
                    .into_styled(PrimitiveStyle::with_stroke(*color, 1))
                    .draw(display);
            }
            SceneItem::Line { start, end, color } => {
                let _ = Line::new(*start, *end)
                    .into_styled(PrimitiveStyle::with_stroke(*color, 1))
                    .draw(display);
            }
        }
    }
}

fn draw_bar<T>(display: &mut T, bounds: Rectangle, color: Rgb888, ends: BarEnds)
where
    T: DrawTarget<Color = Rgb888>,
{
    let style = PrimitiveStyle::with_fill(color);
    if ends == BarEnds::SQUARE {
        let _ = bounds.into_styled(style).draw(display);
        return;
    }

    let radius = bounds.size.height / 2;
    let round = Size::new(radius, radius);
    let pick = |rounded: bool| if rounded { round } else { Size::zero() };
    let radii = CornerRadii {
        top_left: pick(ends.round_left),
        top_right: pick(ends.round_right),
        bottom_right: pick(ends.round_right),
        bottom_left: pick(ends.round_left),
    };
    let _ = RoundedRectangle::new(bounds, radii)
        .into_styled(style)
        .draw(display);
}

fn draw_text<T>(
    display: &mut T,
    text: &str,
    bounds: Rectangle,
    face: FontFace,
    color: Rgb888,
    align: TextAlign,
) where
    T: DrawTarget<Color = Rgb888>,
{
    let text = face.sanitize(text);
    let center_y = bounds.top_left.y + bounds.size.height as i32 / 2;
    let (x, horizontal) = match align {
        TextAlign::Left => (bounds.top_left.x, HorizontalAlignment::Left),
        TextAlign::Center => (
            bounds.top_left.x + bounds.size.width as i32 / 2,
            HorizontalAlignment::Center,
        ),
        TextAlign::Right => (
            bounds.top_left.x + bounds.size.width as i32,
            HorizontalAlignment::Right,
        ),
    };

    let _ = face.renderer().render_aligned(
        text.as_str(),
        Point::new(x, center_y),
        VerticalPosition::Center,
        horizontal,
        FontColor::Transparent(color),
        display,
    );
}
