use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{DrawTarget, OriginDimensions, Pixel, Point, RgbColor, Size},
};

/// Logical frame in memory, row-major, one `Rgb888` per pixel. Presentation
/// rotates and packs it for the device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCanvas {
    size: Size,
    pixels: Vec<Rgb888>,
}

impl FrameCanvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![Rgb888::BLACK; (size.width * size.height) as usize],
        }
    }

    pub fn fill(&mut self, color: Rgb888) {
        self.pixels.fill(color);
    }

    fn index(&self, point: Point) -> Option<usize> {
        let (x, y) = (point.x, point.y);
        if x < 0 || y < 0 || x >= self.size.width as i32 || y >= self.size.height as i32 {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }

    pub fn pixel(&self, point: Point) -> Option<Rgb888> {
        self.index(point).map(|idx| self.pixels[idx])
    }

    pub fn pixels(&self) -> &[Rgb888] {
        &self.pixels
    }

    pub fn count(&self, color: Rgb888) -> usize {
        self.pixels.iter().filter(|px| **px == color).count()
    }
}

impl OriginDimensions for FrameCanvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for FrameCanvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(idx) = self.index(point) {
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::{
        prelude::Primitive,
        primitives::{PrimitiveStyle, Rectangle},
        Drawable,
    };

    use super::*;

    #[test]
    fn draws_clip_to_bounds() {
        let mut canvas = FrameCanvas::new(Size::new(10, 10));
        Rectangle::new(Point::new(-5, -5), Size::new(8, 8))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::RED))
            .draw(&mut canvas)
            .unwrap();
        assert_eq!(canvas.count(Rgb888::RED), 9);
        assert_eq!(canvas.pixel(Point::new(2, 2)), Some(Rgb888::RED));
        assert_eq!(canvas.pixel(Point::new(3, 3)), Some(Rgb888::BLACK));
        assert_eq!(canvas.pixel(Point::new(10, 0)), None);
    }
}
