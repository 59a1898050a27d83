//! Rasterizes engine primitives into an `embedded-graphics` draw target.
use alloc::vec::Vec;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Circle, CornerRadii, Line, PrimitiveStyle, Rectangle, RoundedRectangle},
};
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::color::Paint;
use crate::surface::{Point2, Shape, Surface};

/// [`Surface`] over any `Rgb888` draw target.
///
/// Pixels are opaque, so translucent colors are composited against
/// `background`. Gradients are sampled at each primitive's horizontal position,
/// per segment for polylines.
pub struct RasterSurface<'a, D> {
    target: &'a mut D,
    background: Rgb888,
}

impl<'a, D> RasterSurface<'a, D>
where
    D: DrawTarget<Color = Rgb888>,
{
    pub fn new(target: &'a mut D) -> Self {
        Self::with_background(target, Rgb888::BLACK)
    }

    pub fn with_background(target: &'a mut D, background: Rgb888) -> Self {
        Self { target, background }
    }

    fn color_at(&self, paint: &Paint, x: f32) -> Rgb888 {
        paint.sample_at(x).to_rgb888(self.background)
    }
}

fn to_point(p: Point2) -> Point {
    Point::new(p.x.round() as i32, p.y.round() as i32)
}

fn to_px(v: f32) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.round() as u32
    } else {
        0
    }
}

fn shape_center_x(shape: &Shape) -> f32 {
    match shape {
        Shape::Bar { x, width, .. } => x + width / 2.0,
        Shape::Circle { center, .. } => center.x,
        Shape::Line { from, to } => (from.x + to.x) / 2.0,
        Shape::Polyline(points) => match (points.first(), points.last()) {
            (Some(first), Some(last)) => (first.x + last.x) / 2.0,
            _ => 0.0,
        },
    }
}

impl<'a, D> Surface for RasterSurface<'a, D>
where
    D: DrawTarget<Color = Rgb888>,
{
    type Error = D::Error;

    fn size(&self) -> (f32, f32) {
        let size = self.target.bounding_box().size;
        (size.width as f32, size.height as f32)
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.target.clear(self.background)
    }

    fn fill(&mut self, shape: &Shape, paint: &Paint) -> Result<(), Self::Error> {
        let color = self.color_at(paint, shape_center_x(shape));
        let style = PrimitiveStyle::with_fill(color);
        match shape {
            Shape::Bar {
                x,
                y,
                width,
                height,
                corner_radius,
            } => {
                let rect = Rectangle::new(
                    Point::new(x.round() as i32, y.round() as i32),
                    Size::new(to_px(*width), to_px(*height)),
                );
                let r = Size::new_equal(to_px(*corner_radius));
                let radii = CornerRadii {
                    top_left: r,
                    top_right: r,
                    bottom_right: Size::zero(),
                    bottom_left: Size::zero(),
                };
                RoundedRectangle::new(rect, radii)
                    .into_styled(style)
                    .draw(&mut *self.target)
            }
            Shape::Circle { center, radius } => {
                Circle::with_center(to_point(*center), to_px(radius * 2.0))
                    .into_styled(style)
                    .draw(&mut *self.target)
            }
            // Open shapes have no interior; fill them as hairlines.
            Shape::Line { .. } | Shape::Polyline(_) => self.stroke(shape, paint, 1.0),
        }
    }

    fn stroke(&mut self, shape: &Shape, paint: &Paint, width: f32) -> Result<(), Self::Error> {
        let stroke_width = to_px(width).max(1);
        match shape {
            Shape::Line { from, to } => {
                let color = self.color_at(paint, (from.x + to.x) / 2.0);
                Line::new(to_point(*from), to_point(*to))
                    .into_styled(PrimitiveStyle::with_stroke(color, stroke_width))
                    .draw(&mut *self.target)
            }
            Shape::Polyline(points) => {
                // Per-segment so gradients follow the line across the surface.
                let pixels: Vec<Point> = points.iter().copied().map(to_point).collect();
                for (segment, pair) in pixels.windows(2).zip(points.windows(2)) {
                    let color = self.color_at(paint, (pair[0].x + pair[1].x) / 2.0);
                    Line::new(segment[0], segment[1])
                        .into_styled(PrimitiveStyle::with_stroke(color, stroke_width))
                        .draw(&mut *self.target)?;
                }
                Ok(())
            }
            Shape::Circle { center, radius } => {
                let color = self.color_at(paint, center.x);
                Circle::with_center(to_point(*center), to_px(radius * 2.0))
                    .into_styled(PrimitiveStyle::with_stroke(color, stroke_width))
                    .draw(&mut *self.target)
            }
            Shape::Bar {
                x,
                y,
                width: w,
                height,
                ..
            } => {
                let color = self.color_at(paint, x + w / 2.0);
                Rectangle::new(
                    Point::new(x.round() as i32, y.round() as i32),
                    Size::new(to_px(*w), to_px(*height)),
                )
                .into_styled(PrimitiveStyle::with_stroke(color, stroke_width))
                .draw(&mut *self.target)
            }
        }
    }
}
