//! The drawable target the renderers issue primitives against.
use alloc::vec::Vec;
use core::convert::Infallible;

use crate::color::Paint;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Geometric primitives in surface pixel coordinates (origin top-left, y down).
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A rectangle whose two top corners are rounded by `corner_radius`.
    Bar {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        corner_radius: f32,
    },
    Circle { center: Point2, radius: f32 },
    Line { from: Point2, to: Point2 },
    Polyline(Vec<Point2>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Fill { shape: Shape, paint: Paint },
    Stroke { shape: Shape, paint: Paint, width: f32 },
}

/// Immediate-mode drawing API consumed by the renderers.
///
/// The core never reads back from a surface.
pub trait Surface {
    type Error;

    /// Width and height in pixels.
    fn size(&self) -> (f32, f32);

    fn clear(&mut self) -> Result<(), Self::Error>;

    fn fill(&mut self, shape: &Shape, paint: &Paint) -> Result<(), Self::Error>;

    fn stroke(&mut self, shape: &Shape, paint: &Paint, width: f32) -> Result<(), Self::Error>;
}

/// A surface that records every operation in order.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    width: f32,
    height: f32,
    ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Hands the recorded operations over and leaves the list empty.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        core::mem::take(&mut self.ops)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn fills(&self) -> impl Iterator<Item = (&Shape, &Paint)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Fill { shape, paint } => Some((shape, paint)),
            _ => None,
        })
    }

    pub fn strokes(&self) -> impl Iterator<Item = (&Shape, &Paint, f32)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Stroke { shape, paint, width } => Some((shape, paint, *width)),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    type Error = Infallible;

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Clear);
        Ok(())
    }

    fn fill(&mut self, shape: &Shape, paint: &Paint) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Fill {
            shape: shape.clone(),
            paint: paint.clone(),
        });
        Ok(())
    }

    fn stroke(&mut self, shape: &Shape, paint: &Paint, width: f32) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Stroke {
            shape: shape.clone(),
            paint: paint.clone(),
            width,
        });
        Ok(())
    }
}
