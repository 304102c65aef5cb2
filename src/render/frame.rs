//! Typed render model handed to a surface once per frame.
//!
//! A frame is a plain snapshot: surfaces never reach back into the physics world.

use crate::core::color::Color;
use crate::core::surface::{Point, Viewport};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Circle {
        center: Point,
        radius: f32,
    },
    Rect {
        center: Point,
        half_width: f32,
        half_height: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drawable {
    pub shape: Shape,
    pub fill: Color,
    /// 0.0 is transparent, 1.0 opaque.
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub viewport: Viewport,
    /// `None` means a transparent background.
    pub background: Option<Color>,
    pub drawables: Vec<Drawable>,
}

impl Frame {
    pub fn new(viewport: Viewport, background: Option<Color>) -> Self {
        Self {
            viewport,
            background,
            drawables: Vec::new(),
        }
    }

    pub fn push(&mut self, drawable: Drawable) {
        self.drawables.push(drawable);
    }

    pub fn circles(&self) -> impl Iterator<Item = &Drawable> {
        self.drawables
            .iter()
            .filter(|drawable| matches!(drawable.shape, Shape::Circle { .. }))
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }
}
