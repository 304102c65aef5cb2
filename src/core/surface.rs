//! Render surface trait and the input events it reports.

use crate::render::Frame;

/// A point in surface pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Visible area of the surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Rounded to whole pixels, at least one pixel on each side.
    pub fn snapped(&self) -> Self {
        Self::new(self.width.round().max(1.0), self.height.round().max(1.0))
    }

    pub fn contains(&self, point: Point) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Moved(Point),
    Pressed(Point),
    Released(Point),
    /// The pointer left the surface.
    Left,
}

pub type PointerHandler = Box<dyn FnMut(PointerEvent) + Send>;
pub type ResizeHandler = Box<dyn FnMut(Viewport) + Send>;

/// Minimal render surface interface for the simulation host.
pub trait Surface {
    /// Start the surface with pointer and resize handlers.
    fn start(
        &mut self,
        on_pointer: PointerHandler,
        on_resize: ResizeHandler,
    ) -> std::io::Result<()>;

    /// Stop the surface and release its resources.
    fn stop(&mut self) -> std::io::Result<()>;

    /// Current surface dimensions.
    fn viewport(&self) -> Viewport;

    /// Match the drawing buffer to a new viewport.
    fn set_viewport(&mut self, viewport: Viewport);

    /// Draw one frame.
    fn present(&mut self, frame: &Frame);
}
