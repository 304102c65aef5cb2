//! Four static walls enclosing the viewport.
//!
//! Invariant: after [`Boundary::fit`], each wall's inner face lies exactly on the
//! matching viewport edge and its outer face one thickness further out. Walls
//! overhang the corners by one thickness so no diagonal gap exists.
//!
//! Faces are exact for whole-pixel viewports; fractional sizes lose precision
//! against the wall thickness in `f32`. [`crate::SimulationHost`] snaps every
//! viewport it receives.

use crate::core::color::Color;
use crate::core::surface::{Point, Viewport};
use crate::world::{BodyKey, BodyStyle, PhysicsWorld};

/// Large relative to any viewport so a fast body cannot cross a wall in one step.
pub const WALL_THICKNESS: f32 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl WallSide {
    pub const ALL: [WallSide; 4] = [
        WallSide::Top,
        WallSide::Bottom,
        WallSide::Left,
        WallSide::Right,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallGeometry {
    pub side: WallSide,
    pub center: Point,
    pub half_width: f32,
    pub half_height: f32,
}

impl WallGeometry {
    pub fn for_side(side: WallSide, viewport: Viewport, thickness: f32) -> Self {
        let half = thickness / 2.0;
        let Viewport { width, height } = viewport;
        match side {
            WallSide::Top => Self {
                side,
                center: Point::new(width / 2.0, -half),
                half_width: width / 2.0 + thickness,
                half_height: half,
            },
            WallSide::Bottom => Self {
                side,
                center: Point::new(width / 2.0, height + half),
                half_width: width / 2.0 + thickness,
                half_height: half,
            },
            WallSide::Left => Self {
                side,
                center: Point::new(-half, height / 2.0),
                half_width: half,
                half_height: height / 2.0 + thickness,
            },
            WallSide::Right => Self {
                side,
                center: Point::new(width + half, height / 2.0),
                half_width: half,
                half_height: height / 2.0 + thickness,
            },
        }
    }

    /// Coordinate of the face that borders the viewport.
    pub fn inner_edge(&self) -> f32 {
        match self.side {
            WallSide::Top => self.center.y + self.half_height,
            WallSide::Bottom => self.center.y - self.half_height,
            WallSide::Left => self.center.x + self.half_width,
            WallSide::Right => self.center.x - self.half_width,
        }
    }

    pub fn outer_edge(&self) -> f32 {
        match self.side {
            WallSide::Top => self.center.y - self.half_height,
            WallSide::Bottom => self.center.y + self.half_height,
            WallSide::Left => self.center.x - self.half_width,
            WallSide::Right => self.center.x + self.half_width,
        }
    }
}

pub struct Boundary {
    walls: [(WallSide, BodyKey); 4],
    thickness: f32,
    viewport: Viewport,
}

impl Boundary {
    pub fn new(world: &mut PhysicsWorld, viewport: Viewport, thickness: f32) -> Self {
        let style = BodyStyle {
            fill: Color::BLACK,
            opacity: 1.0,
        };
        let walls = WallSide::ALL.map(|side| {
            let geometry = WallGeometry::for_side(side, viewport, thickness);
            let key = world.add_static_rect(
                geometry.center,
                geometry.half_width,
                geometry.half_height,
                style,
            );
            (side, key)
        });

        Self {
            walls,
            thickness,
            viewport,
        }
    }

    /// Repositions and reshapes the existing walls around `viewport`.
    pub fn fit(&mut self, world: &mut PhysicsWorld, viewport: Viewport) {
        for (side, key) in self.walls {
            let geometry = WallGeometry::for_side(side, viewport, self.thickness);
            world.reshape_static_rect(
                key,
                geometry.center,
                geometry.half_width,
                geometry.half_height,
            );
        }
        self.viewport = viewport;
    }

    pub fn geometry(&self) -> [WallGeometry; 4] {
        WallSide::ALL.map(|side| WallGeometry::for_side(side, self.viewport, self.thickness))
    }

    pub fn walls(&self) -> [(WallSide, BodyKey); 4] {
        self.walls
    }

    pub fn contains_key(&self, key: BodyKey) -> bool {
        self.walls.iter().any(|(_, wall)| *wall == key)
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}
