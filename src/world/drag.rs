//! Pointer drag: a soft constraint pulling a grabbed body toward the pointer.

use crate::core::surface::Point;
use crate::world::{BodyKey, PhysicsWorld};

/// Fraction of the remaining distance closed per step.
pub const DEFAULT_DRAG_STIFFNESS: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Grab {
    key: BodyKey,
    /// Pointer position relative to the body center at grab time.
    offset: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerDrag {
    stiffness: f32,
    grab: Option<Grab>,
}

impl Default for PointerDrag {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_STIFFNESS)
    }
}

impl PointerDrag {
    pub fn new(stiffness: f32) -> Self {
        Self {
            stiffness: stiffness.clamp(0.0, 1.0),
            grab: None,
        }
    }

    pub fn grabbed(&self) -> Option<BodyKey> {
        self.grab.map(|grab| grab.key)
    }

    /// Grabs the topmost dynamic body under `point`, if any.
    pub fn press(&mut self, world: &PhysicsWorld, point: Point) -> Option<BodyKey> {
        let key = world
            .bodies_at(point)
            .into_iter()
            .find(|key| world.is_dynamic(*key))?;
        let center = world.position(key)?;
        self.grab = Some(Grab {
            key,
            offset: Point::new(point.x - center.x, point.y - center.y),
        });
        Some(key)
    }

    pub fn release(&mut self) -> Option<BodyKey> {
        self.grab.take().map(|grab| grab.key)
    }

    /// Sets the grabbed body's velocity so the next step closes `stiffness` of
    /// the gap between the body and the pointer.
    pub fn apply(&self, world: &mut PhysicsWorld, pointer: Point) {
        let Some(grab) = self.grab else {
            return;
        };
        let Some(center) = world.position(grab.key) else {
            return;
        };
        let dt = world.timestep();
        if dt <= 0.0 {
            return;
        }

        let target = Point::new(pointer.x - grab.offset.x, pointer.y - grab.offset.y);
        let velocity = Point::new(
            (target.x - center.x) * self.stiffness / dt,
            (target.y - center.y) * self.stiffness / dt,
        );
        world.set_velocity(grab.key, velocity);
    }
}
