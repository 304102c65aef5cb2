//! Per-frame hover highlighting.
//!
//! Invariant: at most one body carries the highlight fill, and a body that is no
//! longer under the pointer always gets its original fill back. The previous
//! highlight is restored *before* the new query result is evaluated, so a body
//! that stays hovered is recolored from its original fill, never from the
//! highlight.

use crate::core::color::Color;
use crate::core::surface::Point;
use crate::core::task::TaskId;
use crate::world::{BodyKey, PhysicsWorld};

/// Offset applied to reported coordinates so a tooltip does not cover the pointer.
pub const TOOLTIP_OFFSET: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Hovered {
    key: BodyKey,
    original_fill: Color,
}

/// Result of one hover check, reported to the hover callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoverOutcome {
    Task { task: TaskId, x: f32, y: f32 },
    Nothing,
}

impl HoverOutcome {
    pub fn task(&self) -> Option<TaskId> {
        match self {
            Self::Task { task, .. } => Some(*task),
            Self::Nothing => None,
        }
    }

    /// Callback coordinates: offset pointer position, or `(0, 0)` when nothing is hovered.
    pub fn coordinates(&self) -> (f32, f32) {
        match self {
            Self::Task { x, y, .. } => (*x, *y),
            Self::Nothing => (0.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoverTracker {
    highlight: Color,
    hovered: Option<Hovered>,
}

impl Default for HoverTracker {
    fn default() -> Self {
        Self::new(Color::HIGHLIGHT)
    }
}

impl HoverTracker {
    pub fn new(highlight: Color) -> Self {
        Self {
            highlight,
            hovered: None,
        }
    }

    pub fn hovered(&self) -> Option<BodyKey> {
        self.hovered.map(|hovered| hovered.key)
    }

    pub fn highlight(&self) -> Color {
        self.highlight
    }

    pub fn check(&mut self, world: &mut PhysicsWorld, pointer: Point) -> HoverOutcome {
        self.restore(world);

        let Some(key) = world.bodies_at(pointer).first().copied() else {
            return HoverOutcome::Nothing;
        };
        let Some(task) = world.task_of(key) else {
            return HoverOutcome::Nothing;
        };
        let Some(style) = world.style(key) else {
            return HoverOutcome::Nothing;
        };

        self.hovered = Some(Hovered {
            key,
            original_fill: style.fill,
        });
        world.set_fill(key, self.highlight);

        HoverOutcome::Task {
            task,
            x: pointer.x + TOOLTIP_OFFSET,
            y: pointer.y + TOOLTIP_OFFSET,
        }
    }

    /// Puts the original fill back on the hovered body and forgets it.
    pub fn restore(&mut self, world: &mut PhysicsWorld) {
        if let Some(hovered) = self.hovered.take() {
            world.set_fill(hovered.key, hovered.original_fill);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HoverOutcome, HoverTracker};
    use crate::core::color::Color;
    use crate::core::surface::Point;
    use crate::core::task::TaskId;
    use crate::world::{BodyStyle, PhysicsWorld};

    const RED: Color = Color::rgb(0xff, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 0xff);

    fn style(fill: Color) -> BodyStyle {
        BodyStyle { fill, opacity: 0.5 }
    }

    #[test]
    fn still_hovered_body_keeps_highlight_and_original() {
        let mut world = PhysicsWorld::new(Point::default(), 1.0 / 60.0);
        let ball = world.add_circle(Point::new(50.0, 50.0), 20.0, style(RED), Some(TaskId(7)));
        let mut tracker = HoverTracker::default();

        for _ in 0..3 {
            let outcome = tracker.check(&mut world, Point::new(50.0, 50.0));
            assert_eq!(
                outcome,
                HoverOutcome::Task {
                    task: TaskId(7),
                    x: 60.0,
                    y: 60.0
                }
            );
            assert_eq!(world.style(ball).map(|s| s.fill), Some(Color::HIGHLIGHT));
        }

        let outcome = tracker.check(&mut world, Point::new(500.0, 500.0));
        assert_eq!(outcome, HoverOutcome::Nothing);
        assert_eq!(outcome.coordinates(), (0.0, 0.0));
        assert_eq!(world.style(ball).map(|s| s.fill), Some(RED));
        assert_eq!(tracker.hovered(), None);
    }

    #[test]
    fn moving_between_bodies_restores_the_previous_one() {
        let mut world = PhysicsWorld::new(Point::default(), 1.0 / 60.0);
        let red = world.add_circle(Point::new(50.0, 50.0), 20.0, style(RED), Some(TaskId(1)));
        let blue = world.add_circle(Point::new(150.0, 50.0), 20.0, style(BLUE), Some(TaskId(2)));
        let mut tracker = HoverTracker::default();

        tracker.check(&mut world, Point::new(50.0, 50.0));
        let outcome = tracker.check(&mut world, Point::new(150.0, 50.0));

        assert_eq!(outcome.task(), Some(TaskId(2)));
        assert_eq!(tracker.hovered(), Some(blue));
        assert_eq!(world.style(red).map(|s| s.fill), Some(RED));
        assert_eq!(world.style(blue).map(|s| s.fill), Some(Color::HIGHLIGHT));
    }

    #[test]
    fn taskless_top_hit_clears_hover() {
        let mut world = PhysicsWorld::new(Point::default(), 1.0 / 60.0);
        let tagged = world.add_circle(Point::new(50.0, 50.0), 20.0, style(RED), Some(TaskId(1)));
        world.add_circle(Point::new(50.0, 50.0), 5.0, style(BLUE), None);
        let mut tracker = HoverTracker::default();

        assert_eq!(
            tracker.check(&mut world, Point::new(50.0, 50.0)),
            HoverOutcome::Nothing
        );
        assert_eq!(world.style(tagged).map(|s| s.fill), Some(RED));

        let outcome = tracker.check(&mut world, Point::new(65.0, 50.0));
        assert_eq!(outcome.task(), Some(TaskId(1)));
    }
}
