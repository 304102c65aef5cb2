//! Thin coordination layer over a `rapier2d` world.
//!
//! Invariant: every collider inserted through [`PhysicsWorld`] has exactly one
//! registry entry, and entries are never removed, so a [`BodyKey`] doubles as the
//! insertion sequence number.

pub mod drag;
pub mod walls;

use rapier2d::prelude::*;

use crate::core::color::Color;
use crate::core::surface::Point;
use crate::core::task::TaskId;
use crate::render::{Drawable, Frame, Shape as DrawShape};

/// Stable identifier of a body, ordered by insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyKey(usize);

impl BodyKey {
    pub fn sequence(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyStyle {
    pub fill: Color,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    Circle { radius: f32 },
    Rect { half_width: f32, half_height: f32 },
}

struct BodyEntry {
    collider: ColliderHandle,
    /// `None` for static geometry inserted without a parent body.
    rigid_body: Option<RigidBodyHandle>,
    shape: BodyShape,
    style: BodyStyle,
    task: Option<TaskId>,
}

pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    entries: Vec<BodyEntry>,
    steps: u64,
}

impl PhysicsWorld {
    /// Gravity is in pixels per second squared, y pointing down.
    pub fn new(gravity: Point, timestep: f32) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = timestep;

        Self {
            gravity: vector![gravity.x, gravity.y],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            entries: Vec::new(),
            steps: 0,
        }
    }

    pub fn timestep(&self) -> f32 {
        self.integration_parameters.dt
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = BodyKey> + '_ {
        (0..self.entries.len()).map(BodyKey)
    }

    /// Adds a dynamic circle that takes part in the simulation from the next step.
    pub fn add_circle(
        &mut self,
        center: Point,
        radius: f32,
        style: BodyStyle,
        task: Option<TaskId>,
    ) -> BodyKey {
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(vector![center.x, center.y])
            .ccd_enabled(true)
            .build();
        let rigid_body = self.rigid_body_set.insert(rigid_body);
        let collider = ColliderBuilder::ball(radius)
            .friction(0.1)
            .restitution(0.0)
            .build();
        let collider =
            self.collider_set
                .insert_with_parent(collider, rigid_body, &mut self.rigid_body_set);

        self.push_entry(BodyEntry {
            collider,
            rigid_body: Some(rigid_body),
            shape: BodyShape::Circle { radius },
            style,
            task,
        })
    }

    /// Adds an immovable rectangle.
    pub fn add_static_rect(
        &mut self,
        center: Point,
        half_width: f32,
        half_height: f32,
        style: BodyStyle,
    ) -> BodyKey {
        let collider = ColliderBuilder::cuboid(half_width, half_height)
            .translation(vector![center.x, center.y])
            .friction(0.1)
            .build();
        let collider = self.collider_set.insert(collider);

        self.push_entry(BodyEntry {
            collider,
            rigid_body: None,
            shape: BodyShape::Rect {
                half_width,
                half_height,
            },
            style,
            task: None,
        })
    }

    /// Moves and reshapes a static rectangle in place.
    ///
    /// Returns `false` when `key` is not a static rectangle.
    pub fn reshape_static_rect(
        &mut self,
        key: BodyKey,
        center: Point,
        half_width: f32,
        half_height: f32,
    ) -> bool {
        let Some(entry) = self.entries.get_mut(key.0) else {
            return false;
        };
        if entry.rigid_body.is_some() || !matches!(entry.shape, BodyShape::Rect { .. }) {
            return false;
        }
        let Some(collider) = self.collider_set.get_mut(entry.collider) else {
            return false;
        };

        collider.set_translation(vector![center.x, center.y]);
        collider.set_shape(SharedShape::cuboid(half_width, half_height));
        entry.shape = BodyShape::Rect {
            half_width,
            half_height,
        };
        true
    }

    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
        self.steps += 1;
    }

    /// All bodies whose shape contains `point`, most recently added first.
    pub fn bodies_at(&self, point: Point) -> Vec<BodyKey> {
        let target = point![point.x, point.y];
        self.entries
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, entry)| {
                self.collider_set
                    .get(entry.collider)
                    .is_some_and(|collider| {
                        collider.shape().contains_point(collider.position(), &target)
                    })
            })
            .map(|(index, _)| BodyKey(index))
            .collect()
    }

    pub fn position(&self, key: BodyKey) -> Option<Point> {
        let entry = self.entries.get(key.0)?;
        let translation = self.collider_set.get(entry.collider)?.translation();
        Some(Point::new(translation.x, translation.y))
    }

    pub fn velocity(&self, key: BodyKey) -> Option<Point> {
        let handle = self.entries.get(key.0)?.rigid_body?;
        let linvel = self.rigid_body_set.get(handle)?.linvel();
        Some(Point::new(linvel.x, linvel.y))
    }

    pub fn set_velocity(&mut self, key: BodyKey, velocity: Point) -> bool {
        let Some(handle) = self.entries.get(key.0).and_then(|entry| entry.rigid_body) else {
            return false;
        };
        let Some(rigid_body) = self.rigid_body_set.get_mut(handle) else {
            return false;
        };
        rigid_body.set_linvel(vector![velocity.x, velocity.y], true);
        true
    }

    pub fn is_dynamic(&self, key: BodyKey) -> bool {
        self.entries
            .get(key.0)
            .is_some_and(|entry| entry.rigid_body.is_some())
    }

    pub fn shape(&self, key: BodyKey) -> Option<BodyShape> {
        self.entries.get(key.0).map(|entry| entry.shape)
    }

    pub fn style(&self, key: BodyKey) -> Option<BodyStyle> {
        self.entries.get(key.0).map(|entry| entry.style)
    }

    pub fn set_fill(&mut self, key: BodyKey, fill: Color) -> bool {
        match self.entries.get_mut(key.0) {
            Some(entry) => {
                entry.style.fill = fill;
                true
            }
            None => false,
        }
    }

    pub fn task_of(&self, key: BodyKey) -> Option<TaskId> {
        self.entries.get(key.0).and_then(|entry| entry.task)
    }

    /// Appends one drawable per body, in insertion order.
    pub fn draw_into(&self, frame: &mut Frame) {
        for (index, entry) in self.entries.iter().enumerate() {
            let Some(center) = self.position(BodyKey(index)) else {
                continue;
            };
            let shape = match entry.shape {
                BodyShape::Circle { radius } => DrawShape::Circle { center, radius },
                BodyShape::Rect {
                    half_width,
                    half_height,
                } => DrawShape::Rect {
                    center,
                    half_width,
                    half_height,
                },
            };
            frame.push(Drawable {
                shape,
                fill: entry.style.fill,
                opacity: entry.style.opacity,
            });
        }
    }

    fn push_entry(&mut self, entry: BodyEntry) -> BodyKey {
        self.entries.push(entry);
        BodyKey(self.entries.len() - 1)
    }
}
