//! TaskGPT task world.
//!
//! Tasks become groups of falling circles in a walled 2D physics world: one
//! circle per session, sized by session duration. The pointer can drag bodies
//! around and hovering a task body highlights it and reports the task to a
//! tooltip callback.
//!
//! Invariant: only [`SimulationHost::run_frame`] advances the world; surface
//! callbacks record input and the next frame drains it.
//!
//! # Public API Overview
//! - Build a host over any [`Surface`] with [`SimulationHost::new`] and drive it
//!   manually or through [`FrameLoop::spawn`].
//! - Spawn tasks with [`SimulationHost::spawn_task`]; parse assistant replies with
//!   [`TaskDefinition::parse`].
//! - Use [`HeadlessSurface`] to run without a display.

pub mod config;
pub mod logging;

pub mod core;
pub mod platform;
pub mod render;
pub mod runtime;
pub mod world;

/// Task model and reply parsing.
pub use crate::core::color::{Color, ColorError};
pub use crate::core::task::{DefinitionError, Task, TaskDefinition, TaskError, TaskId};

/// Surface contract and input events.
pub use crate::core::surface::{
    Point, PointerEvent, PointerHandler, ResizeHandler, Surface, Viewport,
};
pub use crate::platform::{HeadlessController, HeadlessSurface};
pub use crate::render::{Drawable, Frame, Shape};

/// Host, frame loop and hover tracking.
pub use crate::config::{EnvConfig, HostConfig};
pub use crate::runtime::{
    FrameLoop, FrameLoopHandle, HoverCallback, HoverOutcome, SimulationHost, SpawnedTask,
    TOOLTIP_OFFSET,
};

/// Physics world and boundary walls.
pub use crate::world::walls::{Boundary, WallGeometry, WallSide, WALL_THICKNESS};
pub use crate::world::{BodyKey, BodyShape, BodyStyle, PhysicsWorld};
