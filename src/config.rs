//! Environment and host configuration.

use std::env;
use std::time::Duration;

use crate::core::color::{Color, ColorError};
use crate::core::surface::Point;
use crate::world::drag::DEFAULT_DRAG_STIFFNESS;
use crate::world::walls::WALL_THICKNESS;

/// Pixels per second squared, pointing down the screen.
pub const DEFAULT_GRAVITY: f32 = 1000.0;
pub const DEFAULT_TIMESTEP: f32 = 1.0 / 60.0;
pub const DEFAULT_BODY_OPACITY: f32 = 0.5;
/// Cadence for [`crate::FrameLoop::spawn`], about 60 frames per second.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub background: Option<String>,
    pub seed: Option<u64>,
    pub log_filter: Option<String>,
    pub debug: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            background: env_string_opt("TASKGPT_BACKGROUND"),
            seed: env_string_opt("TASKGPT_SEED").and_then(|value| value.trim().parse().ok()),
            log_filter: env_string_opt("TASKGPT_LOG"),
            debug: env_flag("TASKGPT_DEBUG"),
        }
    }
}

/// Settings for a [`crate::SimulationHost`].
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    /// `None` renders a transparent background.
    pub background: Option<Color>,
    pub gravity: Point,
    pub timestep: f32,
    pub wall_thickness: f32,
    pub highlight: Color,
    pub body_opacity: f32,
    pub drag_stiffness: f32,
    /// Seed for default spawn positions; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            background: None,
            gravity: Point::new(0.0, DEFAULT_GRAVITY),
            timestep: DEFAULT_TIMESTEP,
            wall_thickness: WALL_THICKNESS,
            highlight: Color::HIGHLIGHT,
            body_opacity: DEFAULT_BODY_OPACITY,
            drag_stiffness: DEFAULT_DRAG_STIFFNESS,
            seed: None,
        }
    }
}

impl HostConfig {
    /// Applies `TASKGPT_*` overrides on top of the defaults.
    ///
    /// A background of `transparent` (any case) keeps the background unset.
    pub fn from_env_config(env: &EnvConfig) -> Result<Self, ColorError> {
        let background = match env.background.as_deref().map(str::trim) {
            None => None,
            Some(value) if value.eq_ignore_ascii_case("transparent") => None,
            Some(value) => Some(Color::parse(value)?),
        };

        Ok(Self {
            background,
            seed: env.seed,
            ..Self::default()
        })
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_gravity(mut self, gravity: Point) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_highlight(mut self, highlight: Color) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
