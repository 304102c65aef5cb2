#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use taskgpt::{
    Color, Frame, HeadlessController, HeadlessSurface, HostConfig, Point, SimulationHost, Task,
    Viewport,
};

pub const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

/// One hover callback invocation, with the task reduced to its name.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverCall {
    pub task: Option<String>,
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Default)]
pub struct HoverLog {
    calls: Arc<Mutex<Vec<HoverCall>>>,
}

impl HoverLog {
    pub fn record(&self, task: Option<&Task>, x: f32, y: f32) {
        self.calls
            .lock()
            .expect("lock hover log")
            .push(HoverCall {
                task: task.map(|task| task.name().to_string()),
                x,
                y,
            });
    }

    pub fn last(&self) -> Option<HoverCall> {
        self.calls.lock().expect("lock hover log").last().cloned()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().expect("lock hover log").len()
    }
}

pub struct Harness {
    pub host: SimulationHost<HeadlessSurface>,
    pub controller: HeadlessController,
    pub hovers: HoverLog,
}

impl Harness {
    /// A host over a headless surface; not started.
    pub fn new(viewport: Viewport, config: HostConfig) -> Self {
        let (surface, controller) = HeadlessSurface::new(viewport);
        let hovers = HoverLog::default();
        let recorder = hovers.clone();
        let host = SimulationHost::new(surface, config, move |task, x, y| {
            recorder.record(task, x, y)
        });
        Self {
            host,
            controller,
            hovers,
        }
    }

    pub fn started(viewport: Viewport, config: HostConfig) -> Self {
        let mut harness = Self::new(viewport, config);
        harness.host.start().expect("start host");
        harness
    }

    /// Started, seeded and without gravity, so spawned bodies stay put.
    pub fn floating() -> Self {
        Self::started(
            VIEWPORT,
            HostConfig::default()
                .with_gravity(Point::default())
                .with_seed(42),
        )
    }

    pub fn hover_at(&mut self, point: Point) {
        assert!(self.controller.move_pointer(point), "surface not started");
        self.host.run_frame();
    }

    pub fn frame(&self) -> Frame {
        self.controller.last_frame().expect("a frame was presented")
    }
}

pub fn task(name: &str, color: Color, duration: f32, sessions: u32) -> Task {
    Task::new(name, color, duration, sessions).expect("valid task")
}

pub fn highlighted_count(frame: &Frame) -> usize {
    frame
        .drawables
        .iter()
        .filter(|drawable| drawable.fill == Color::HIGHLIGHT)
        .count()
}
