//! Simulation host: owns the physics world, the surface and the per-frame pipeline.

use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::HostConfig;
use crate::core::surface::{Point, PointerEvent, Surface, Viewport};
use crate::core::task::{Task, TaskId};
use crate::render::Frame;
use crate::runtime::hover::{HoverOutcome, HoverTracker};
use crate::runtime::lock_unpoisoned;
use crate::world::drag::PointerDrag;
use crate::world::walls::Boundary;
use crate::world::{BodyKey, BodyStyle, PhysicsWorld};

/// Receives `(task, x, y)` every frame; `(None, 0.0, 0.0)` when nothing is hovered.
pub type HoverCallback = Box<dyn FnMut(Option<&Task>, f32, f32) + Send>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum PointerUpdate {
    At(Point),
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ButtonTransition {
    Pressed(Point),
    Released,
}

#[derive(Default)]
struct HostWakeState {
    latest_pointer: Option<PointerUpdate>,
    buttons: Vec<ButtonTransition>,
    pending_viewport: Option<Viewport>,
    stop_requested: bool,
}

/// State written by surface callbacks and drained once per frame.
///
/// Pointer moves overwrite each other; only the last position before a frame
/// matters. Button transitions are kept in order so drags are never lost.
#[derive(Default)]
struct HostWake {
    state: Mutex<HostWakeState>,
}

impl HostWake {
    fn pointer_event(&self, event: PointerEvent) {
        let mut state = lock_unpoisoned(&self.state);
        match event {
            PointerEvent::Moved(point) => state.latest_pointer = Some(PointerUpdate::At(point)),
            PointerEvent::Pressed(point) => {
                state.latest_pointer = Some(PointerUpdate::At(point));
                state.buttons.push(ButtonTransition::Pressed(point));
            }
            PointerEvent::Released(point) => {
                state.latest_pointer = Some(PointerUpdate::At(point));
                state.buttons.push(ButtonTransition::Released);
            }
            PointerEvent::Left => state.latest_pointer = Some(PointerUpdate::Left),
        }
    }

    fn signal_resize(&self, viewport: Viewport) {
        let mut state = lock_unpoisoned(&self.state);
        state.pending_viewport = Some(viewport);
    }

    fn take_pending_viewport(&self) -> Option<Viewport> {
        lock_unpoisoned(&self.state).pending_viewport.take()
    }

    fn take_pointer_input(&self) -> (Option<PointerUpdate>, Vec<ButtonTransition>) {
        let mut state = lock_unpoisoned(&self.state);
        (
            state.latest_pointer.take(),
            std::mem::take(&mut state.buttons),
        )
    }

    fn stop_requested(&self) -> bool {
        lock_unpoisoned(&self.state).stop_requested
    }

    fn request_stop(&self) {
        lock_unpoisoned(&self.state).stop_requested = true;
    }

    fn reset_for_start(&self) {
        let mut state = lock_unpoisoned(&self.state);
        *state = HostWakeState::default();
    }
}

/// Bodies created by one [`SimulationHost::spawn_task`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnedTask {
    pub task: TaskId,
    pub bodies: Vec<BodyKey>,
}

pub struct SimulationHost<S: Surface> {
    surface: S,
    config: HostConfig,
    world: PhysicsWorld,
    boundary: Boundary,
    hover: HoverTracker,
    drag: PointerDrag,
    tasks: BTreeMap<TaskId, Task>,
    next_task_id: u64,
    pointer: Option<Point>,
    on_hover: HoverCallback,
    wake: Arc<HostWake>,
    rng: StdRng,
    frames: u64,
    stopped: bool,
}

impl<S: Surface> SimulationHost<S> {
    /// Builds the world and the boundary walls around the surface's current viewport.
    pub fn new<F>(surface: S, config: HostConfig, on_hover: F) -> Self
    where
        F: FnMut(Option<&Task>, f32, f32) + Send + 'static,
    {
        let mut surface = surface;
        let viewport = surface.viewport().snapped();
        surface.set_viewport(viewport);
        let mut world = PhysicsWorld::new(config.gravity, config.timestep);
        let boundary = Boundary::new(&mut world, viewport, config.wall_thickness);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            surface,
            hover: HoverTracker::new(config.highlight),
            drag: PointerDrag::new(config.drag_stiffness),
            config,
            world,
            boundary,
            tasks: BTreeMap::new(),
            next_task_id: 1,
            pointer: None,
            on_hover: Box::new(on_hover),
            wake: Arc::new(HostWake::default()),
            rng,
            frames: 0,
            stopped: true,
        }
    }

    pub fn start(&mut self) -> io::Result<()> {
        if !self.stopped {
            return Ok(());
        }
        self.wake.reset_for_start();
        self.stopped = false;

        let wake_pointer = Arc::clone(&self.wake);
        let wake_resize = Arc::clone(&self.wake);
        if let Err(err) = self.surface.start(
            Box::new(move |event| wake_pointer.pointer_event(event)),
            Box::new(move |viewport| wake_resize.signal_resize(viewport)),
        ) {
            self.stopped = true;
            return Err(err);
        }

        let viewport = self.surface.viewport();
        info!(
            width = viewport.width,
            height = viewport.height,
            "simulation host started"
        );
        Ok(())
    }

    /// Stops the surface once; later calls and later frames are no-ops.
    pub fn stop(&mut self) -> io::Result<()> {
        if self.stopped {
            return Ok(());
        }
        self.wake.request_stop();
        self.hover.restore(&mut self.world);
        self.drag.release();
        let result = self.surface.stop();
        self.stopped = true;
        info!(frames = self.frames, "simulation host stopped");
        result
    }

    pub fn is_running(&self) -> bool {
        !self.stopped && !self.wake.stop_requested()
    }

    /// Runs one frame: resize, pointer input, physics step, hover check, present.
    pub fn run_frame(&mut self) {
        if !self.is_running() {
            return;
        }

        if let Some(viewport) = self.wake.take_pending_viewport() {
            self.resize(viewport);
        }

        self.apply_pointer_input();
        if let Some(pointer) = self.pointer {
            self.drag.apply(&mut self.world, pointer);
        }
        self.world.step();
        self.check_hover();
        self.present();
        self.frames += 1;
    }

    /// Updates the surface and refits the walls; dynamic bodies stay where they are.
    /// The viewport is snapped to whole pixels first.
    pub fn resize(&mut self, viewport: Viewport) {
        let viewport = viewport.snapped();
        self.surface.set_viewport(viewport);
        self.boundary.fit(&mut self.world, viewport);
        debug!(
            width = viewport.width,
            height = viewport.height,
            "viewport resized"
        );
    }

    /// Creates one circle per session, all at `at` or at a single random point
    /// inside the viewport.
    pub fn spawn_task(&mut self, task: Task, at: Option<Point>) -> SpawnedTask {
        let origin = at.unwrap_or_else(|| self.random_point());
        let id = TaskId(self.next_task_id);
        self.next_task_id += 1;

        let style = BodyStyle {
            fill: task.color(),
            opacity: self.config.body_opacity,
        };
        let bodies = (0..task.session_count())
            .map(|_| {
                self.world
                    .add_circle(origin, task.session_duration(), style, Some(id))
            })
            .collect();

        debug!(
            task = task.name(),
            sessions = task.session_count(),
            x = origin.x,
            y = origin.y,
            "spawned task"
        );
        self.tasks.insert(id, task);

        SpawnedTask { task: id, bodies }
    }

    /// Runs only the hover pass against the last known pointer position and
    /// invokes the hover callback.
    pub fn check_hover(&mut self) -> HoverOutcome {
        let outcome = match self.pointer {
            Some(pointer) => self.hover.check(&mut self.world, pointer),
            None => {
                self.hover.restore(&mut self.world);
                HoverOutcome::Nothing
            }
        };

        match outcome {
            HoverOutcome::Task { task, x, y } => (self.on_hover)(self.tasks.get(&task), x, y),
            HoverOutcome::Nothing => (self.on_hover)(None, 0.0, 0.0),
        }
        outcome
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn tasks(&self) -> impl Iterator<Item = (TaskId, &Task)> {
        self.tasks.iter().map(|(id, task)| (*id, task))
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn hovered(&self) -> Option<BodyKey> {
        self.hover.hovered()
    }

    /// Body currently held by the pointer.
    pub fn dragged(&self) -> Option<BodyKey> {
        self.drag.grabbed()
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn viewport(&self) -> Viewport {
        self.surface.viewport()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn apply_pointer_input(&mut self) {
        let (latest, buttons) = self.wake.take_pointer_input();
        match latest {
            Some(PointerUpdate::At(point)) => self.pointer = Some(point),
            Some(PointerUpdate::Left) => self.pointer = None,
            None => {}
        }

        for button in buttons {
            match button {
                ButtonTransition::Pressed(point) => {
                    if let Some(key) = self.drag.press(&self.world, point) {
                        debug!(body = key.sequence(), "drag started");
                    }
                }
                ButtonTransition::Released => {
                    self.drag.release();
                }
            }
        }
    }

    fn present(&mut self) {
        let mut frame = Frame::new(self.surface.viewport(), self.config.background);
        self.world.draw_into(&mut frame);
        self.surface.present(&frame);
    }

    fn random_point(&mut self) -> Point {
        let viewport = self.surface.viewport();
        Point::new(
            self.rng.gen_range(0.0..=viewport.width.max(0.0)),
            self.rng.gen_range(0.0..=viewport.height.max(0.0)),
        )
    }
}

impl<S: Surface> Drop for SimulationHost<S> {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::SimulationHost;
    use crate::config::HostConfig;
    use crate::core::color::Color;
    use crate::core::surface::{Point, PointerHandler, ResizeHandler, Surface, Viewport};
    use crate::core::task::Task;
    use crate::render::Frame;

    #[derive(Default)]
    struct TrackingState {
        start_calls: usize,
        stop_calls: usize,
        presented: usize,
    }

    struct TrackingSurface {
        state: Arc<Mutex<TrackingState>>,
        viewport: Viewport,
    }

    impl Surface for TrackingSurface {
        fn start(
            &mut self,
            _on_pointer: PointerHandler,
            _on_resize: ResizeHandler,
        ) -> std::io::Result<()> {
            self.state.lock().expect("tracking state").start_calls += 1;
            Ok(())
        }

        fn stop(&mut self) -> std::io::Result<()> {
            self.state.lock().expect("tracking state").stop_calls += 1;
            Ok(())
        }

        fn viewport(&self) -> Viewport {
            self.viewport
        }

        fn set_viewport(&mut self, viewport: Viewport) {
            self.viewport = viewport;
        }

        fn present(&mut self, _frame: &Frame) {
            self.state.lock().expect("tracking state").presented += 1;
        }
    }

    fn host(state: &Arc<Mutex<TrackingState>>) -> SimulationHost<TrackingSurface> {
        let surface = TrackingSurface {
            state: Arc::clone(state),
            viewport: Viewport::new(640.0, 480.0),
        };
        SimulationHost::new(
            surface,
            HostConfig::default().with_seed(7),
            |_, _, _| {},
        )
    }

    #[test]
    fn drop_does_nothing_when_never_started() {
        let state = Arc::new(Mutex::new(TrackingState::default()));
        drop(host(&state));

        let state = state.lock().expect("tracking state");
        assert_eq!(state.start_calls, 0);
        assert_eq!(state.stop_calls, 0);
    }

    #[test]
    fn stop_then_drop_does_not_double_teardown() {
        let state = Arc::new(Mutex::new(TrackingState::default()));
        let mut host = host(&state);
        host.start().expect("host start");
        host.run_frame();
        host.stop().expect("host stop");
        host.run_frame();
        drop(host);

        let state = state.lock().expect("tracking state");
        assert_eq!(state.start_calls, 1);
        assert_eq!(state.stop_calls, 1);
        assert_eq!(state.presented, 1);
    }

    #[test]
    fn frames_are_skipped_until_started() {
        let state = Arc::new(Mutex::new(TrackingState::default()));
        let mut host = host(&state);
        host.run_frame();
        assert_eq!(host.frames(), 0);
        assert_eq!(host.world().steps(), 0);
    }

    #[test]
    fn seeded_default_spawn_points_are_reproducible_and_inside_viewport() {
        let state = Arc::new(Mutex::new(TrackingState::default()));
        let task = Task::new("Walk the dog", Color::rgb(1, 2, 3), 5.0, 2).expect("task");

        let mut first = host(&state);
        let mut second = host(&state);
        let a = first.spawn_task(task.clone(), None);
        let b = second.spawn_task(task, None);

        let pa = first.world().position(a.bodies[0]).expect("position");
        let pb = second.world().position(b.bodies[0]).expect("position");
        assert_eq!(pa, pb);
        assert!(first.viewport().contains(pa));
        assert_eq!(first.world().position(a.bodies[1]), Some(pa));

        let explicit = first.spawn_task(
            Task::new("Brush teeth", Color::rgb(3, 2, 1), 1.0, 1).expect("task"),
            Some(Point::new(12.0, 34.0)),
        );
        assert_eq!(
            first.world().position(explicit.bodies[0]),
            Some(Point::new(12.0, 34.0))
        );
        assert_ne!(explicit.task, a.task);
    }
}
