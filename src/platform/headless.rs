//! In-memory surface with scriptable pointer and resize input.
//!
//! Used for tests and for running the simulation without a display. The
//! [`HeadlessController`] half stays with the caller after the surface is moved
//! into a host.

use std::sync::{Arc, Mutex};

use crate::core::surface::{Point, PointerEvent, PointerHandler, ResizeHandler, Surface, Viewport};
use crate::render::Frame;
use crate::runtime::lock_unpoisoned;

struct HeadlessState {
    viewport: Viewport,
    on_pointer: Option<PointerHandler>,
    on_resize: Option<ResizeHandler>,
    last_frame: Option<Frame>,
    presented: u64,
    start_calls: usize,
    stop_calls: usize,
}

pub struct HeadlessSurface {
    state: Arc<Mutex<HeadlessState>>,
}

#[derive(Clone)]
pub struct HeadlessController {
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessSurface {
    pub fn new(viewport: Viewport) -> (Self, HeadlessController) {
        let state = Arc::new(Mutex::new(HeadlessState {
            viewport,
            on_pointer: None,
            on_resize: None,
            last_frame: None,
            presented: 0,
            start_calls: 0,
            stop_calls: 0,
        }));
        (
            Self {
                state: Arc::clone(&state),
            },
            HeadlessController { state },
        )
    }
}

impl Surface for HeadlessSurface {
    fn start(
        &mut self,
        on_pointer: PointerHandler,
        on_resize: ResizeHandler,
    ) -> std::io::Result<()> {
        let mut state = lock_unpoisoned(&self.state);
        state.start_calls += 1;
        state.on_pointer = Some(on_pointer);
        state.on_resize = Some(on_resize);
        Ok(())
    }

    fn stop(&mut self) -> std::io::Result<()> {
        let mut state = lock_unpoisoned(&self.state);
        state.stop_calls += 1;
        state.on_pointer = None;
        state.on_resize = None;
        Ok(())
    }

    fn viewport(&self) -> Viewport {
        lock_unpoisoned(&self.state).viewport
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        lock_unpoisoned(&self.state).viewport = viewport;
    }

    fn present(&mut self, frame: &Frame) {
        let mut state = lock_unpoisoned(&self.state);
        state.presented += 1;
        state.last_frame = Some(frame.clone());
    }
}

impl HeadlessController {
    /// Delivers a pointer event; returns `false` when the surface is not started.
    pub fn pointer(&self, event: PointerEvent) -> bool {
        let mut state = lock_unpoisoned(&self.state);
        match state.on_pointer.as_mut() {
            Some(on_pointer) => {
                on_pointer(event);
                true
            }
            None => false,
        }
    }

    pub fn move_pointer(&self, point: Point) -> bool {
        self.pointer(PointerEvent::Moved(point))
    }

    /// Delivers a window resize; the surface itself is resized by the host.
    pub fn resize(&self, viewport: Viewport) -> bool {
        let mut state = lock_unpoisoned(&self.state);
        match state.on_resize.as_mut() {
            Some(on_resize) => {
                on_resize(viewport);
                true
            }
            None => false,
        }
    }

    pub fn viewport(&self) -> Viewport {
        lock_unpoisoned(&self.state).viewport
    }

    pub fn last_frame(&self) -> Option<Frame> {
        lock_unpoisoned(&self.state).last_frame.clone()
    }

    pub fn presented(&self) -> u64 {
        lock_unpoisoned(&self.state).presented
    }

    pub fn start_calls(&self) -> usize {
        lock_unpoisoned(&self.state).start_calls
    }

    pub fn stop_calls(&self) -> usize {
        lock_unpoisoned(&self.state).stop_calls
    }
}
