//! Simulation runtime.

use std::sync::{Mutex, MutexGuard};

pub mod frame_loop;
pub mod host;
pub mod hover;

pub use frame_loop::{FrameLoop, FrameLoopHandle};
pub use host::{HoverCallback, SimulationHost, SpawnedTask};
pub use hover::{HoverOutcome, HoverTracker, TOOLTIP_OFFSET};

pub(crate) fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
