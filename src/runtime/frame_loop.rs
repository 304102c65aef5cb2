//! Recurring frame task driving a [`SimulationHost`] on a worker thread.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::core::surface::Surface;
use crate::runtime::host::SimulationHost;
use crate::runtime::lock_unpoisoned;

pub struct FrameLoop;

impl FrameLoop {
    /// Starts `host` and runs one frame per `interval` until the handle is stopped
    /// or dropped.
    pub fn spawn<S>(
        mut host: SimulationHost<S>,
        interval: Duration,
    ) -> io::Result<FrameLoopHandle<S>>
    where
        S: Surface + Send + 'static,
    {
        host.start()?;

        let host = Arc::new(Mutex::new(host));
        let stop = Arc::new(AtomicBool::new(false));
        let worker_host = Arc::clone(&host);
        let worker_stop = Arc::clone(&stop);

        let join = thread::Builder::new()
            .name("taskgpt-frame-loop".to_string())
            .spawn(move || run_loop(worker_host, worker_stop, interval))?;

        Ok(FrameLoopHandle {
            host,
            stop,
            join: Some(join),
        })
    }
}

fn run_loop<S: Surface>(
    host: Arc<Mutex<SimulationHost<S>>>,
    stop: Arc<AtomicBool>,
    interval: Duration,
) {
    while !stop.load(Ordering::Acquire) {
        let frame_started = Instant::now();
        {
            let mut host = lock_unpoisoned(&host);
            if !host.is_running() {
                break;
            }
            host.run_frame();
        }
        thread::sleep(interval.saturating_sub(frame_started.elapsed()));
    }
    debug!("frame loop exited");
}

pub struct FrameLoopHandle<S: Surface> {
    host: Arc<Mutex<SimulationHost<S>>>,
    stop: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl<S: Surface> FrameLoopHandle<S> {
    /// Runs `f` with exclusive access to the host, between two frames.
    pub fn with_host<R>(&self, f: impl FnOnce(&mut SimulationHost<S>) -> R) -> R {
        let mut host = lock_unpoisoned(&self.host);
        f(&mut host)
    }

    pub fn is_running(&self) -> bool {
        self.join.is_some() && !self.stop.load(Ordering::Acquire)
    }

    /// Stops the loop, joins the worker thread and stops the host.
    pub fn stop(&mut self) -> io::Result<()> {
        self.stop.store(true, Ordering::Release);
        let Some(join) = self.join.take() else {
            return Ok(());
        };
        if join.join().is_err() {
            return Err(io::Error::other("frame loop worker panicked"));
        }
        lock_unpoisoned(&self.host).stop()
    }
}

impl<S: Surface> Drop for FrameLoopHandle<S> {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
