//! Drives the generator one step per tick and repaints in between

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::bail;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::generator::{MazeGenerator, StepOutcome};
use crate::render::{Renderer, Surface};

/// Source of the repeating tick
pub trait Timer {
    /// Block until the next tick is due
    fn wait(&mut self, interval: Duration);
}

/// Wall-clock timer that sleeps the current thread
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepTimer;

impl Timer for SleepTimer {
    fn wait(&mut self, interval: Duration) {
        thread::sleep(interval);
    }
}

/// Shared flag for halting a [Scheduler] from elsewhere, e.g. a signal handler
#[derive(Debug, Default, Clone)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Result of a single [Scheduler::tick]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Frame painted and generator stepped; more ticks follow
    Continued(StepOutcome),
    /// Generator finished during this tick
    Completed,
    /// Halted through the [CancelToken]
    Cancelled,
    /// Scheduler had already finished; nothing was done
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Pending,
    Ticking,
    Completed,
    Cancelled,
}

/// Repeating paint-then-step task with completion notification
pub struct Scheduler<'a> {
    interval: Duration,
    status: Status,
    cancel: CancelToken,
    on_complete: Option<Box<dyn FnOnce(bool) + 'a>>,
}

impl<'a> Scheduler<'a> {
    /// `on_complete` is called once, with `true`, when the maze is finished.
    /// It is never called if the scheduler is cancelled first.
    pub fn new(interval: Duration, on_complete: impl FnOnce(bool) + 'a) -> Self {
        Self {
            interval,
            status: Status::Pending,
            cancel: CancelToken::default(),
            on_complete: Some(Box::new(on_complete)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Handle that cancels this scheduler
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Whether further ticks will do anything
    pub fn is_active(&self) -> bool {
        matches!(self.status, Status::Pending | Status::Ticking)
    }

    /// Take the first step synchronously, before any tick
    ///
    /// If that step already finishes the maze, completion is signalled here
    /// and ticking never starts. Calling this twice is an error.
    pub fn start<R: Rng>(
        &mut self,
        generator: &mut MazeGenerator<R>,
    ) -> anyhow::Result<TickOutcome> {
        if self.status != Status::Pending {
            bail!("Scheduler already started");
        }
        if self.check_cancelled() {
            return Ok(TickOutcome::Cancelled);
        }
        info!(start = ?generator.position(), interval = ?self.interval, "Starting maze generation");

        match generator.step() {
            StepOutcome::Complete => {
                self.complete();
                Ok(TickOutcome::Completed)
            }
            outcome => {
                self.status = Status::Ticking;
                Ok(TickOutcome::Continued(outcome))
            }
        }
    }

    /// Paint the current grid, then step the generator
    ///
    /// On the tick where the generator completes, the callback fires and the
    /// scheduler stops; nothing is painted after that.
    pub fn tick<R: Rng, S: Surface + ?Sized>(
        &mut self,
        generator: &mut MazeGenerator<R>,
        renderer: &Renderer,
        surface: &mut S,
    ) -> anyhow::Result<TickOutcome> {
        match self.status {
            Status::Pending => bail!("Scheduler must be started before ticking"),
            Status::Completed => return Ok(TickOutcome::Stopped),
            Status::Cancelled => return Ok(TickOutcome::Cancelled),
            Status::Ticking => (),
        }
        if self.check_cancelled() {
            return Ok(TickOutcome::Cancelled);
        }

        renderer.paint_all(surface, generator.grid());
        surface.present()?;

        match generator.step() {
            StepOutcome::Complete => {
                self.complete();
                Ok(TickOutcome::Completed)
            }
            outcome => Ok(TickOutcome::Continued(outcome)),
        }
    }

    /// Run to completion or cancellation, waiting `interval` between ticks
    ///
    /// The background is painted on entry while the scheduler is still
    /// active, and the first step is taken if [Self::start] was not called.
    pub fn run<R: Rng, S: Surface + ?Sized, T: Timer + ?Sized>(
        &mut self,
        generator: &mut MazeGenerator<R>,
        renderer: &Renderer,
        surface: &mut S,
        timer: &mut T,
    ) -> anyhow::Result<TickOutcome> {
        if self.is_active() {
            renderer.paint_background(surface);
        }
        if self.status == Status::Pending {
            self.start(generator)?;
        }

        let mut ticks = 0usize;
        loop {
            match self.status {
                Status::Completed => return Ok(TickOutcome::Completed),
                Status::Cancelled => return Ok(TickOutcome::Cancelled),
                Status::Pending | Status::Ticking => (),
            }
            timer.wait(self.interval);
            ticks += 1;
            match self.tick(generator, renderer, surface)? {
                TickOutcome::Continued(_) => continue,
                outcome => {
                    debug!(ticks, ?outcome, "Scheduler finished");
                    return Ok(outcome);
                }
            }
        }
    }

    fn check_cancelled(&mut self) -> bool {
        if self.cancel.is_cancelled() {
            if self.status != Status::Cancelled {
                warn!("Maze generation cancelled");
            }
            self.status = Status::Cancelled;
            self.on_complete = None;
        }
        self.status == Status::Cancelled
    }

    fn complete(&mut self) {
        self.status = Status::Completed;
        if let Some(on_complete) = self.on_complete.take() {
            info!("Maze generation complete");
            on_complete(true);
        }
    }
}
