use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Nothing happens on a fixed schedule: the loop blocks on terminal input and
/// wakes up early only for a deadline set with [`set_wakeup`](Self::set_wakeup).
/// The screen is redrawn after every state change.
#[derive(Debug)]
pub(super) struct EventLoop {
    wakeup: Option<Instant>,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            wakeup: None,
            dirty: true, // Initial render is required on startup
        }
    }

    /// Sets (or with `None`, cancels) the next wake-up deadline.
    pub(super) fn set_wakeup(&mut self, at: Option<Instant>) {
        self.wakeup = at;
    }

    #[cfg(test)]
    pub(super) fn wakeup(&self) -> Option<Instant> {
        self.wakeup
    }

    /// Returns the next event.
    ///
    /// Blocks until the wake-up deadline is reached or a crossterm event occurs.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.pending(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Returns the event that is due at `now` without waiting for input.
    fn pending(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(at) = self.wakeup
            && now >= at
        {
            self.wakeup = None;
            self.dirty = true;
            return Some(TuiEvent::Tick);
        }
        if self.dirty {
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    fn timeout(&self, now: Instant) -> Option<Duration> {
        self.wakeup.map(|at| at.saturating_duration_since(now))
    }
}
