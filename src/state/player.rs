//! Step playback state machine.
//!
//! The player owns the trace, the cursor and at most one repeating timer
//! handle. It never creates timers itself: `play` receives a factory, so the
//! browser passes `gloo::timers::callback::Interval::new` and tests pass a
//! probe. Dropping the handle cancels the timer.

use crate::model::StepTrace;

pub const SLOWEST_INTERVAL_MS: u32 = 200;
pub const MAX_SPEED: u32 = 100;

/// `max(1, 200 - 2 * speed)` for a slider value clamped to `0..=100`.
pub fn interval_ms(speed: u32) -> u32 {
    SLOWEST_INTERVAL_MS
        .saturating_sub(2 * speed.min(MAX_SPEED))
        .max(1)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Loaded,
    Playing,
    Paused,
    Finished,
}

/// Result of advancing the cursor by a tick or a manual step.
#[derive(Debug)]
pub enum Advance<H> {
    /// Cursor moved and steps remain.
    Moved { cursor: usize },
    /// Cursor is at the end of the trace. `released` carries the timer handle
    /// if one was running; the caller decides when to drop it.
    Finished { released: Option<H> },
    Unchanged,
}

#[derive(Debug)]
pub struct StepPlayer<H> {
    trace: StepTrace,
    cursor: usize,
    interval_ms: u32,
    state: PlayerState,
    timer: Option<H>,
}

impl<H> Default for StepPlayer<H> {
    fn default() -> Self {
        Self {
            trace: StepTrace::default(),
            cursor: 0,
            interval_ms: SLOWEST_INTERVAL_MS,
            state: PlayerState::Idle,
            timer: None,
        }
    }
}

impl<H> StepPlayer<H> {
    pub fn trace(&self) -> &StepTrace {
        &self.trace
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.trace.len()
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayerState::Playing
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    #[cfg(test)]
    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Replaces the trace wholesale and rewinds. Any running timer is dropped
    /// before this returns.
    pub fn load(&mut self, trace: StepTrace) {
        self.timer = None;
        self.trace = trace;
        self.cursor = 0;
        self.state = PlayerState::Loaded;
    }

    /// Starts continuous playback. Returns `false` when already playing or
    /// when nothing is left to reveal; in the latter case the player is
    /// `Finished` and no timer was created.
    pub fn play<F>(&mut self, speed: u32, start_timer: F) -> bool
    where
        F: FnOnce(u32) -> H,
    {
        if self.state == PlayerState::Playing {
            return false;
        }
        if self.cursor >= self.trace.len() {
            self.timer = None;
            self.state = PlayerState::Finished;
            return false;
        }
        self.interval_ms = interval_ms(speed);
        // Never hold two handles, even if a caller skipped `pause`.
        self.timer = None;
        self.timer = Some(start_timer(self.interval_ms));
        self.state = PlayerState::Playing;
        true
    }

    /// Timer callback body. Ticks that arrive when not playing are ignored.
    pub fn tick(&mut self) -> Advance<H> {
        if self.state != PlayerState::Playing {
            return Advance::Unchanged;
        }
        if self.cursor < self.trace.len() {
            self.cursor += 1;
        }
        if self.cursor >= self.trace.len() {
            return self.finish();
        }
        Advance::Moved {
            cursor: self.cursor,
        }
    }

    /// Stops the timer and keeps the cursor. A loaded or playing trace ends
    /// up `Paused`; `Idle` and `Finished` are left as they are.
    pub fn pause(&mut self) {
        self.timer = None;
        if matches!(self.state, PlayerState::Loaded | PlayerState::Playing) {
            self.state = PlayerState::Paused;
        }
    }

    /// Reveals one more step without touching the timer, in any state that
    /// has a trace.
    pub fn step_once(&mut self) -> Advance<H> {
        if self.state == PlayerState::Idle || self.cursor >= self.trace.len() {
            return Advance::Unchanged;
        }
        self.cursor += 1;
        if self.cursor >= self.trace.len() {
            return self.finish();
        }
        Advance::Moved {
            cursor: self.cursor,
        }
    }

    /// Drops the trace and any timer.
    pub fn reset(&mut self) {
        self.timer = None;
        self.trace = StepTrace::default();
        self.cursor = 0;
        self.state = PlayerState::Idle;
    }

    fn finish(&mut self) -> Advance<H> {
        self.state = PlayerState::Finished;
        Advance::Finished {
            released: self.timer.take(),
        }
    }
}
