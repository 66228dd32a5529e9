//! Pausable periodic timers.
//!
//! One accumulator model, two firing policies chosen at construction:
//! [`PollTimer`] is pull-checked (`is_usable`/`consume`) inside hot
//! per-tick loops, [`CallbackTimer`] pushes a closure once per elapsed
//! interval. Timers never read the wall clock — owners feed them
//! explicit deltas, which keeps the whole simulation replayable.

use serde::{Deserialize, Serialize};

/// Repeat count meaning "fire forever".
pub const REPEAT_INFINITE: i32 = -1;

/// Pull-checked timer for hot loops.
///
/// Created stopped; `start()` arms it. A paused timer accumulates no
/// elapsed time. Once `remaining_repeats` reaches 0 the timer is inert
/// and its owner may drop it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollTimer {
    interval_ms: u64,
    remaining_repeats: i32,
    elapsed_ms: u64,
    started: bool,
    paused: bool,
}

impl PollTimer {
    /// A stopped timer firing every `interval_ms`, `repeats` times
    /// (`REPEAT_INFINITE` for no limit).
    pub fn create(interval_ms: u64, repeats: i32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            remaining_repeats: repeats,
            elapsed_ms: 0,
            started: false,
            paused: false,
        }
    }

    pub fn start(&mut self) {
        self.started = true;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Terminal: all repeats consumed, never fires again.
    pub fn is_finished(&self) -> bool {
        self.remaining_repeats == 0
    }

    /// Accumulate elapsed time. No-op while stopped, paused, or
    /// finished. Surplus beyond one full interval is discarded, so a
    /// slow stretch of ticks never banks a catch-up burst — the
    /// interval is a cadence ceiling.
    pub fn advance(&mut self, delta_ms: u64) {
        if !self.started || self.paused || self.is_finished() {
            return;
        }
        self.elapsed_ms = (self.elapsed_ms + delta_ms).min(self.interval_ms);
    }

    /// Whether a full interval is banked and the timer may fire.
    pub fn is_usable(&self) -> bool {
        self.started && !self.paused && !self.is_finished() && self.elapsed_ms >= self.interval_ms
    }

    /// Consume one firing: subtracts one interval and decrements the
    /// repeat budget (unless infinite). Call only after `is_usable()`.
    pub fn consume(&mut self) {
        if !self.is_usable() {
            return;
        }
        self.elapsed_ms -= self.interval_ms;
        if self.remaining_repeats > 0 {
            self.remaining_repeats -= 1;
        }
    }
}

/// Push-invoked timer: fires its callback once per elapsed interval.
///
/// Used for low-frequency work outside hot loops — the world clock is a
/// 1-second infinite `CallbackTimer`.
pub struct CallbackTimer {
    interval_ms: u64,
    remaining_repeats: i32,
    elapsed_ms: u64,
    started: bool,
    paused: bool,
    callback: Box<dyn FnMut() + Send>,
}

impl CallbackTimer {
    /// A stopped timer invoking `callback` every `interval_ms`,
    /// `repeats` times (`REPEAT_INFINITE` for no limit).
    pub fn new(interval_ms: u64, repeats: i32, callback: impl FnMut() + Send + 'static) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            remaining_repeats: repeats,
            elapsed_ms: 0,
            started: false,
            paused: false,
            callback: Box::new(callback),
        }
    }

    pub fn start(&mut self) {
        self.started = true;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_repeats == 0
    }

    /// Accumulate elapsed time and fire once per banked interval.
    pub fn advance(&mut self, delta_ms: u64) {
        if !self.started || self.paused || self.is_finished() {
            return;
        }
        self.elapsed_ms += delta_ms;
        while self.elapsed_ms >= self.interval_ms && !self.is_finished() {
            self.elapsed_ms -= self.interval_ms;
            (self.callback)();
            if self.remaining_repeats > 0 {
                self.remaining_repeats -= 1;
            }
        }
    }
}

impl std::fmt::Debug for CallbackTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackTimer")
            .field("interval_ms", &self.interval_ms)
            .field("remaining_repeats", &self.remaining_repeats)
            .field("elapsed_ms", &self.elapsed_ms)
            .field("started", &self.started)
            .field("paused", &self.paused)
            .finish_non_exhaustive()
    }
}

/// Handle to a registered callback timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle(usize);

/// Owns registered callback timers and advances them each tick.
/// Terminal timers are dropped automatically; their slots are reused.
#[derive(Debug, Default)]
pub struct TimerScheduler {
    timers: Vec<Option<CallbackTimer>>,
}

impl TimerScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a timer and return a handle for pause/resume control.
    pub fn register(&mut self, timer: CallbackTimer) -> TimerHandle {
        if let Some(slot) = self.timers.iter().position(Option::is_none) {
            self.timers[slot] = Some(timer);
            return TimerHandle(slot);
        }
        self.timers.push(Some(timer));
        TimerHandle(self.timers.len() - 1)
    }

    /// Advance all registered timers; drop the ones that finished.
    pub fn advance(&mut self, delta_ms: u64) {
        for slot in &mut self.timers {
            if let Some(timer) = slot {
                timer.advance(delta_ms);
                if timer.is_finished() {
                    *slot = None;
                }
            }
        }
    }

    pub fn pause(&mut self, handle: TimerHandle) {
        if let Some(Some(timer)) = self.timers.get_mut(handle.0) {
            timer.pause();
        }
    }

    pub fn resume(&mut self, handle: TimerHandle) {
        if let Some(Some(timer)) = self.timers.get_mut(handle.0) {
            timer.resume();
        }
    }

    /// Drop every registered timer.
    pub fn clear(&mut self) {
        self.timers.clear();
    }
}
