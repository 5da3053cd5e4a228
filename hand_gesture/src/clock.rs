//! Tick clocks.
//!
//! Components never read the wall clock themselves: every update borrows a
//! [`Clock`] and asks it for the delta since the previous tick and the time
//! elapsed since the session began.

use std::time::Instant;

/// Delta used before the first real tick (one 30 fps frame).
pub const INITIAL_DELTA: f64 = 0.033;

/// Source of tick timing, in seconds.
pub trait Clock {
    /// Seconds between the previous tick and the current one.
    fn delta(&self) -> f64;
    /// Seconds since the clock started, as of the current tick.
    fn elapsed(&self) -> f64;
}

// ════════════════════════════════════════════════════════════════════════════
// FrameClock: wall clock advanced once per video frame
// ════════════════════════════════════════════════════════════════════════════

/// Monotonic clock advanced explicitly by [`FrameClock::tick`].
#[derive(Debug, Clone)]
pub struct FrameClock {
    start:   Instant,
    current: Instant,
    delta:   f64,
    elapsed: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        FrameClock { start: now, current: now, delta: INITIAL_DELTA, elapsed: 0.0 }
    }

    /// Advance to "now" and return the new delta.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        self.delta   = now.duration_since(self.current).as_secs_f64();
        self.current = now;
        self.elapsed = now.duration_since(self.start).as_secs_f64();
        self.delta
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FrameClock {
    fn delta(&self) -> f64 { self.delta }
    fn elapsed(&self) -> f64 { self.elapsed }
}

// ════════════════════════════════════════════════════════════════════════════
// ManualClock: scripted time for replays and tests
// ════════════════════════════════════════════════════════════════════════════

/// Clock whose ticks are supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualClock {
    delta:   f64,
    elapsed: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock { delta: INITIAL_DELTA, elapsed: 0.0 }
    }

    /// Advance by `dt` seconds; `dt` becomes the current delta.
    pub fn advance(&mut self, dt: f64) {
        self.delta    = dt;
        self.elapsed += dt;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn delta(&self) -> f64 { self.delta }
    fn elapsed(&self) -> f64 { self.elapsed }
}
