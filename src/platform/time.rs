//! Frame clock
//!
//! Measures real time between loop iterations.

use std::time::Instant;

use crate::consts::MAX_FRAME_DT;

/// Tracks frame timing for the game loop.
pub struct FrameClock {
    startup: Instant,
    last_frame: Instant,
    delta_time: f32,
    frame_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            startup: now,
            last_frame: now,
            delta_time: 0.0,
            frame_count: 0,
        }
    }

    /// Call once per iteration. Returns seconds since the previous call,
    /// clamped so a stall does not produce a huge step.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_time = now
            .duration_since(self.last_frame)
            .as_secs_f32()
            .min(MAX_FRAME_DT);
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time
    }

    #[inline]
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Seconds since the clock was created
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.startup.elapsed().as_secs_f64()
    }

    /// Time spent in the current iteration so far
    #[inline]
    pub fn since_frame_start(&self) -> std::time::Duration {
        self.last_frame.elapsed()
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
