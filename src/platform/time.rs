//! Fixed-rate tick scheduling and cancellable delays

use crate::consts::MAX_SUBSTEPS;

/// Longest frame accepted by the accumulator (seconds)
const MAX_FRAME_DT: f32 = 0.25;

/// Turns variable frame time into whole simulation ticks
#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f32,
    step: f32,
}

impl FixedStep {
    pub fn new(rate_hz: f32) -> Self {
        Self {
            accumulator: 0.0,
            step: 1.0 / rate_hz,
        }
    }

    /// Seconds per tick
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Change the tick rate, keeping accumulated time
    pub fn set_rate(&mut self, rate_hz: f32) {
        if rate_hz > 0.0 {
            self.step = 1.0 / rate_hz;
        }
    }

    /// Add frame time and return how many ticks to run now.
    ///
    /// At most `MAX_SUBSTEPS` ticks per frame; time beyond that is dropped.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);
        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.step);
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// State of a delay after polling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayStatus {
    Waiting,
    Done,
    Cancelled,
}

/// A pause the frame loop polls instead of sleeping
#[derive(Debug, Clone, PartialEq)]
pub struct Delay {
    remaining_ms: f32,
    cancelled: bool,
}

impl Delay {
    pub fn from_millis(ms: u64) -> Self {
        Self {
            remaining_ms: ms as f32,
            cancelled: false,
        }
    }

    /// Count down by `frame_dt` seconds. A quit request cancels the delay.
    pub fn poll(&mut self, frame_dt: f32, quit: bool) -> DelayStatus {
        if quit {
            self.cancelled = true;
        }
        if self.cancelled {
            return DelayStatus::Cancelled;
        }
        self.remaining_ms -= frame_dt.max(0.0) * 1000.0;
        if self.remaining_ms <= 0.0 {
            DelayStatus::Done
        } else {
            DelayStatus::Waiting
        }
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms.max(0.0).ceil() as u32
    }
}
