//! Countdown model.
//!
//! Pure wall-clock state: remaining time is always recomputed from an absolute
//! end timestamp, so dropped or throttled frames never accumulate error.

use crate::utils::minutes_to_ms;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CountdownError {
    #[error("countdown is already running")]
    AlreadyRunning,

    #[error("no time remaining")]
    NothingRemaining,

    #[error("countdown is not running")]
    NotRunning,

    #[error("duration cannot change while running")]
    Running,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownState {
    duration_ms: u64,
    remaining_ms: u64,
    running: bool,
    start_timestamp: u64,
    end_timestamp: u64,
}

impl CountdownState {
    pub fn new(minutes: u32) -> Self {
        let duration_ms = minutes_to_ms(minutes);
        Self {
            duration_ms,
            remaining_ms: duration_ms,
            running: false,
            start_timestamp: 0,
            end_timestamp: 0,
        }
    }

    /// Load a fresh duration. Both duration and remaining time are replaced.
    pub fn set_duration(&mut self, minutes: u32) -> Result<(), CountdownError> {
        if self.running {
            return Err(CountdownError::Running);
        }
        self.duration_ms = minutes_to_ms(minutes);
        self.remaining_ms = self.duration_ms;
        Ok(())
    }

    /// Start (or resume) counting from `now`.
    pub fn begin(&mut self, now: u64) -> Result<(), CountdownError> {
        if self.running {
            return Err(CountdownError::AlreadyRunning);
        }
        if self.remaining_ms == 0 {
            return Err(CountdownError::NothingRemaining);
        }
        self.running = true;
        self.start_timestamp = now;
        self.end_timestamp = now.saturating_add(self.remaining_ms);
        Ok(())
    }

    /// Recompute remaining time. Returns `true` once zero is reached.
    pub fn tick(&mut self, now: u64) -> Result<bool, CountdownError> {
        if !self.running {
            return Err(CountdownError::NotRunning);
        }
        self.remaining_ms = self.end_timestamp.saturating_sub(now).min(self.duration_ms);
        Ok(self.remaining_ms == 0)
    }

    /// Stop counting; remaining time keeps its last ticked value.
    pub fn suspend(&mut self) {
        self.running = false;
    }

    /// Force the completed state.
    pub fn finish(&mut self) {
        self.running = false;
        self.remaining_ms = 0;
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start_timestamp(&self) -> u64 {
        self.start_timestamp
    }

    pub fn end_timestamp(&self) -> u64 {
        self.end_timestamp
    }

    /// Elapsed share of the duration in `[0, 1]`; zero for an empty duration.
    pub fn progress_fraction(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        let elapsed = self.duration_ms.saturating_sub(self.remaining_ms);
        (elapsed as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    pub fn target_angle_deg(&self) -> f64 {
        self.progress_fraction() * 360.0
    }
}

impl Default for CountdownState {
    fn default() -> Self {
        Self::new(crate::utils::DEFAULT_MINUTES)
    }
}
