//! Spring-smoothed sweep needle.
//!
//! The needle chases the countdown's target angle through a damped
//! mass-spring integrated once per frame. It only affects what is drawn; the
//! countdown never reads it back.

use crate::utils::clamp_degrees;

/// Spring constant (1/s²)
pub const STIFFNESS: f64 = 180.0;

/// Velocity damping (1/s). Slightly under critical for a quick settle.
pub const DAMPING: f64 = 24.0;

const MIN_STEP_SECS: f64 = 0.001;
const MAX_STEP_SECS: f64 = 0.05;

/// Step used when two frames carry the same timestamp
const NOMINAL_STEP_SECS: f64 = 0.016;

#[derive(Debug, Clone, PartialEq)]
pub struct SweepAnimationState {
    display_angle_deg: f64,
    velocity_deg_per_sec: f64,
    last_frame_timestamp: u64,
}

impl SweepAnimationState {
    pub fn new(now: u64) -> Self {
        Self {
            display_angle_deg: 0.0,
            velocity_deg_per_sec: 0.0,
            last_frame_timestamp: now,
        }
    }

    /// Advance one frame toward `target_deg` and return the new angle.
    pub fn step(&mut self, now: u64, target_deg: f64) -> f64 {
        let dt = frame_step_secs(self.last_frame_timestamp, now);
        self.last_frame_timestamp = now;

        let accel = (target_deg - self.display_angle_deg) * STIFFNESS
            - self.velocity_deg_per_sec * DAMPING;
        self.velocity_deg_per_sec += accel * dt;
        self.display_angle_deg = clamp_degrees(self.display_angle_deg + self.velocity_deg_per_sec * dt);

        self.display_angle_deg
    }

    /// Jump straight to `target_deg` and drop all momentum.
    pub fn snap_to(&mut self, target_deg: f64, now: u64) {
        self.display_angle_deg = clamp_degrees(target_deg);
        self.velocity_deg_per_sec = 0.0;
        self.last_frame_timestamp = now;
    }

    pub fn angle_deg(&self) -> f64 {
        self.display_angle_deg
    }

    #[cfg(test)]
    pub fn velocity(&self) -> f64 {
        self.velocity_deg_per_sec
    }

    #[cfg(test)]
    pub fn last_frame_timestamp(&self) -> u64 {
        self.last_frame_timestamp
    }
}

/// Simulation step in seconds for a frame delta, bounded to keep the
/// integration stable after long stalls.
fn frame_step_secs(last: u64, now: u64) -> f64 {
    if now == last {
        return NOMINAL_STEP_SECS;
    }
    let delta_ms = now as f64 - last as f64;
    (delta_ms / 1000.0).clamp(MIN_STEP_SECS, MAX_STEP_SECS)
}
