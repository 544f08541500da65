pub const APP_NAME: &str = "pomodial";

/// Duration selected when nothing else is configured
pub const DEFAULT_MINUTES: u32 = 25;

/// Preset buttons offered out of the box (work, short break, long break)
pub const DEFAULT_PRESETS: &[u32] = &[25, 5, 15];

pub const MS_PER_MINUTE: u64 = 60_000;

/// Convert whole preset minutes into countdown milliseconds.
pub fn minutes_to_ms(minutes: u32) -> u64 {
    u64::from(minutes) * MS_PER_MINUTE
}

/// Clamp a value into the closed dial range `[0, 360]`.
pub fn clamp_degrees(deg: f64) -> f64 {
    deg.clamp(0.0, 360.0)
}
