//! Dial face geometry: tick marks, minute labels and sweep points.
//!
//! Coordinates are canvas units with the origin at the dial center and y
//! pointing up. Dial angles start at 12 o'clock and run clockwise.

pub const TICK_COUNT: usize = 60;
pub const MAJOR_EVERY: usize = 5;

const TICK_RADIUS_RATIO: f64 = 0.47;
const LABEL_RADIUS_RATIO: f64 = 0.49;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMark {
    pub deg: f64,
    pub x: f64,
    pub y: f64,
    pub major: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MinuteLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Position of a dial angle on a circle of `radius`.
pub fn point_on_dial(deg: f64, radius: f64) -> (f64, f64) {
    let rad = deg.to_radians();
    (radius * rad.sin(), radius * rad.cos())
}

pub fn tick_marks(size: f64) -> Vec<TickMark> {
    let radius = size * TICK_RADIUS_RATIO;
    (0..TICK_COUNT)
        .map(|i| {
            let deg = (i * 6) as f64;
            let (x, y) = point_on_dial(deg, radius);
            TickMark {
                deg,
                x,
                y,
                major: i % MAJOR_EVERY == 0,
            }
        })
        .collect()
}

pub fn minute_labels(size: f64) -> Vec<MinuteLabel> {
    let radius = size * LABEL_RADIUS_RATIO;
    (0..TICK_COUNT)
        .step_by(MAJOR_EVERY)
        .map(|i| {
            let (x, y) = point_on_dial((i * 6) as f64, radius);
            MinuteLabel {
                text: i.to_string(),
                x,
                y,
            }
        })
        .collect()
}

/// Points along the swept arc from 12 o'clock to `angle_deg`, one per `step_deg`.
pub fn sweep_arc(angle_deg: f64, radius: f64, step_deg: f64) -> Vec<(f64, f64)> {
    if angle_deg <= 0.0 || step_deg <= 0.0 {
        return Vec::new();
    }
    let steps = (angle_deg / step_deg).ceil() as usize;
    (0..=steps)
        .map(|i| point_on_dial((i as f64 * step_deg).min(angle_deg), radius))
        .collect()
}
