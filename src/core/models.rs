use serde::{Deserialize, Serialize};
use std::fmt;

/// Observable playback state of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    /// Full duration loaded, never started since the last reset
    #[default]
    Idle,
    Running,
    /// Stopped part-way; remaining time is frozen
    Paused,
    /// Reached zero; stays here until reset or a preset is chosen
    Completed,
}

impl TimerPhase {
    pub fn symbol(self) -> &'static str {
        match self {
            TimerPhase::Idle => "■",
            TimerPhase::Running => "▶",
            TimerPhase::Paused => "⏸",
            TimerPhase::Completed => "✓",
        }
    }

    pub fn is_running(self) -> bool {
        self == TimerPhase::Running
    }
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimerPhase::Idle => "Ready",
            TimerPhase::Running => "Running",
            TimerPhase::Paused => "Paused",
            TimerPhase::Completed => "Complete",
        };
        write!(f, "{}", label)
    }
}

/// Values last handed to the render sink
#[derive(Debug, Clone, PartialEq)]
pub struct DialFrame {
    pub angle_deg: f64,
    pub time_text: String,
}

impl Default for DialFrame {
    fn default() -> Self {
        Self {
            angle_deg: 0.0,
            time_text: "00:00".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_running_phase_is_running() {
        assert!(TimerPhase::Running.is_running());
        assert!(!TimerPhase::Idle.is_running());
        assert!(!TimerPhase::Paused.is_running());
        assert!(!TimerPhase::Completed.is_running());
    }

    #[test]
    fn phase_serializes_lowercase() {
        let json = serde_json::to_string(&TimerPhase::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }
}
