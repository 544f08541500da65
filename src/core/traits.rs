use crate::application::state::UiState;
use crate::core::events::AppEvent;
use anyhow::Result;
#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Monotonic millisecond timestamps shared by every timing component
pub trait TimeSource: Send {
    /// Milliseconds since an arbitrary, fixed origin. Never goes backwards.
    fn now_ms(&self) -> u64;
}

/// Production clock backed by [`Instant`]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock. Clones share the same instant, so a test can keep one
/// handle while the code under test owns another.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

#[cfg(test)]
impl TimeSource for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Receives the dial position and readout every frame and on every snap
pub trait RenderSink {
    fn render(&mut self, angle_deg: f64, time_text: &str);
}

/// Plays the completion chime
pub trait ChimeBackend: Send {
    /// Start the chime. Returns as soon as playback is queued.
    fn play_chime(&mut self) -> Result<()>;

    /// Whether this backend actually produces sound
    fn is_audible(&self) -> bool {
        true
    }
}

/// Backend used when audio is muted or no output device exists
pub struct SilentChime;

impl ChimeBackend for SilentChime {
    fn play_chime(&mut self) -> Result<()> {
        Ok(())
    }

    fn is_audible(&self) -> bool {
        false
    }
}

/// Abstraction for persistent key-value storage
pub trait StorageBackend: Send {
    /// Read the raw value stored under `key`
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// Abstraction for UI rendering
pub trait UiRenderer: Send {
    /// Initialize the UI (setup terminal, etc.)
    fn init(&mut self) -> Result<()>;

    /// Cleanup the UI (restore terminal, etc.)
    fn cleanup(&mut self) -> Result<()>;

    /// Render current state
    fn render(&mut self, state: &UiState) -> Result<()>;

    /// Poll for user input (non-blocking)
    /// Returns events generated from user input
    fn poll_input(&mut self, state: &UiState) -> Result<Vec<AppEvent>>;
}
