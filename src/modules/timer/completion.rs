use crate::core::traits::ChimeBackend;
use tracing::{info, warn};

/// Delay between the chime and the blocking acknowledgement, so the final
/// dial state gets painted first
pub const NOTICE_DELAY_MS: u64 = 120;

pub const COMPLETION_MESSAGE: &str = "Session complete. Great work.";

/// One-shot completion side effects: chime now, acknowledgement shortly after.
pub struct CompletionNotifier {
    chime: Box<dyn ChimeBackend>,
    notice_due_at: Option<u64>,
    fired: bool,
}

impl CompletionNotifier {
    pub fn new(chime: Box<dyn ChimeBackend>) -> Self {
        Self {
            chime,
            notice_due_at: None,
            fired: false,
        }
    }

    /// Trigger completion effects. Returns `false` if they already fired
    /// since the last [`rearm`](Self::rearm).
    pub fn fire(&mut self, now: u64) -> bool {
        if self.fired {
            warn!("completion already signalled; ignoring repeat");
            return false;
        }
        self.fired = true;

        if let Err(e) = self.chime.play_chime() {
            warn!(error = %e, "completion chime failed");
        }
        self.notice_due_at = Some(now.saturating_add(NOTICE_DELAY_MS));
        info!(audible = self.chime.is_audible(), "completion fired");
        true
    }

    /// Hand out the acknowledgement message once it is due.
    pub fn poll(&mut self, now: u64) -> Option<&'static str> {
        match self.notice_due_at {
            Some(due) if now >= due => {
                self.notice_due_at = None;
                Some(COMPLETION_MESSAGE)
            }
            _ => None,
        }
    }

    /// Allow the next completion to fire. A notice already scheduled is
    /// still delivered.
    pub fn rearm(&mut self) {
        self.fired = false;
    }

    #[cfg(test)]
    pub fn notice_pending(&self) -> bool {
        self.notice_due_at.is_some()
    }
}
