pub mod task_handler;
pub mod timer_handler;
pub mod ui_handler;

use crate::application::state::AppState;
use crate::core::events::{AppEvent, EventSender, TimerEvent};
use crate::core::traits::TimeSource;
use crate::modules::storage::task_store::TaskStore;
use crate::modules::timer::completion::CompletionNotifier;
use crate::modules::timer::controller::PlaybackController;
use anyhow::Result;

/// All dependencies that event handlers need to do their work.
///
/// Passed by `&mut` into each handler method, giving handlers access to
/// shared resources without coupling them to the `Application` struct itself.
pub struct HandlerContext<'a> {
    pub state: &'a mut AppState,
    pub event_tx: &'a EventSender,
    pub controller: &'a mut PlaybackController,
    pub notifier: &'a mut CompletionNotifier,
    pub clock: &'a dyn TimeSource,
    pub task_store: &'a Option<TaskStore>,
}

impl<'a> HandlerContext<'a> {
    pub fn now(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Fire the one-shot completion effects and announce them.
    pub fn signal_completion(&mut self, now: u64) -> Result<()> {
        if self.notifier.fire(now) {
            self.event_tx.send(AppEvent::Timer(TimerEvent::Completed))?;
        }
        Ok(())
    }

    /// Refresh the rendered timer fields after a controller transition.
    pub fn sync_timer_view(&mut self) {
        self.state.ui.sync_timer(self.controller);
    }
}
