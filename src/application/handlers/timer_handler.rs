use crate::application::handlers::HandlerContext;
use crate::core::events::{AppEvent, TimerEvent};
use crate::modules::timer::controller::FrameOutcome;
use anyhow::Result;

/// Handles all [`TimerEvent`] variants.
///
/// Responsible for:
/// - Feeding user requests and display frames into the playback controller
/// - Firing completion side effects exactly once per completion
/// - Announcing transitions so `AppState::apply_event` can update messages
pub struct TimerHandler;

impl TimerHandler {
    pub fn handle(&self, event: &TimerEvent, ctx: &mut HandlerContext) -> Result<()> {
        match event {
            TimerEvent::PresetSelected { minutes } => {
                let now = ctx.now();
                ctx.controller.select_preset(*minutes, now, &mut ctx.state.ui.dial);
                ctx.notifier.rearm();
                ctx.event_tx.send(AppEvent::Timer(TimerEvent::Reset {
                    duration_ms: ctx.controller.countdown().duration_ms(),
                }))?;
            }

            TimerEvent::StartPauseRequested => {
                let now = ctx.now();
                let was_running = ctx.controller.phase().is_running();

                if ctx.controller.toggle(now, &mut ctx.state.ui.dial) {
                    ctx.signal_completion(now)?;
                } else if was_running {
                    ctx.event_tx.send(AppEvent::Timer(TimerEvent::Paused {
                        remaining_ms: ctx.controller.countdown().remaining_ms(),
                    }))?;
                } else if ctx.controller.phase().is_running() {
                    ctx.notifier.rearm();
                    ctx.event_tx.send(AppEvent::Timer(TimerEvent::Started))?;
                }
            }

            TimerEvent::ResetRequested => {
                let now = ctx.now();
                ctx.controller.reset(now, &mut ctx.state.ui.dial);
                ctx.notifier.rearm();
                ctx.event_tx.send(AppEvent::Timer(TimerEvent::Reset {
                    duration_ms: ctx.controller.countdown().duration_ms(),
                }))?;
            }

            TimerEvent::FrameElapsed => {
                let now = ctx.now();
                if ctx.controller.frame_elapsed(now, &mut ctx.state.ui.dial) == FrameOutcome::Completed {
                    ctx.signal_completion(now)?;
                }
            }

            // Announcements only update state, already handled by AppState::apply_event.
            TimerEvent::Started
            | TimerEvent::Paused { .. }
            | TimerEvent::Reset { .. }
            | TimerEvent::Completed => {}
        }

        ctx.sync_timer_view();
        Ok(())
    }
}
