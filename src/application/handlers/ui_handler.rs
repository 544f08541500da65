use crate::application::handlers::HandlerContext;
use crate::core::events::{AppEvent, UiEvent};
use anyhow::Result;

/// Handles [`UiEvent`] variants that require side effects.
///
/// Pure state updates (selection, text input, notices, messages) are already
/// handled by `AppState::apply_event`.
pub struct UiHandler;

impl UiHandler {
    pub fn handle(&self, event: &UiEvent, ctx: &mut HandlerContext) -> Result<()> {
        if let UiEvent::QuitRequested = event {
            ctx.event_tx.send(AppEvent::Shutdown)?;
        }
        Ok(())
    }
}
