use crate::application::handlers::HandlerContext;
use crate::core::events::{AppEvent, TaskEvent, UiEvent};
use anyhow::Result;
use tracing::warn;

/// Handles all [`TaskEvent`] variants.
///
/// Responsible for:
/// - Writing task additions and deletions through the task store
/// - Broadcasting the rewritten list
/// - Reporting write failures in the status line instead of aborting
pub struct TaskHandler;

impl TaskHandler {
    pub fn handle(&self, event: &TaskEvent, ctx: &mut HandlerContext) -> Result<()> {
        let Some(store) = ctx.task_store.as_ref() else {
            return Ok(());
        };

        let (result, message) = match event {
            TaskEvent::AddRequested { text } => (store.add(text), "Task added"),
            TaskEvent::DeleteRequested { index } => (store.delete(*index), "Task removed"),

            // Loaded only updates state, already handled by AppState::apply_event.
            TaskEvent::Loaded { .. } => return Ok(()),
        };

        match result {
            Ok(tasks) => {
                ctx.event_tx.send(AppEvent::Tasks(TaskEvent::Loaded { tasks }))?;
                ctx.event_tx.send(AppEvent::Ui(UiEvent::ShowMessage {
                    message: message.to_string(),
                }))?;
            }
            Err(e) => {
                warn!(error = %e, "task list not saved");
                ctx.event_tx.send(AppEvent::Ui(UiEvent::ShowError {
                    message: format!("Could not save tasks: {}", e),
                }))?;
            }
        }

        Ok(())
    }
}
