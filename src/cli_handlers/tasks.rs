use crate::cli_handlers::CliCommand;
use crate::modules::storage::json_backend::JsonStorageBackend;
use crate::modules::storage::task_store::TaskStore;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use crate::utils::APP_NAME;
use anyhow::Result;

fn open_store() -> Result<TaskStore> {
    Ok(TaskStore::new(Box::new(JsonStorageBackend::new()?)))
}

pub struct AddCommand {
    pub text: String,
}

impl CliCommand for AddCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let store = open_store()?;
        let ui = TerminalRenderer::new();

        let before = store.load().len();
        let tasks = store.add(&self.text)?;

        if tasks.len() == before {
            ui.print_error("Task text is empty");
        } else {
            ui.print_message(&format!("✓ Added task {}: {}", tasks.len(), self.text.trim()));
        }

        Ok(())
    }
}

pub struct TasksCommand;

impl CliCommand for TasksCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let store = open_store()?;
        TerminalRenderer::new().print_task_list(&store.load());
        Ok(())
    }
}

pub struct DoneCommand {
    /// 1-based, as printed by `tasks`
    pub index: usize,
}

impl CliCommand for DoneCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let store = open_store()?;
        let ui = TerminalRenderer::new();
        let tasks = store.load();

        let Some(task) = self.index.checked_sub(1).and_then(|i| tasks.get(i)) else {
            ui.print_error(&format!(
                "No task #{}. Run '{} tasks' to see the list.",
                self.index, APP_NAME
            ));
            return Ok(());
        };

        let task = task.clone();
        store.delete(self.index - 1)?;
        ui.print_message(&format!("✓ Done: {}", task));

        Ok(())
    }
}
