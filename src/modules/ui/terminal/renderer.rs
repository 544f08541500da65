use crate::application::state::UiState;
use crate::core::events::AppEvent;
use crate::core::traits::UiRenderer;
use crate::modules::ui::keymap::map_key;
use crate::modules::ui::progress_formatter::{progress_bar, progress_percentage};
use anyhow::Result;
use crossterm::{
    ExecutableCommand, cursor,
    event::{self, Event, KeyEventKind},
    terminal::{self, ClearType},
};
use std::io::{Write, stdout};
use std::time::Duration;

const BAR_WIDTH: usize = 24;

/// Single-line renderer for terminals where the full dial does not fit.
pub struct TerminalRenderer {
    initialized: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self { initialized: false }
    }

    pub fn print_message(&self, message: &str) {
        println!("{}", message);
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("Error: {}", message);
    }

    pub fn print_task_list(&self, tasks: &[String]) {
        if tasks.is_empty() {
            println!("No tasks.");
            return;
        }
        for (index, task) in tasks.iter().enumerate() {
            println!("{:3}. {}", index + 1, task);
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// The text drawn on the status line for `state`.
pub fn status_line(state: &UiState) -> String {
    if let Some(notice) = &state.notice {
        return format!("{} [Enter: OK]", notice);
    }

    if state.input_active {
        return format!("New task: {}_ [Enter: Save | Esc: Cancel]", state.input_buffer);
    }

    let mut line = format!(
        "{} {} {} {:3}% | {}",
        state.phase.symbol(),
        state.dial.time_text,
        progress_bar(state.progress, BAR_WIDTH),
        progress_percentage(state.progress),
        state.status_message,
    );

    if let Some(task) = state.selected_task.and_then(|i| state.tasks.get(i)) {
        line.push_str(&format!(" | Task: {}", task));
    }

    if let Some(error) = &state.error_message {
        line.push_str(&format!(" | ERROR: {}", error));
    }

    line.push_str(&format!(
        " | [Space: {} | R: Reset | Q: Quit]",
        state.button_label
    ));
    line
}

impl UiRenderer for TerminalRenderer {
    fn init(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.initialized = true;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.initialized {
            terminal::disable_raw_mode()?;
            self.initialized = false;
            println!();
        }
        Ok(())
    }

    fn render(&mut self, state: &UiState) -> Result<()> {
        let mut stdout = stdout();

        stdout.execute(cursor::MoveToColumn(0))?;
        stdout.execute(terminal::Clear(ClearType::CurrentLine))?;

        print!("{}", status_line(state));

        stdout.flush()?;
        Ok(())
    }

    fn poll_input(&mut self, state: &UiState) -> Result<Vec<AppEvent>> {
        let mut events = Vec::new();

        if event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    events.extend(map_key(key, state));
                }
            }
        }

        Ok(events)
    }
}
