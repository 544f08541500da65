use crate::application::handlers::HandlerContext;
use crate::application::handlers::task_handler::TaskHandler;
use crate::application::handlers::timer_handler::TimerHandler;
use crate::application::handlers::ui_handler::UiHandler;
use crate::application::state::AppState;
use crate::config::Config;
use crate::core::events::*;
use crate::core::traits::*;
use crate::modules::storage::task_store::TaskStore;
use crate::modules::timer::completion::CompletionNotifier;
use crate::modules::timer::controller::PlaybackController;
use anyhow::Result;
use crossbeam_channel::bounded;
use std::time::Duration;
use tracing::{debug, info};

/// Main application orchestrator
///
/// Everything runs on one thread: user input, frame callbacks and completion
/// notices all pass through the same event queue, so no two handlers ever
/// touch the timer at once.
pub struct Application {
    state: AppState,
    event_tx: EventSender,
    event_rx: EventReceiver,

    controller: PlaybackController,
    notifier: CompletionNotifier,
    clock: Box<dyn TimeSource>,

    // Module references
    task_store: Option<TaskStore>,
    ui_renderer: Option<Box<dyn UiRenderer>>,

    timer_handler: TimerHandler,
    task_handler: TaskHandler,
    ui_handler: UiHandler,

    frame_interval: Duration,
    running: bool,
}

impl Application {
    pub fn new(config: Config, clock: Box<dyn TimeSource>) -> Self {
        let (tx, rx) = bounded(256);
        let controller = PlaybackController::new(config.default_minutes, clock.now_ms());

        Self {
            frame_interval: Duration::from_millis(config.frame_interval_ms),
            state: AppState::new(&config),
            event_tx: tx,
            event_rx: rx,
            controller,
            notifier: CompletionNotifier::new(Box::new(SilentChime)),
            clock,
            task_store: None,
            ui_renderer: None,
            timer_handler: TimerHandler,
            task_handler: TaskHandler,
            ui_handler: UiHandler,
            running: false,
        }
    }

    /// Set the chime played on completion
    pub fn with_chime(mut self, chime: Box<dyn ChimeBackend>) -> Self {
        self.state.ui.sound = chime.is_audible();
        self.notifier = CompletionNotifier::new(chime);
        self
    }

    /// Set the task store
    pub fn with_task_store(mut self, store: TaskStore) -> Self {
        self.task_store = Some(store);
        self
    }

    /// Set the UI renderer
    pub fn with_ui_renderer(mut self, renderer: Box<dyn UiRenderer>) -> Self {
        self.ui_renderer = Some(renderer);
        self
    }

    /// Get event sender (for modules to emit events)
    pub fn event_sender(&self) -> EventSender {
        self.event_tx.clone()
    }

    /// Get current state (read-only)
    #[cfg(test)]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Initialize the application
    pub fn init(&mut self) -> Result<()> {
        // Paint the initial dial before the first frame
        self.controller.render_current(&mut self.state.ui.dial);
        self.state.ui.sync_timer(&self.controller);

        if let Some(store) = &self.task_store {
            let tasks = store.load();
            debug!(count = tasks.len(), "tasks loaded");
            self.event_tx
                .send(AppEvent::Tasks(TaskEvent::Loaded { tasks }))?;
        }

        // Initialize UI
        if let Some(ui) = &mut self.ui_renderer {
            ui.init()?;
        }

        self.running = true;
        Ok(())
    }

    /// Run the main event loop
    pub fn run(&mut self) -> Result<()> {
        info!(minutes = self.controller.selected_minutes(), "event loop started");

        while self.is_running() {
            self.step()?;
            std::thread::sleep(self.frame_interval);
        }

        info!("event loop stopped");
        Ok(())
    }

    /// One pass of the loop: input, frame, notices, render.
    pub fn step(&mut self) -> Result<()> {
        self.process_events()?;

        // Poll UI for input
        if let Some(ui) = &mut self.ui_renderer {
            for event in ui.poll_input(&self.state.ui)? {
                self.event_tx.send(event)?;
            }
        }

        // Queued behind the input, so a pause pressed this pass wins.
        if self.controller.pending_frame().is_some() {
            self.event_tx.send(AppEvent::Timer(TimerEvent::FrameElapsed))?;
        }
        self.process_events()?;

        if let Some(message) = self.notifier.poll(self.clock.now_ms()) {
            self.event_tx.send(AppEvent::Ui(UiEvent::NoticeRaised {
                message: message.to_string(),
            }))?;
            self.process_events()?;
        }

        // Render UI with current state
        if let Some(ui) = &mut self.ui_renderer {
            ui.render(&self.state.ui)?;
        }

        Ok(())
    }

    /// Process events once without entering the main loop
    #[cfg(test)]
    pub fn run_once(&mut self) -> Result<()> {
        self.process_events()
    }

    /// Process all pending events in the queue
    fn process_events(&mut self) -> Result<()> {
        // Drain all events currently in queue
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event)?;
        }
        Ok(())
    }

    /// Handle a single event
    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        // Update state based on event
        self.state.apply_event(&event);

        let mut ctx = HandlerContext {
            state: &mut self.state,
            event_tx: &self.event_tx,
            controller: &mut self.controller,
            notifier: &mut self.notifier,
            clock: self.clock.as_ref(),
            task_store: &self.task_store,
        };

        // Route event to appropriate handler
        match &event {
            AppEvent::Timer(te) => self.timer_handler.handle(te, &mut ctx)?,
            AppEvent::Tasks(te) => self.task_handler.handle(te, &mut ctx)?,
            AppEvent::Ui(ue) => self.ui_handler.handle(ue, &mut ctx)?,
            AppEvent::Shutdown => {
                self.running = false;
            }
        }

        Ok(())
    }

    /// Cleanup resources
    pub fn cleanup(&mut self) -> Result<()> {
        // Cleanup UI
        if let Some(ui) = &mut self.ui_renderer {
            ui.cleanup()?;
        }

        Ok(())
    }
}
