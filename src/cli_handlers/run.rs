use crate::application::app::Application;
use crate::cli_handlers::CliCommand;
use crate::config::Config;
use crate::core::events::{AppEvent, TimerEvent};
use crate::core::traits::{MonotonicClock, UiRenderer};
use crate::modules::audio::open_chime;
use crate::modules::storage::json_backend::JsonStorageBackend;
use crate::modules::storage::task_store::TaskStore;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use crate::modules::ui::tui::renderer::TuiRenderer;
use anyhow::Result;
use tracing::info;

pub struct RunCommand {
    pub config: Config,
    pub minutes: Option<u32>,
    pub start: bool,
    pub plain: bool,
    pub mute: bool,
}

impl CliCommand for RunCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let mut config = self.config;
        if let Some(minutes) = self.minutes {
            config.default_minutes = minutes;
        }

        let chime = open_chime(config.sound && !self.mute);
        let store = TaskStore::new(Box::new(JsonStorageBackend::new()?));
        let renderer: Box<dyn UiRenderer> = if self.plain {
            Box::new(TerminalRenderer::new())
        } else {
            Box::new(TuiRenderer::new())
        };

        info!(minutes = config.default_minutes, plain = self.plain, "session opened");

        let mut app = Application::new(config, Box::new(MonotonicClock::new()))
            .with_chime(chime)
            .with_task_store(store)
            .with_ui_renderer(renderer);

        app.init()?;
        if self.start {
            app.event_sender()
                .send(AppEvent::Timer(TimerEvent::StartPauseRequested))?;
        }

        // Restore the terminal even when the loop fails.
        let result = app.run();
        app.cleanup()?;
        result
    }
}
