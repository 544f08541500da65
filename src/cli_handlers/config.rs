use crate::cli_handlers::CliCommand;
use crate::config::Config;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use anyhow::Result;
use tracing::info;

pub struct ConfigCommand {
    pub config: Config,
}

impl CliCommand for ConfigCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let ui = TerminalRenderer::new();
        let path = Config::default_path()?;

        let origin = if path.exists() {
            ""
        } else {
            self.config.save_to(&path)?;
            info!(path = %path.display(), "wrote default config");
            " (created with defaults)"
        };
        ui.print_message(&format!("# {}{}", path.display(), origin));
        ui.print_message(&toml::to_string_pretty(&self.config)?);

        Ok(())
    }
}
