mod config;
mod run;
mod tasks;

pub use config::ConfigCommand;
pub use run::RunCommand;
pub use tasks::{AddCommand, DoneCommand, TasksCommand};

use crate::cli::Commands;
use crate::config::Config;
use anyhow::Result;

/// Every CLI command implements this trait.
///
/// Commands own their arguments and are consumed on execution; they run exactly once.
pub trait CliCommand {
    fn execute(self: Box<Self>) -> Result<()>;
}

/// Converts a parsed [`Commands`] variant into a boxed [`CliCommand`] ready to execute.
pub fn from_cli(cmd: Commands, config: Config) -> Box<dyn CliCommand> {
    match cmd {
        Commands::Run {
            minutes,
            start,
            plain,
            mute,
        } => Box::new(RunCommand {
            config,
            minutes,
            start,
            plain,
            mute,
        }),
        Commands::Add { text } => Box::new(AddCommand {
            text: text.join(" "),
        }),
        Commands::Tasks => Box::new(TasksCommand),
        Commands::Done { index } => Box::new(DoneCommand { index }),
        Commands::Config => Box::new(ConfigCommand { config }),
    }
}
