use clap::{Parser, Subcommand};

use crate::utils::APP_NAME;

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(about = "Terminal pomodoro timer with an animated dial", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Open the interactive timer (default)
    Run {
        /// Session length in minutes (overrides the configured default)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=999))]
        minutes: Option<u32>,

        /// Start counting down immediately
        #[arg(short, long)]
        start: bool,

        /// Use the single-line renderer instead of the full dial
        #[arg(long)]
        plain: bool,

        /// Do not play the completion chime
        #[arg(long)]
        mute: bool,
    },

    /// Add a task to the list
    Add {
        /// Task text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List saved tasks
    Tasks,

    /// Remove a task by its number in the list
    Done {
        /// Task number (1-based, as shown by `tasks`)
        index: usize,
    },

    /// Show the config file location and effective settings, writing defaults if missing
    Config,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run {
            minutes: None,
            start: false,
            plain: false,
            mute: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_runs_the_timer() {
        let cli = Cli::try_parse_from([APP_NAME]).unwrap();
        assert_eq!(cli.command.unwrap_or_default(), Commands::default());
    }

    #[test]
    fn run_flags() {
        let cli = Cli::try_parse_from([APP_NAME, "run", "-m", "5", "--start", "--mute"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Run {
                minutes: Some(5),
                start: true,
                plain: false,
                mute: true,
            })
        );
    }

    #[test]
    fn minutes_out_of_range_rejected() {
        assert!(Cli::try_parse_from([APP_NAME, "run", "--minutes", "0"]).is_err());
        assert!(Cli::try_parse_from([APP_NAME, "run", "--minutes", "1000"]).is_err());
    }

    #[test]
    fn add_joins_words() {
        let cli = Cli::try_parse_from([APP_NAME, "add", "Write", "report"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Add {
                text: vec!["Write".to_string(), "report".to_string()]
            })
        );
        assert!(Cli::try_parse_from([APP_NAME, "add"]).is_err());
    }
}
