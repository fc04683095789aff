use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "modalstack", version, about = "Layered modal navigation in the terminal")]
pub struct Args {
    /// Theme name (e.g., "Catppuccin Latte"); overrides the config file
    #[arg(short, long)]
    pub theme: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the interactive demo (default)
    Demo,
    /// Execute a TOML script of stack operations and print the result of each step
    Replay {
        script: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Args {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Demo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_demo() {
        let args = Args::try_parse_from(["modalstack"]).unwrap();
        assert_eq!(args.command(), Command::Demo);
        assert!(args.theme.is_none());
    }

    #[test]
    fn test_replay_args() {
        let args = Args::try_parse_from([
            "modalstack",
            "--theme",
            "Catppuccin Latte",
            "replay",
            "flows/wizard.toml",
            "--json",
        ])
        .unwrap();
        assert_eq!(args.theme.as_deref(), Some("Catppuccin Latte"));
        assert_eq!(
            args.command(),
            Command::Replay {
                script: PathBuf::from("flows/wizard.toml"),
                json: true,
            }
        );
    }
}
