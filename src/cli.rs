use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::config::SinkKind;

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "evenc",
    about = "Encode timestamped events as compact JSON",
    version = env!("GIT_DESCRIBE"),
    after_help = "Logs are written to: ~/.local/share/evenc/logs/evenc.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to evenc.yaml config file")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode one event to a sink
    Emit {
        /// Event message (omitted from the record when empty)
        #[arg(default_value = "")]
        message: String,

        /// Event time as RFC 3339 (defaults to now)
        #[arg(long, conflicts_with = "no_time")]
        time: Option<String>,

        /// Leave the time field out
        #[arg(long)]
        no_time: bool,

        /// Sink to write to (overrides config)
        #[arg(long, value_enum)]
        sink: Option<SinkKind>,

        /// File to append to; selects the file sink unless --sink is given
        #[arg(long)]
        path: Option<PathBuf>,

        /// Terminate the record with a newline
        #[arg(long)]
        newline: bool,

        /// Fail if syncing the sink fails
        #[arg(long)]
        strict_flush: bool,
    },

    /// Decode and print encoded events
    Show {
        /// File to read (defaults to stdin)
        path: Option<PathBuf>,

        /// Only show the last N events
        #[arg(short = 'n', long)]
        last: Option<usize>,

        /// Output format (text, json or yaml; default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },
    /// Print the per-user config file path
    Path,
}
