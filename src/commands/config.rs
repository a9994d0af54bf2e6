use colored::*;
use eyre::Result;

use crate::cli::{ConfigAction, OutputFormat};
use crate::config::Config;

pub fn run(action: ConfigAction, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Show { format } => show(OutputFormat::resolve(format), config),
        ConfigAction::Path => {
            println!("{}", Config::default_path().display());
            Ok(())
        }
    }
}

fn show(format: OutputFormat, config: &Config) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(config)?);
        }
        OutputFormat::Text => {
            println!("{}", "evenc Configuration".bold());
            println!();

            println!("  log_level: {}", config.log_level.as_filter());
            println!("  flush: {}", serde_yaml::to_string(&config.flush)?.trim());
            println!();

            println!("{}:", "sink".cyan());
            println!("  kind: {}", serde_yaml::to_string(&config.sink.kind)?.trim());
            println!("  path: {}", config.sink.path.display());
            println!("  newline: {}", config.sink.newline);
        }
    }

    Ok(())
}
