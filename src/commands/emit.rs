//! Encode a single event to the configured sink

use chrono::{DateTime, Utc};
use colored::*;
use eyre::{Context, Result};
use std::io;
use std::path::PathBuf;

use crate::config::{Config, SinkKind};
use crate::event::sink::open_append;
use crate::event::{Durable, EncodeError, Encoder, Event, FlushPolicy, Framing};

/// Command-line overrides for `evenc emit`
#[derive(Debug, Default)]
pub struct EmitArgs {
    pub message: String,
    pub time: Option<String>,
    pub no_time: bool,
    pub sink: Option<SinkKind>,
    pub path: Option<PathBuf>,
    pub newline: bool,
    pub strict_flush: bool,
}

pub fn run(args: EmitArgs, config: &Config) -> Result<()> {
    let event = build_event(&args)?;

    let framing = Framing::from_newline(args.newline || config.sink.newline);
    let policy = if args.strict_flush {
        FlushPolicy::Strict
    } else {
        config.flush
    };

    match resolve_sink(&args, config) {
        SinkKind::Stdout => {
            log::debug!("Emitting event to stdout");
            match encode_once(io::stdout().lock(), &event, framing, policy) {
                Err(e) if is_broken_pipe(&e) => {
                    log::debug!("Stdout closed before event was written: {}", e);
                }
                result => result.context("Failed to emit event to stdout")?,
            }
        }
        SinkKind::File => {
            let path = Config::expand_path(args.path.as_ref().unwrap_or(&config.sink.path));
            log::debug!("Emitting event to {}", path.display());

            let file = open_append(&path).context(format!("Failed to open {}", path.display()))?;
            encode_once(file, &event, framing, policy)
                .context(format!("Failed to emit event to {}", path.display()))?;

            println!("{} Wrote event to {}", "✓".green(), path.display());
        }
    }

    Ok(())
}

fn is_broken_pipe(err: &EncodeError) -> bool {
    err.io_error().map(|e| e.kind()) == Some(io::ErrorKind::BrokenPipe)
}

/// `--sink` wins, then `--path` implies a file sink, then the config
fn resolve_sink(args: &EmitArgs, config: &Config) -> SinkKind {
    args.sink
        .or(args.path.as_ref().map(|_| SinkKind::File))
        .unwrap_or(config.sink.kind)
}

fn build_event(args: &EmitArgs) -> Result<Event> {
    if args.no_time {
        return Ok(Event::untimed(&args.message));
    }

    match &args.time {
        Some(raw) => {
            let time = DateTime::parse_from_rfc3339(raw)
                .context(format!("Invalid RFC 3339 time: {}", raw))?
                .with_timezone(&Utc);
            Ok(Event::at(time, &args.message))
        }
        None => Ok(Event::now(&args.message)),
    }
}

fn encode_once<W: Durable>(
    sink: W,
    event: &Event,
    framing: Framing,
    policy: FlushPolicy,
) -> std::result::Result<(), EncodeError> {
    let mut encoder = Encoder::durable(sink).with_framing(framing).with_flush_policy(policy);
    encoder.encode(event)
}
