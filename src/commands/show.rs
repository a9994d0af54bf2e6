//! Decode and print encoded events
//!
//! Accepts records written back to back or one per line.

use eyre::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use crate::cli::OutputFormat;
use crate::event::Event;

pub fn run(path: Option<&Path>, last: Option<usize>, format: OutputFormat) -> Result<()> {
    let events = match path {
        Some(p) => {
            let file = File::open(p).context(format!("Failed to open {}", p.display()))?;
            read_events(BufReader::new(file)).context(format!("Failed to decode events from {}", p.display()))?
        }
        None => read_events(io::stdin().lock()).context("Failed to decode events from stdin")?,
    };

    let start = last.map_or(0, |n| events.len().saturating_sub(n));

    let mut out = io::stdout().lock();
    match write_events(&mut out, &events[start..], format) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            log::debug!("Stdout closed, stopping output");
            Ok(())
        }
        result => result.context("Failed to write events to stdout"),
    }
}

fn write_events<W: Write>(out: &mut W, events: &[Event], format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            for event in events {
                writeln!(out, "{}", event.format_display())?;
            }
        }
        OutputFormat::Json => {
            for event in events {
                writeln!(out, "{}", serde_json::to_string(event)?)?;
            }
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(events).map_err(io::Error::other)?;
            out.write_all(yaml.as_bytes())?;
        }
    }

    out.flush()
}

/// Decode a stream of concatenated JSON event records
pub fn read_events<R: Read>(reader: R) -> Result<Vec<Event>> {
    let mut stream = serde_json::Deserializer::from_reader(reader).into_iter::<Event>();
    let mut events = Vec::new();

    loop {
        let offset = stream.byte_offset();
        match stream.next() {
            Some(Ok(event)) => events.push(event),
            Some(Err(e)) => return Err(e).context(format!("Invalid event record at byte {}", offset)),
            None => break,
        }
    }

    log::debug!("Decoded {} events", events.len());
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_concatenated_records() {
        let data = r#"{"message":"a"}{"time":"2026-01-03T12:00:00Z","message":"b"}{}"#;
        let events = read_events(data.as_bytes()).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].message, "a");
        assert!(events[1].time.is_some());
        assert!(events[2].is_empty());
    }

    #[test]
    fn test_read_newline_delimited_records() {
        let data = "{\"message\":\"a\"}\n{\"message\":\"b\"}\n";
        let events = read_events(data.as_bytes()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].message, "b");
    }

    #[test]
    fn test_write_events_json_lines() {
        let events = read_events(r#"{"message":"a"}{}"#.as_bytes()).unwrap();
        let mut out = Vec::new();
        write_events(&mut out, &events, OutputFormat::Json).unwrap();
        assert_eq!(out, b"{\"message\":\"a\"}\n{}\n");
    }

    #[test]
    fn test_write_events_yaml() {
        let events = read_events(r#"{"message":"a"}"#.as_bytes()).unwrap();
        let mut out = Vec::new();
        write_events(&mut out, &events, OutputFormat::Yaml).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("message: a"));
    }

    #[test]
    fn test_read_empty_input() {
        assert!(read_events(&b""[..]).unwrap().is_empty());
    }

    #[test]
    fn test_read_reports_offset_of_bad_record() {
        let data = r#"{"message":"a"}{"message":7}"#;
        let err = read_events(data.as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).contains("at byte 15"));
    }

    #[test]
    fn test_reencoded_records_match_input() {
        let data = r#"{"time":"2026-01-03T12:00:00.123456789Z","message":"x"}"#;
        let events = read_events(data.as_bytes()).unwrap();
        assert_eq!(serde_json::to_string(&events[0]).unwrap(), data);
    }
}
