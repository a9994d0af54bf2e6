//! Event encoder bound to a single sink

use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use super::error::EncodeError;
use super::record::Event;
use super::sink::Durable;

/// What to do when syncing the sink fails after a successful write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlushPolicy {
    /// Log the failure and report the write as successful
    #[default]
    BestEffort,
    /// Return `EncodeError::Flush`
    Strict,
}

/// Bytes appended after each record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Framing {
    /// Records are written back to back
    #[default]
    None,
    /// Each record is terminated by `\n` (JSON Lines)
    Newline,
}

impl Framing {
    pub fn from_newline(newline: bool) -> Self {
        if newline { Framing::Newline } else { Framing::None }
    }

    fn delimiter(&self) -> Option<u8> {
        match self {
            Framing::None => None,
            Framing::Newline => Some(b'\n'),
        }
    }
}

type SyncFn<W> = fn(&mut W) -> io::Result<()>;

/// Writes events to one sink for its whole lifetime
///
/// The sync hook is decided when the encoder is built: `Encoder::new` never
/// syncs, `Encoder::durable` syncs after every record.
pub struct Encoder<W: Write> {
    sink: W,
    sync: Option<SyncFn<W>>,
    policy: FlushPolicy,
    framing: Framing,
}

impl<W: Write> Encoder<W> {
    /// Create an encoder that only writes
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            sync: None,
            policy: FlushPolicy::default(),
            framing: Framing::default(),
        }
    }

    pub fn with_flush_policy(mut self, policy: FlushPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    /// Whether a sync runs after each record
    pub fn is_durable(&self) -> bool {
        self.sync.is_some()
    }

    /// Serialize `event`, write it in one call, then sync if bound
    ///
    /// A short write is an error, never retried. A sink error is returned
    /// as-is inside `EncodeError::Write` and no sync is attempted.
    pub fn encode(&mut self, event: &Event) -> Result<(), EncodeError> {
        let mut data = serde_json::to_vec(event)?;
        if let Some(delimiter) = self.framing.delimiter() {
            data.push(delimiter);
        }

        let written = self.sink.write(&data).map_err(EncodeError::Write)?;
        if written != data.len() {
            return Err(EncodeError::PartialWrite {
                attempted: data.len(),
                actual: written,
            });
        }
        log::debug!("Wrote {} byte event record", written);

        if let Some(sync) = self.sync {
            if let Err(e) = sync(&mut self.sink) {
                match self.policy {
                    FlushPolicy::BestEffort => log::warn!("Failed to sync sink after write: {}", e),
                    FlushPolicy::Strict => return Err(EncodeError::Flush(e)),
                }
            } else {
                log::debug!("Synced sink");
            }
        }

        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Give the sink back to the caller
    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Durable> Encoder<W> {
    /// Create an encoder that syncs the sink after every record
    pub fn durable(sink: W) -> Self {
        let sync: SyncFn<W> = <W as Durable>::sync;
        Self {
            sync: Some(sync),
            ..Self::new(sink)
        }
    }
}
