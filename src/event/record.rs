//! The event record

use chrono::{DateTime, Local, Utc};
use colored::*;
use serde::{Deserialize, Serialize};

/// A timestamped message
///
/// Both fields are optional on the wire: `time` is left out when unset and
/// `message` when empty, so `Event::default()` encodes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// When the event happened (UTC, RFC 3339 on the wire)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    /// Free-text message
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl Event {
    /// Create an event stamped with the current UTC time
    pub fn now(message: &str) -> Self {
        Self::at(Utc::now(), message)
    }

    /// Create an event with an explicit timestamp
    pub fn at(time: DateTime<Utc>, message: &str) -> Self {
        Self {
            time: Some(time),
            message: message.to_string(),
        }
    }

    /// Create an event without a timestamp
    pub fn untimed(message: &str) -> Self {
        Self {
            time: None,
            message: message.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_none() && self.message.is_empty()
    }

    /// Format for terminal display
    pub fn format_display(&self) -> String {
        let when = match self.time {
            Some(t) => t
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .dimmed()
                .to_string(),
            None => "-------------------".dimmed().to_string(),
        };

        if self.message.is_empty() {
            format!("{} {}", when, "(no message)".dimmed())
        } else {
            format!("{} {}", when, self.message.bold())
        }
    }
}
