use std::io;

/// Errors returned by `Encoder::encode`
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The sink's own error, untouched
    #[error("Failed to write event: {0}")]
    Write(#[source] io::Error),

    #[error("Partial write ({actual} out of {attempted} bytes)")]
    PartialWrite { attempted: usize, actual: usize },

    /// Only produced under `FlushPolicy::Strict`
    #[error("Failed to sync sink: {0}")]
    Flush(#[source] io::Error),
}

impl EncodeError {
    /// The underlying I/O error, if this came from the sink
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            EncodeError::Write(e) | EncodeError::Flush(e) => Some(e),
            _ => None,
        }
    }
}
