//! Event encoding
//!
//! Serializes timestamped message records as compact JSON to a byte sink:
//! - `Event` - the record itself
//! - `Encoder` - writes one record per call, optionally syncing the sink
//! - `Durable` - the optional sync capability a sink can expose

#![allow(dead_code)] // accessors used when embedding the encoder, and by tests

pub mod encoder;
pub mod error;
pub mod record;
pub mod sink;

pub use encoder::{Encoder, FlushPolicy, Framing};
pub use error::EncodeError;
pub use record::Event;
pub use sink::Durable;
