//! Event Sink Implementations
//!
//! - JsonEventSink: NDJSON output for CI/automation
//!
//! The terminal sink lives with the UI in the binary.

mod json;

pub use json::{event_json, JsonEventSink};
