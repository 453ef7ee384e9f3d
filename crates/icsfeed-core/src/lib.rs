//! Core types: timestamps, events, formatting, tracing setup

pub mod event;
pub mod format;
pub mod time;
pub mod tracing;

pub use event::{Event, EventBuilder};
pub use format::{
    FormatOptions, JsonEvent, JsonOutput, OutputFormat, OutputFormatter, TimeFormat, ellipsis,
    format_duration,
};
pub use time::Timestamp;
pub use crate::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
