//! Structured logging through `tracing`.
//!
//! Behaviors log with the ordinary `tracing` macros. A [`ConsoleLayer`]
//! converts each event into a [`LogEntry`] and forwards it to a [`LogSink`]:
//! the browser binding's sink prints to the developer console, tests use
//! [`MemorySink`].
//!
//! ```ignore
//! use folio_core::logging::{LoggingBuilder, MemorySink};
//!
//! let sink = MemorySink::new();
//! LoggingBuilder::new().with_filter("folio_core=debug").init(sink.clone())?;
//! ```

pub mod entry;
pub mod layer;

pub use entry::LogEntry;
pub use layer::{ConsoleLayer, LogSink, LoggingBuilder, MemorySink};
