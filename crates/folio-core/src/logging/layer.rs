//! Custom tracing Layer that hands structured entries to a sink.
//!
//! The browser binding plugs in a sink that writes to the developer
//! console; tests plug in [`MemorySink`] and inspect what was logged.

use std::fmt::Write as FmtWrite;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

use super::entry::LogEntry;
use crate::error::{FolioError, FolioResult};

/// Destination for structured log entries.
pub trait LogSink: Send + Sync + 'static {
    fn write(&self, entry: &LogEntry);
}

/// Sink that keeps every entry in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Entries whose message contains `needle`.
    pub fn matching(&self, needle: &str) -> Vec<LogEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.msg.contains(needle))
            .cloned()
            .collect()
    }
}

impl LogSink for MemorySink {
    fn write(&self, entry: &LogEntry) {
        self.entries.lock().push(entry.clone());
    }
}

/// A tracing Layer that turns events into [`LogEntry`] values.
pub struct ConsoleLayer<S> {
    sink: Arc<S>,
}

impl<S: LogSink> ConsoleLayer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }
}

impl<S, Sub> Layer<Sub> for ConsoleLayer<S>
where
    S: LogSink,
    Sub: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, Sub>) {
        let metadata = event.metadata();
        let level = metadata.level().as_str().to_lowercase();

        let mut visitor = JsonVisitor::new();
        event.record(&mut visitor);

        let message = visitor.message.unwrap_or_default();
        let mut entry = LogEntry::new(level, metadata.target(), message);

        if !visitor.fields.is_empty() {
            entry = entry.with_fields(serde_json::Value::Object(visitor.fields));
        }

        if let Some(scope) = ctx.event_scope(event) {
            let spans: Vec<String> = scope.from_root().map(|span| span.name().to_string()).collect();
            if !spans.is_empty() {
                entry = entry.with_span(spans.join(" > "));
            }
        }

        self.sink.write(&entry);
    }
}

/// Visitor that extracts fields from tracing events.
struct JsonVisitor {
    message: Option<String>,
    fields: serde_json::Map<String, serde_json::Value>,
}

impl JsonVisitor {
    fn new() -> Self {
        Self {
            message: None,
            fields: serde_json::Map::new(),
        }
    }
}

impl Visit for JsonVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let mut buf = String::new();
        let _ = write!(&mut buf, "{:?}", value);

        if field.name() == "message" {
            self.message = Some(buf);
        } else {
            self.fields
                .insert(field.name().to_string(), serde_json::Value::String(buf));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.insert(
                field.name().to_string(),
                serde_json::Value::String(value.to_string()),
            );
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields
            .insert(field.name().to_string(), serde_json::Value::Number(value.into()));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields
            .insert(field.name().to_string(), serde_json::Value::Number(value.into()));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields
            .insert(field.name().to_string(), serde_json::Value::Bool(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if let Some(n) = serde_json::Number::from_f64(value) {
            self.fields
                .insert(field.name().to_string(), serde_json::Value::Number(n));
        }
    }
}

/// Builder for installing a global subscriber around a [`ConsoleLayer`].
pub struct LoggingBuilder {
    env_filter: Option<String>,
}

impl Default for LoggingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingBuilder {
    pub fn new() -> Self {
        Self { env_filter: None }
    }

    /// Set the filter directive (e.g., "folio=info,folio_core=debug").
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    fn filter(&self) -> FolioResult<EnvFilter> {
        let directive = self.env_filter.as_deref().unwrap_or("info");
        EnvFilter::try_new(directive).map_err(|e| FolioError::Logging(e.to_string()))
    }

    /// Install the layer as the global default subscriber.
    pub fn init<S: LogSink>(self, sink: S) -> FolioResult<()> {
        let filter = self.filter()?;
        tracing_subscriber::registry()
            .with(filter)
            .with(ConsoleLayer::new(sink))
            .try_init()
            .map_err(|e| FolioError::Logging(e.to_string()))
    }

    /// Run `f` with the layer installed only for the current thread.
    pub fn scoped<S: LogSink, R>(self, sink: S, f: impl FnOnce() -> R) -> FolioResult<R> {
        let filter = self.filter()?;
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(ConsoleLayer::new(sink));
        Ok(tracing::subscriber::with_default(subscriber, f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_captures_events() {
        let sink = MemorySink::new();

        LoggingBuilder::new()
            .with_filter("debug")
            .scoped(sink.clone(), || {
                tracing::info!("Test message");
                tracing::warn!(count = 42, "Warning with field");
            })
            .unwrap();

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].msg, "Test message");
        assert_eq!(entries[0].level, "info");
        assert_eq!(entries[1].level, "warn");
        assert_eq!(entries[1].field("count"), Some(&serde_json::json!(42)));
    }

    #[test]
    fn test_filter_drops_lower_levels() {
        let sink = MemorySink::new();

        LoggingBuilder::new()
            .with_filter("warn")
            .scoped(sink.clone(), || {
                tracing::debug!("hidden");
                tracing::warn!("shown");
            })
            .unwrap();

        assert!(sink.matching("hidden").is_empty());
        assert_eq!(sink.matching("shown").len(), 1);
    }

    #[test]
    fn test_span_path_recorded() {
        let sink = MemorySink::new();

        LoggingBuilder::new()
            .scoped(sink.clone(), || {
                let span = tracing::info_span!("mount");
                let _guard = span.enter();
                tracing::info!("inside");
            })
            .unwrap();

        assert_eq!(sink.entries()[0].span.as_deref(), Some("mount"));
    }

    #[test]
    fn test_bad_filter_rejected() {
        let result = LoggingBuilder::new()
            .with_filter("folio=notalevel")
            .scoped(MemorySink::new(), || ());
        assert!(matches!(result, Err(FolioError::Logging(_))));
    }
}
