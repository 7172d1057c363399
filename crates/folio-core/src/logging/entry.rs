//! Structured log records.
//!
//! Each entry is a self-contained JSON object, so a sink can print it as one
//! console line or keep it for later inspection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single structured log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// ISO 8601 timestamp (e.g., "2026-01-21T14:30:45.123Z")
    pub ts: String,

    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Module path / target (e.g., "folio_core::scroll")
    pub target: String,

    /// Human-readable message
    pub msg: String,

    /// Optional structured fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Value>,

    /// Optional span path if this entry is from within spans
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<String>,
}

impl LogEntry {
    /// Create a new log entry with the current timestamp.
    pub fn new(level: impl Into<String>, target: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            ts: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            level: level.into(),
            target: target.into(),
            msg: msg.into(),
            fields: None,
            span: None,
        }
    }

    /// Add structured fields to the entry.
    pub fn with_fields(mut self, fields: Value) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Add span path to the entry.
    pub fn with_span(mut self, span: impl Into<String>) -> Self {
        self.span = Some(span.into());
        self
    }

    /// Look up a structured field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.as_ref()?.get(name)
    }

    /// Serialize to a single JSON line (no trailing newline).
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from a JSON line.
    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}
