//! Log sink that prints to the browser's developer console.

use folio_core::logging::{LogEntry, LogSink};
use wasm_bindgen::JsValue;

/// Writes each entry with the console method matching its level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

/// One console line: `[target] message {fields}`.
pub(crate) fn format_entry(entry: &LogEntry) -> String {
    let mut line = format!("[{}] {}", entry.target, entry.msg);
    if let Some(span) = &entry.span {
        line = format!("{} ({})", line, span);
    }
    if let Some(fields) = &entry.fields {
        line = format!("{} {}", line, fields);
    }
    line
}

impl LogSink for ConsoleSink {
    fn write(&self, entry: &LogEntry) {
        let line = JsValue::from_str(&format_entry(entry));
        match entry.level.as_str() {
            "error" => web_sys::console::error_1(&line),
            "warn" => web_sys::console::warn_1(&line),
            "info" => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_plain() {
        let entry = LogEntry::new("info", "folio_core::site", "portfolio mounted");
        assert_eq!(format_entry(&entry), "[folio_core::site] portfolio mounted");
    }

    #[test]
    fn test_format_with_span_and_fields() {
        let entry = LogEntry::new("warn", "folio_core::scroll", "fallback")
            .with_span("mount")
            .with_fields(serde_json::json!({ "reason": "no sections" }));
        assert_eq!(
            format_entry(&entry),
            r#"[folio_core::scroll] fallback (mount) {"reason":"no sections"}"#
        );
    }
}
