//! `tracing` layer appending events to a JSONL file.

use std::fmt::Write as _;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use super::entry::LogEntry;

/// Writes every event it sees to `<logs>/raw/<date>_<component>.jsonl`.
pub struct JsonlLayer {
    component: String,
    path: PathBuf,
    out: Mutex<BufWriter<File>>,
}

impl JsonlLayer {
    pub fn new(logs_dir: impl AsRef<Path>, component: impl Into<String>) -> std::io::Result<Self> {
        let component = component.into();
        let raw = logs_dir.as_ref().join("raw");
        std::fs::create_dir_all(&raw)?;

        let date = chrono::Local::now().format("%Y-%m-%d");
        let path = raw.join(format!("{date}_{component}.jsonl"));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            component,
            path,
            out: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn log_path(&self) -> &Path {
        &self.path
    }

    fn append(&self, entry: &LogEntry) -> std::io::Result<()> {
        let line = entry
            .to_line()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let mut out = self.out.lock();
        writeln!(out, "{line}")?;
        out.flush()
    }
}

impl<S> Layer<S> for JsonlLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let mut entry = LogEntry::new(
            metadata.level().as_str().to_lowercase(),
            &self.component,
            metadata.target(),
            visitor.message.unwrap_or_default(),
        );
        if !visitor.fields.is_empty() {
            entry = entry.with_fields(Value::Object(visitor.fields));
        }
        if let Some(scope) = ctx.event_scope(event) {
            let spans: Vec<_> = scope.from_root().map(|s| s.name()).collect();
            if !spans.is_empty() {
                entry = entry.with_span(spans.join(" > "));
            }
        }

        // A failing log sink must not take the process down
        let _ = self.append(&entry);
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl FieldVisitor {
    fn put(&mut self, field: &Field, value: Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let mut buf = String::new();
        let _ = write!(buf, "{value:?}");
        if field.name() == "message" {
            self.message = Some(buf);
        } else {
            self.put(field, Value::String(buf));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.put(field, Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if let Some(n) = serde_json::Number::from_f64(value) {
            self.put(field, Value::Number(n));
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.put(field, Value::String(value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tracing_subscriber::prelude::*;

    #[test]
    fn test_layer_writes_lines() {
        let temp = TempDir::new().unwrap();
        let layer = JsonlLayer::new(temp.path(), "test").unwrap();
        let path = layer.log_path().to_path_buf();
        assert!(path.to_string_lossy().ends_with("_test.jsonl"));

        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("upload");
            let _guard = span.enter();
            tracing::info!(size = 42u64, ok = true, "Stored object");
            tracing::warn!("Listing failed");
        });

        let content = std::fs::read_to_string(&path).unwrap();
        let entries: Vec<LogEntry> = content
            .lines()
            .map(|l| LogEntry::from_line(l).unwrap())
            .collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].msg, "Stored object");
        assert_eq!(entries[0].span.as_deref(), Some("upload"));
        let fields = entries[0].fields.as_ref().unwrap();
        assert_eq!(fields["size"], 42);
        assert_eq!(fields["ok"], true);
        assert_eq!(entries[1].level, "warn");
    }
}
