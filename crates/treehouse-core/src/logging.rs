//! Logging setup shared by the binaries.
//!
//! Console output goes through `tracing_subscriber::fmt`. Optionally every
//! event is also appended as one JSON object per line to
//! `<logs>/raw/<date>_<component>.jsonl`, which can be queried with `jq`:
//!
//! ```bash
//! jq 'select(.level == "warn")' logs/raw/*.jsonl
//! cat logs/raw/*.jsonl | jq -s 'sort_by(.ts)'
//! ```
//!
//! # Example
//!
//! ```ignore
//! LoggingBuilder::new("server")
//!     .with_logs_dir(Some("./logs".into()))
//!     .init()?;
//! ```

pub mod entry;
pub mod layer;

use std::path::PathBuf;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub use entry::LogEntry;
pub use layer::JsonlLayer;

use crate::error::{TreeError, TreeResult};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info,treehouse_core=debug";

/// Builds and installs the global subscriber.
pub struct LoggingBuilder {
    component: String,
    logs_dir: Option<PathBuf>,
    console: bool,
    filter: Option<String>,
}

impl LoggingBuilder {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            logs_dir: None,
            console: true,
            filter: None,
        }
    }

    /// Also write JSONL under this directory.
    pub fn with_logs_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.logs_dir = dir;
        self
    }

    pub fn no_console(mut self) -> Self {
        self.console = false;
        self
    }

    /// Filter directive, overriding `RUST_LOG`.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    fn env_filter(&self) -> TreeResult<EnvFilter> {
        match &self.filter {
            Some(directive) => EnvFilter::try_new(directive)
                .map_err(|e| TreeError::Config(format!("invalid log filter {directive:?}: {e}"))),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
        }
    }

    /// Install as the global default. Returns the JSONL file path, if any.
    pub fn init(self) -> TreeResult<Option<PathBuf>> {
        let filter = self.env_filter()?;
        let jsonl = match &self.logs_dir {
            Some(dir) => Some(JsonlLayer::new(dir, &self.component)?),
            None => None,
        };
        let path = jsonl.as_ref().map(|l| l.log_path().to_path_buf());
        let console = self
            .console
            .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

        tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .with(jsonl)
            .try_init()
            .map_err(|e| TreeError::Config(format!("logging already initialized: {e}")))?;

        if let Some(path) = &path {
            tracing::info!(component = %self.component, ?path, "JSONL logging enabled");
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_filter_is_config_error() {
        let result = LoggingBuilder::new("test").with_filter("treehouse=notalevel").env_filter();
        assert!(matches!(result, Err(TreeError::Config(_))));
    }
}
