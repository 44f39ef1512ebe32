//! Structured error types shared across the membw-viz crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What went wrong while charting one benchmark sweep.
///
/// `code` is an `mbw.*` identifier of the failing check (for example
/// `mbw.row_malformed`); `context` carries the offending file, line, column
/// or grid key so the operator can find the bad cell without a debugger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// `mbw.*` code of the failing check.
    pub code: String,
    /// One-line description printed after the failure family.
    pub message: String,
    /// Location of the failure: `path`, `line`, `row`, `column`, grid keys.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Next step for the operator, such as re-running the benchmarks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with no location and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records one location detail; a repeated key keeps the latest value.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Records the results, config or chart file involved.
    pub fn with_path(self, path: &Path) -> Self {
        self.with_context("path", path.display().to_string())
    }

    /// Attaches the operator hint shown under the diagnostic.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the visualisation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum VizError {
    /// A benchmark result file does not exist.
    #[error("missing input: {0}")]
    MissingInput(ErrorInfo),
    /// A result file has a ragged row, an unparseable cell or no rows.
    #[error("malformed table: {0}")]
    MalformedTable(ErrorInfo),
    /// A result file lacks a column the experiment requires.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(ErrorInfo),
    /// No usable reference row for a degradation series.
    #[error("baseline not found: {0}")]
    BaselineNotFound(ErrorInfo),
    /// A two-parameter table does not form a complete grid.
    #[error("irregular grid: {0}")]
    IrregularGrid(ErrorInfo),
    /// Filesystem failures while writing artefacts or reading configuration.
    #[error("io error: {0}")]
    Io(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            write!(f, " | context: [{}]", pairs.join(", "))?;
        }
        match &self.hint {
            Some(hint) => write!(f, " | hint: {hint}"),
            None => Ok(()),
        }
    }
}

impl VizError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            VizError::MissingInput(info)
            | VizError::MalformedTable(info)
            | VizError::SchemaMismatch(info)
            | VizError::BaselineNotFound(info)
            | VizError::IrregularGrid(info)
            | VizError::Io(info) => info,
        }
    }

    /// Wraps a filesystem error raised while touching `path`.
    pub fn io(code: &str, path: &Path, err: impl ToString) -> Self {
        VizError::Io(ErrorInfo::new(code, err.to_string()).with_path(path))
    }

    /// Path recorded in the error context, if any.
    pub fn path(&self) -> Option<&str> {
        self.info().context.get("path").map(String::as_str)
    }
}
