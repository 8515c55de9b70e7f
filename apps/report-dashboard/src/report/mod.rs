//! The pre-computed backtest report.
//!
//! A report is a JSON object mapping section titles to section payloads. It
//! is produced entirely by the backtest engine; this crate only reads it.
//! Key insertion order is preserved, since category and row-table renderers
//! follow the producer's order.
//!
//! # Usage
//!
//! ```rust,ignore
//! use report_dashboard::report::{Report, SectionKey};
//!
//! let report = Report::load("results/run-42/report/report.json")?;
//! if let Some(kpis) = report.section(SectionKey::CorePerformance) {
//!     println!("{} KPIs", kpis.len());
//! }
//! ```

mod keys;
mod value;

use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

pub use keys::SectionKey;
pub use value::{MISSING, display_value, is_present};

/// A mapping of column name to value inside a `rows` block.
pub type Row = Map<String, Value>;

/// Errors raised while loading a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to read the report file.
    #[error("Failed to read report file '{path}': {source}")]
    ReadError {
        /// Path to the report file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse the report JSON.
    #[error("Failed to parse report JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The report root is not a JSON object.
    #[error("Report root must be a JSON object, found {found}")]
    NotAnObject {
        /// JSON type found at the root.
        found: &'static str,
    },
}

/// An immutable backtest report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    sections: Map<String, Value>,
}

impl Report {
    /// Wrap an already-parsed section mapping.
    #[must_use]
    pub const fn from_map(sections: Map<String, Value>) -> Self {
        Self { sections }
    }

    /// Build a report from a parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, ReportError> {
        match value {
            Value::Object(sections) => Ok(Self { sections }),
            other => Err(ReportError::NotAnObject {
                found: json_type(&other),
            }),
        }
    }

    /// Parse a report from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ReportError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Read and parse a report file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ReportError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json_str(&contents)
    }

    /// Payload of a known section, if present and an object.
    #[must_use]
    pub fn section(&self, key: SectionKey) -> Option<&Map<String, Value>> {
        self.entry(key.as_str()).and_then(Value::as_object)
    }

    /// Raw entry under an arbitrary key.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&Value> {
        self.sections.get(key)
    }

    /// Section titles in report order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the report has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// The `rows` sequence of a tabular block, if it has one.
#[must_use]
pub fn rows_of(block: &Map<String, Value>) -> Option<&Vec<Value>> {
    block.get("rows").and_then(Value::as_array)
}

/// The producer's `{"error": "..."}` notice, if the payload carries one.
#[must_use]
pub fn error_notice(payload: &Map<String, Value>) -> Option<&str> {
    payload.get("error").and_then(Value::as_str)
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
