//! Top-level error type for dashboard generation.
//!
//! Rendering itself never fails: section renderers degrade to no-ops. The
//! errors here cover the edges around it, reading the report, loading
//! configuration and writing the page.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::report::ReportError;

/// Errors raised while generating a dashboard file.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Configuration could not be loaded or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The report could not be read or parsed.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// The output directory could not be created.
    #[error("Failed to create output directory '{}': {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The rendered page could not be written.
    #[error("Failed to write dashboard '{}': {source}", path.display())]
    Write {
        /// Output file path.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },
}
