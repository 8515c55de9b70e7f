// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Report Dashboard - Backtest report renderer
//!
//! Renders a pre-computed backtest report (`report.json`) into a standalone
//! HTML dashboard. Nothing here computes trading metrics: every renderer reads
//! a fixed set of keys out of the report and produces document nodes or a
//! declarative chart specification.
//!
//! # Layout
//!
//! - `report`: the report value, typed section keys, and the value formatter
//! - `dom`: in-memory element tree with id lookup and HTML serialization
//! - `chart`: chart adapter port and the Plotly adapter
//! - `sections`: one renderer per report section
//! - `dashboard`: orchestrator that runs every renderer once, in order
//! - `page`: host page skeleton (mount points) and final HTML assembly
//! - `config` / `telemetry`: YAML configuration and tracing setup
//!
//! # Failure policy
//!
//! Missing data and malformed data never abort a render. A missing section,
//! subsection, metric or mount point turns the affected unit into a no-op;
//! the remaining sections still render.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Chart adapter port and Plotly implementation.
pub mod chart;

/// YAML configuration with environment variable interpolation.
pub mod config;

/// Orchestrator that sequences the section renderers.
pub mod dashboard;

/// In-memory document tree.
pub mod dom;

/// Top-level error type.
pub mod error;

/// File-to-file generation pipeline used by the binary.
pub mod generate;

/// Host page skeleton and HTML assembly.
pub mod page;

/// Report value, section keys and value formatting.
pub mod report;

/// Section renderers.
pub mod sections;

/// Tracing subscriber setup.
pub mod telemetry;

pub use chart::{ChartAdapter, ChartError, PlotConfig, PlotlyAdapter};
pub use config::{DashboardConfig, load_config, load_config_from_string};
pub use dashboard::{Dashboard, RenderSummary};
pub use dom::{Document, Element, Node};
pub use error::DashboardError;
pub use generate::{generate, render_html};
pub use page::DashboardPage;
pub use report::{Report, ReportError, SectionKey, display_value};
pub use sections::{RenderError, RenderOutcome, SectionRenderer, SkipReason};
