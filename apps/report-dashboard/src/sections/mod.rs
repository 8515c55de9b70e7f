//! Section renderers.
//!
//! Each renderer reads one part of the report and writes into fixed mount
//! points of the document (and/or draws a chart). Renderers are independent
//! of each other and never mutate the report.
//!
//! Missing data or a missing mount makes a renderer a no-op: the result is
//! [`RenderOutcome::Skipped`] and the document is left untouched.

mod cards;
mod category;
mod distribution;
mod equity;
mod metric_table;
mod overview;
mod row_table;

use thiserror::Error;

use crate::chart::{ChartAdapter, ChartError};
use crate::dom::Document;
use crate::report::{Report, SectionKey};

pub use cards::{CardStyle, DisplayRow, card, data_table, metric_table};
pub use category::{BACKTEST_CONFIG_CATEGORIES, Category, CategoryCardRenderer};
pub use distribution::DistributionRenderer;
pub use equity::EquityCurveRenderer;
pub use metric_table::{KPI_GROUPS, MetricGroup, MetricTableRenderer, visible_rows};
pub use overview::SectionOverviewRenderer;
pub use row_table::{RowLayout, RowSource, RowTableRenderer, row_table_card};

/// Errors a renderer can surface to the orchestrator.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The chart adapter rejected the chart spec.
    #[error(transparent)]
    Chart(#[from] ChartError),
}

/// Why a renderer produced nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The mount element is not in the document.
    MissingMount(&'static str),
    /// The section is absent (or not an object).
    MissingSection(SectionKey),
    /// A required subsection or field is absent.
    MissingData(&'static str),
    /// The data is present but unusable.
    Malformed(&'static str),
}

/// What a renderer did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Content was written.
    Rendered,
    /// Nothing was written.
    Skipped(SkipReason),
}

impl RenderOutcome {
    /// Whether content was written.
    #[must_use]
    pub const fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered)
    }
}

/// A section renderer.
pub trait SectionRenderer {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Render into `document`, drawing charts through `charts`.
    fn render(
        &self,
        report: &Report,
        document: &mut Document,
        charts: &mut dyn ChartAdapter,
    ) -> Result<RenderOutcome, RenderError>;
}

/// Skip helper that logs at debug level.
pub(crate) fn skip(renderer: &'static str, reason: SkipReason) -> RenderOutcome {
    tracing::debug!(renderer, ?reason, "section skipped");
    RenderOutcome::Skipped(reason)
}
