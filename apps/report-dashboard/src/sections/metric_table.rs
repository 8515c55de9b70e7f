//! Metric-table renderer (KPI cards).
//!
//! Rows come from a fixed allow-list per card, in declared order. The
//! payload's own key order is irrelevant and unknown keys are ignored.

use serde_json::{Map, Value};

use super::cards::{CardStyle, DisplayRow, card, metric_table};
use super::{RenderError, RenderOutcome, SectionRenderer, SkipReason, skip};
use crate::chart::ChartAdapter;
use crate::dom::Document;
use crate::report::{Report, SectionKey, display_value, is_present};

/// A titled card and its ordered metric names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricGroup {
    /// Card title.
    pub title: &'static str,
    /// Metric names, in display order.
    pub metrics: &'static [&'static str],
}

/// KPI cards for `Core Performance Metrics`.
pub const KPI_GROUPS: &[MetricGroup] = &[
    MetricGroup {
        title: "Run & Capital",
        metrics: &[
            "Backtesting from",
            "Backtesting to",
            "Total trades",
            "Trades/day (avg)",
            "Starting balance",
            "Final balance",
            "Absolute profit",
            "Total return (%)",
            "CAGR (%)",
        ],
    },
    MetricGroup {
        title: "Performance & Risk",
        metrics: &[
            "Profit factor",
            "Expectancy (USD)",
            "Win rate (%)",
            "Avg win",
            "Avg loss",
            "Avg win/loss",
            "Max drawdown ($)",
            "Max drawdown (%)",
            "Max balance",
            "Min balance",
            "Max daily loss ($)",
            "Max daily loss (%)",
            "Max consecutive wins",
            "Max consecutive losses",
        ],
    },
    MetricGroup {
        title: "Costs & Execution",
        metrics: &[
            "Total costs (USD)",
            "Spread cost (USD)",
            "Slippage cost (USD)",
            "Costs (bps)",
            "Spread (bps)",
            "Slippage (bps)",
            "Avg cost/trade (USD)",
            "Traded volume (USD)",
            "Avg volume/trade (USD)",
            "Costs as % of gross PnL",
            "Entry market share (%)",
            "Exit market share (%)",
        ],
    },
];

/// Present, non-null metrics of `payload`, in the order of `metrics`.
#[must_use]
pub fn visible_rows(payload: &Map<String, Value>, metrics: &[&str]) -> Vec<DisplayRow> {
    metrics
        .iter()
        .filter_map(|&name| {
            let value = payload.get(name);
            is_present(value).then(|| DisplayRow::new(name, display_value(value)))
        })
        .collect()
}

/// Renders a section as grouped cards of Metric/Value rows.
#[derive(Debug, Clone)]
pub struct MetricTableRenderer {
    mount_id: &'static str,
    section: SectionKey,
    groups: &'static [MetricGroup],
    style: CardStyle,
}

impl MetricTableRenderer {
    /// Create a renderer for `section` into `mount_id`.
    #[must_use]
    pub const fn new(
        mount_id: &'static str,
        section: SectionKey,
        groups: &'static [MetricGroup],
    ) -> Self {
        Self {
            mount_id,
            section,
            groups,
            style: CardStyle::KPI,
        }
    }

    /// The KPI summary cards.
    #[must_use]
    pub const fn kpi() -> Self {
        Self::new("kpi-table", SectionKey::CorePerformance, KPI_GROUPS)
    }
}

impl SectionRenderer for MetricTableRenderer {
    fn name(&self) -> &'static str {
        "kpi"
    }

    fn render(
        &self,
        report: &Report,
        document: &mut Document,
        _charts: &mut dyn ChartAdapter,
    ) -> Result<RenderOutcome, RenderError> {
        let Some(root) = document.get_element_by_id_mut(self.mount_id) else {
            return Ok(skip(self.name(), SkipReason::MissingMount(self.mount_id)));
        };
        let Some(payload) = report.section(self.section) else {
            return Ok(skip(self.name(), SkipReason::MissingSection(self.section)));
        };

        root.clear();

        let cards = self.groups.iter().filter_map(|group| {
            let rows = visible_rows(payload, group.metrics);
            if rows.is_empty() {
                return None;
            }
            Some(card(&self.style, group.title, metric_table(&rows, self.style.table)))
        });

        root.append_child(self.style.grid().with_children(cards));
        Ok(RenderOutcome::Rendered)
    }
}
