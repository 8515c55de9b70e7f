//! Distribution chart + table renderer.
//!
//! One bar chart and one table drawn from the same row sequence, so chart
//! order and table order always agree. Rows are rendered in input order with
//! no sorting or de-duplication.

use std::collections::HashSet;

use serde_json::Value;

use super::cards::data_table;
use super::{RenderError, RenderOutcome, SectionRenderer, SkipReason, skip};
use crate::chart::{ChartAdapter, Layout, PlotConfig, Trace};
use crate::config::ThemeConfig;
use crate::dom::Document;
use crate::report::{Report, SectionKey, display_value, rows_of};

const BUCKET: &str = "Bucket";
const TRADES: &str = "Trades";
const SHARE: &str = "Share (%)";

/// One usable distribution row.
#[derive(Debug, Clone, Copy)]
struct Bucket<'a> {
    label: &'a Value,
    trades: &'a Value,
    share: Option<&'a Value>,
}

/// Renders a `{rows: [{Bucket, Trades, Share (%)}]}` block as a bar chart
/// plus a table.
#[derive(Debug, Clone)]
pub struct DistributionRenderer {
    section: SectionKey,
    subsection: &'static str,
    chart_mount: &'static str,
    table_mount: &'static str,
    theme: ThemeConfig,
}

impl DistributionRenderer {
    /// Create a renderer reading `section[subsection].rows`.
    #[must_use]
    pub const fn new(
        section: SectionKey,
        subsection: &'static str,
        chart_mount: &'static str,
        table_mount: &'static str,
        theme: ThemeConfig,
    ) -> Self {
        Self {
            section,
            subsection,
            chart_mount,
            table_mount,
            theme,
        }
    }

    /// The R-multiple trade distribution.
    #[must_use]
    pub const fn trade_distribution(theme: ThemeConfig) -> Self {
        Self::new(
            SectionKey::TradeDistribution,
            "R-multiple distribution",
            "trade-distribution-chart",
            "trade-distribution-table",
            theme,
        )
    }
}

impl SectionRenderer for DistributionRenderer {
    fn name(&self) -> &'static str {
        "trade_distribution"
    }

    fn render(
        &self,
        report: &Report,
        document: &mut Document,
        charts: &mut dyn ChartAdapter,
    ) -> Result<RenderOutcome, RenderError> {
        let Some(payload) = report.section(self.section) else {
            return Ok(skip(self.name(), SkipReason::MissingSection(self.section)));
        };
        let Some(rows) = payload
            .get(self.subsection)
            .and_then(Value::as_object)
            .and_then(rows_of)
        else {
            return Ok(skip(self.name(), SkipReason::MissingData(self.subsection)));
        };

        let chart_present = document.get_element_by_id(self.chart_mount).is_some();
        let table_present = document.get_element_by_id(self.table_mount).is_some();
        if !chart_present && !table_present {
            return Ok(skip(self.name(), SkipReason::MissingMount(self.chart_mount)));
        }

        let buckets = usable_buckets(rows);
        log_duplicate_buckets(&buckets);

        if chart_present {
            let x = buckets.iter().map(|b| b.label.clone()).collect();
            let y = buckets.iter().map(|b| b.trades.clone()).collect();
            let traces = [Trace::bar(x, y, &self.theme.bar_color)];
            let layout = Layout::dark(&self.theme, "R bucket", TRADES);
            charts.new_plot(self.chart_mount, &traces, &layout, &PlotConfig::static_chart())?;
        } else {
            tracing::debug!(mount = self.chart_mount, "distribution chart mount absent");
        }

        let Some(table_root) = document.get_element_by_id_mut(self.table_mount) else {
            tracing::debug!(mount = self.table_mount, "distribution table mount absent");
            return Ok(RenderOutcome::Rendered);
        };

        let cells: Vec<Vec<String>> = buckets
            .iter()
            .map(|b| {
                vec![
                    display_value(Some(b.label)),
                    display_value(Some(b.trades)),
                    display_value(b.share),
                ]
            })
            .collect();

        table_root.clear();
        table_root.append_child(data_table(&[BUCKET, TRADES, SHARE], &cells, "dist-table"));
        Ok(RenderOutcome::Rendered)
    }
}

// Rows without a bucket label or trade count are dropped from both chart and table.
fn usable_buckets(rows: &[Value]) -> Vec<Bucket<'_>> {
    rows.iter()
        .filter_map(|row| {
            let Some(row) = row.as_object() else {
                tracing::warn!("distribution row is not an object");
                return None;
            };
            let label = row.get(BUCKET).filter(|v| !v.is_null());
            let trades = row.get(TRADES).filter(|v| !v.is_null());
            let (Some(label), Some(trades)) = (label, trades) else {
                tracing::warn!(?row, "distribution row missing bucket or trades");
                return None;
            };
            Some(Bucket {
                label,
                trades,
                share: row.get(SHARE),
            })
        })
        .collect()
}

fn log_duplicate_buckets(buckets: &[Bucket<'_>]) {
    let mut seen = HashSet::new();
    for bucket in buckets {
        let label = display_value(Some(bucket.label));
        if !seen.insert(label.clone()) {
            tracing::debug!(bucket = %label, "duplicate distribution bucket");
        }
    }
}
