//! Data-driven section renderer.
//!
//! For sections without a fixed shape. The payload is walked in insertion
//! order: scalars and labeled values collect into a leading `Summary` card,
//! `{rows}` blocks become row tables and other nested mappings become
//! Metric/Value cards titled with their key.

use serde_json::{Map, Value};

use super::cards::{CardStyle, DisplayRow, card, metric_table, notice};
use super::row_table::row_table_card;
use super::{RenderError, RenderOutcome, SectionRenderer, SkipReason, skip};
use crate::chart::ChartAdapter;
use crate::dom::{Document, Element};
use crate::report::{Report, SectionKey, display_value, error_notice, rows_of};

const SUMMARY_TITLE: &str = "Summary";

/// Renders an arbitrary section payload as a grid of cards.
#[derive(Debug, Clone)]
pub struct SectionOverviewRenderer {
    name: &'static str,
    mount_id: &'static str,
    section: SectionKey,
    style: CardStyle,
}

impl SectionOverviewRenderer {
    /// Create a renderer for `section` into `mount_id`.
    #[must_use]
    pub const fn new(name: &'static str, mount_id: &'static str, section: SectionKey) -> Self {
        Self {
            name,
            mount_id,
            section,
            style: CardStyle::SECTION,
        }
    }

    /// Drawdown episodes and recovery.
    #[must_use]
    pub const fn drawdown_structure() -> Self {
        Self::new(
            "drawdown_structure",
            "drawdown-structure-table",
            SectionKey::DrawdownStructure,
        )
    }

    /// Capital usage and exposure.
    #[must_use]
    pub const fn capital_exposure() -> Self {
        Self::new(
            "capital_exposure",
            "capital-exposure-table",
            SectionKey::CapitalExposure,
        )
    }

    fn cards(&self, payload: &Map<String, Value>) -> Vec<Element> {
        let mut summary = Vec::new();
        let mut nested = Vec::new();

        for (key, value) in payload {
            match value.as_object().filter(|obj| !is_labeled(obj)) {
                Some(block) if rows_of(block).is_some() => {
                    nested.extend(row_table_card(&self.style, key, block));
                }
                Some(block) => {
                    let rows: Vec<DisplayRow> = block
                        .iter()
                        .map(|(metric, v)| DisplayRow::new(metric.as_str(), display_value(Some(v))))
                        .collect();
                    if !rows.is_empty() {
                        nested.push(card(&self.style, key, metric_table(&rows, self.style.table)));
                    }
                }
                None if value.is_null() => {}
                None => summary.push(DisplayRow::new(key.as_str(), display_value(Some(value)))),
            }
        }

        let mut cards = Vec::with_capacity(nested.len() + 1);
        if !summary.is_empty() {
            cards.push(card(&self.style, SUMMARY_TITLE, metric_table(&summary, self.style.table)));
        }
        cards.extend(nested);
        cards
    }
}

// `{display}` / `{raw, kind}` objects are single values, not nested sections.
fn is_labeled(obj: &Map<String, Value>) -> bool {
    obj.contains_key("display") || obj.contains_key("raw")
}

impl SectionRenderer for SectionOverviewRenderer {
    fn name(&self) -> &'static str {
        self.name
    }

    fn render(
        &self,
        report: &Report,
        document: &mut Document,
        _charts: &mut dyn ChartAdapter,
    ) -> Result<RenderOutcome, RenderError> {
        let Some(root) = document.get_element_by_id_mut(self.mount_id) else {
            return Ok(skip(self.name, SkipReason::MissingMount(self.mount_id)));
        };
        let Some(payload) = report.section(self.section) else {
            return Ok(skip(self.name, SkipReason::MissingSection(self.section)));
        };

        root.clear();

        if let Some(message) = error_notice(payload) {
            tracing::debug!(section = %self.section, notice = message, "producer reported section error");
            root.append_child(notice(message));
            return Ok(RenderOutcome::Rendered);
        }

        root.append_child(self.style.grid().with_children(self.cards(payload)));
        Ok(RenderOutcome::Rendered)
    }
}
