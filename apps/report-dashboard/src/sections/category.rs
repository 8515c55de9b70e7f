//! Grouped-category renderer (configuration cards).
//!
//! Unlike the KPI cards, rows here are data-driven: every key of a category
//! mapping is rendered, in the producer's order. Only the set of categories
//! and their titles are fixed.

use super::cards::{CardStyle, DisplayRow, card, metric_table};
use super::{RenderError, RenderOutcome, SectionRenderer, SkipReason, skip};
use crate::chart::ChartAdapter;
use crate::dom::Document;
use crate::report::{Report, SectionKey, display_value};

/// A category key in the payload and its card title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Key in the section payload.
    pub key: &'static str,
    /// Card title.
    pub title: &'static str,
}

/// Categories of `Backtest Configuration & Assumptions`.
pub const BACKTEST_CONFIG_CATEGORIES: &[Category] = &[
    Category {
        key: "Market & Data",
        title: "Market & Data",
    },
    Category {
        key: "Execution Model",
        title: "Execution Model",
    },
    Category {
        key: "Capital Model",
        title: "Capital Model",
    },
];

/// Renders one card per configured category.
#[derive(Debug, Clone)]
pub struct CategoryCardRenderer {
    mount_id: &'static str,
    section: SectionKey,
    categories: &'static [Category],
    style: CardStyle,
}

impl CategoryCardRenderer {
    /// Create a renderer for `section` into `mount_id`.
    #[must_use]
    pub const fn new(
        mount_id: &'static str,
        section: SectionKey,
        categories: &'static [Category],
    ) -> Self {
        Self {
            mount_id,
            section,
            categories,
            style: CardStyle::BT_INFO,
        }
    }

    /// The backtest configuration cards.
    #[must_use]
    pub const fn backtest_config() -> Self {
        Self::new(
            "backtest-info-table",
            SectionKey::BacktestConfig,
            BACKTEST_CONFIG_CATEGORIES,
        )
    }
}

impl SectionRenderer for CategoryCardRenderer {
    fn name(&self) -> &'static str {
        "backtest_config"
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

        let cards = self.categories.iter().filter_map(|category| {
            let block = payload.get(category.key)?.as_object()?;
            let rows: Vec<DisplayRow> = block
                .iter()
                .map(|(metric, value)| DisplayRow::new(metric.as_str(), display_value(Some(value))))
                .collect();
            Some(card(&self.style, category.title, metric_table(&rows, self.style.table)))
        });

        root.append_child(self.style.grid().with_children(cards));
        Ok(RenderOutcome::Rendered)
    }
}
