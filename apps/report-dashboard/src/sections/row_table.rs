//! Row-table renderer for `{rows, sorted_by?}` blocks.
//!
//! Columns are taken from the first row's keys, in the producer's order.
//! Later rows are projected onto those columns; a missing cell shows the
//! placeholder and extra keys are dropped.

use serde_json::{Map, Value};

use super::cards::{CardStyle, card, data_table, notice};
use super::{RenderError, RenderOutcome, SectionRenderer, SkipReason, skip};
use crate::chart::ChartAdapter;
use crate::dom::{Document, Element};
use crate::report::{Report, SectionKey, display_value, error_notice, rows_of};

/// Where the `rows` blocks live inside a section payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLayout {
    /// The payload itself is the `{rows}` block.
    Single,
    /// The payload maps subsection title to a `{rows}` block.
    Subsections,
}

/// One section feeding a row-table mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSource {
    /// Source section.
    pub section: SectionKey,
    /// Block layout.
    pub layout: RowLayout,
}

impl RowSource {
    /// Create a source.
    #[must_use]
    pub const fn new(section: SectionKey, layout: RowLayout) -> Self {
        Self { section, layout }
    }
}

const DIAGNOSTICS_SOURCES: &[RowSource] = &[
    RowSource::new(SectionKey::EntryTagPerformance, RowLayout::Single),
    RowSource::new(SectionKey::ExitLogicDiagnostics, RowLayout::Single),
];

const CONDITIONAL_EXPECTANCY_SOURCES: &[RowSource] =
    &[RowSource::new(SectionKey::ConditionalExpectancy, RowLayout::Subsections)];

const CONDITIONAL_ENTRY_TAG_SOURCES: &[RowSource] =
    &[RowSource::new(SectionKey::ConditionalEntryTag, RowLayout::Subsections)];

/// Card for one `{rows}` block, or `None` when it has no object rows.
#[must_use]
pub fn row_table_card(style: &CardStyle, title: &str, block: &Map<String, Value>) -> Option<Element> {
    let rows: Vec<&Map<String, Value>> = rows_of(block)?
        .iter()
        .filter_map(|row| {
            let object = row.as_object();
            if object.is_none() {
                tracing::warn!(table = title, "skipping non-object row");
            }
            object
        })
        .collect();

    let columns: Vec<&str> = rows.first()?.keys().map(String::as_str).collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|&column| display_value(row.get(column)))
                .collect()
        })
        .collect();

    let title = match block.get("sorted_by").filter(|v| !v.is_null()) {
        Some(sorted_by) => format!("{title} (sorted by {})", display_value(Some(sorted_by))),
        None => title.to_string(),
    };

    Some(card(style, &title, data_table(columns.as_slice(), &cells, style.table)))
}

/// Renders one or more row-table sections into a single mount.
///
/// The mount is cleared once, then every source appends its cards in order.
/// A source whose payload is `{"error": "..."}` contributes a notice card
/// titled with the section instead.
#[derive(Debug, Clone)]
pub struct RowTableRenderer {
    name: &'static str,
    mount_id: &'static str,
    sources: &'static [RowSource],
    style: CardStyle,
}

impl RowTableRenderer {
    /// Create a renderer.
    #[must_use]
    pub const fn new(
        name: &'static str,
        mount_id: &'static str,
        sources: &'static [RowSource],
    ) -> Self {
        Self {
            name,
            mount_id,
            sources,
            style: CardStyle::SECTION,
        }
    }

    /// Conditional expectancy by hour, weekday and context.
    #[must_use]
    pub const fn conditional_expectancy() -> Self {
        Self::new(
            "conditional_expectancy",
            "conditional-expectancy-table",
            CONDITIONAL_EXPECTANCY_SOURCES,
        )
    }

    /// Entry tag performance followed by exit logic diagnostics.
    #[must_use]
    pub const fn diagnostics() -> Self {
        Self::new("diagnostics", "diagnostics-table", DIAGNOSTICS_SOURCES)
    }

    /// Entry tag performance split by context.
    #[must_use]
    pub const fn conditional_entry_tag() -> Self {
        Self::new(
            "conditional_entry_tag",
            "conditional-entry-tag-table",
            CONDITIONAL_ENTRY_TAG_SOURCES,
        )
    }

    fn source_cards(&self, source: RowSource, payload: &Map<String, Value>) -> Vec<Element> {
        if let Some(message) = error_notice(payload) {
            tracing::debug!(section = %source.section, notice = message, "producer reported section error");
            return vec![card(&self.style, source.section.as_str(), notice(message))];
        }
        match source.layout {
            RowLayout::Single => row_table_card(&self.style, source.section.as_str(), payload)
                .into_iter()
                .collect(),
            RowLayout::Subsections => payload
                .iter()
                .filter_map(|(title, block)| {
                    row_table_card(&self.style, title, block.as_object()?)
                })
                .collect(),
        }
    }
}

impl SectionRenderer for RowTableRenderer {
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

        let present: Vec<_> = self
            .sources
            .iter()
            .filter_map(|&source| report.section(source.section).map(|p| (source, p)))
            .collect();
        if present.is_empty() {
            let Some(first) = self.sources.first() else {
                return Ok(skip(self.name, SkipReason::MissingData("row sources")));
            };
            return Ok(skip(self.name, SkipReason::MissingSection(first.section)));
        }

        let cards: Vec<Element> = present
            .into_iter()
            .flat_map(|(source, payload)| self.source_cards(source, payload))
            .collect();
        if cards.is_empty() {
            return Ok(skip(self.name, SkipReason::MissingData("rows")));
        }

        root.clear();
        root.append_child(self.style.grid().with_children(cards));
        Ok(RenderOutcome::Rendered)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::chart::PlotlyAdapter;

    fn document(mount: &str) -> Document {
        Document::from_body(Element::new("body").with_child(Element::new("div").with_id(mount)))
    }

    fn titles(doc: &Document, mount: &str) -> Vec<String> {
        doc.get_element_by_id(mount)
            .unwrap()
            .descendants_by_class("section-title")
            .iter()
            .map(|t| t.text_content())
            .collect()
    }

    fn cells(table: &Element) -> Vec<Vec<String>> {
        table
            .descendants_by_tag("tr")
            .iter()
            .map(|tr| tr.child_elements().map(Element::text_content).collect())
            .collect()
    }

    #[test]
    fn test_columns_follow_first_row() {
        let block = json!({
            "rows": [
                {"Tag": "breakout", "Trades": 12, "Win rate (%)": 58.3},
                {"Trades": 4, "Tag": "pullback", "Extra": true},
            ],
        });
        let card = row_table_card(&CardStyle::SECTION, "Tags", block.as_object().unwrap()).unwrap();

        assert_eq!(
            cells(&card),
            [
                vec!["Tag", "Trades", "Win rate (%)"],
                vec!["breakout", "12", "58.3"],
                vec!["pullback", "4", "-"],
            ]
        );
    }

    #[test]
    fn test_sorted_by_in_title() {
        let block = json!({"rows": [{"Hour": 9, "Trades": 3}], "sorted_by": "Hour"});
        let card = row_table_card(&CardStyle::SECTION, "By hour", block.as_object().unwrap()).unwrap();
        assert_eq!(
            card.descendants_by_class("section-title")[0].text_content(),
            "By hour (sorted by Hour)"
        );
    }

    #[test]
    fn test_blocks_without_object_rows_yield_no_card() {
        let empty = json!({"rows": []});
        let junk = json!({"rows": [1, "x", null]});
        let missing = json!({"error": "No trades available"});

        for block in [empty, junk, missing] {
            assert!(row_table_card(&CardStyle::SECTION, "t", block.as_object().unwrap()).is_none());
        }
    }

    #[test]
    fn test_subsections_render_in_payload_order() {
        let report = Report::from_value(json!({
            "Conditional Expectancy Analysis": {
                "By weekday": {"rows": [{"Weekday": "Mon", "Trades": 2}]},
                "notes": "ignored",
                "By hour": {"rows": [{"Hour": 9, "Trades": 3}], "sorted_by": "Hour"},
            },
        }))
        .unwrap();

        let mut doc = document("conditional-expectancy-table");
        let outcome = RowTableRenderer::conditional_expectancy()
            .render(&report, &mut doc, &mut PlotlyAdapter::new())
            .unwrap();

        assert!(outcome.is_rendered());
        assert_eq!(
            titles(&doc, "conditional-expectancy-table"),
            ["By weekday", "By hour (sorted by Hour)"]
        );
    }

    #[test]
    fn test_diagnostics_stacks_both_sections() {
        let report = Report::from_value(json!({
            "Exit Logic Diagnostics": {"rows": [{"Exit tag": "stop_loss", "Trades": 7}]},
            "Performance by Entry Tag": {"rows": [{"Entry tag": "breakout", "Trades": 9}]},
        }))
        .unwrap();

        let mut doc = document("diagnostics-table");
        let renderer = RowTableRenderer::diagnostics();
        renderer.render(&report, &mut doc, &mut PlotlyAdapter::new()).unwrap();
        let first = doc.clone();
        renderer.render(&report, &mut doc, &mut PlotlyAdapter::new()).unwrap();

        assert_eq!(doc, first);
        assert_eq!(
            titles(&doc, "diagnostics-table"),
            ["Performance by Entry Tag", "Exit Logic Diagnostics"]
        );
    }

    #[test]
    fn test_diagnostics_with_one_section() {
        let report = Report::from_value(json!({
            "Exit Logic Diagnostics": {"rows": [{"Exit tag": "take_profit", "Trades": 1}]},
        }))
        .unwrap();

        let mut doc = document("diagnostics-table");
        RowTableRenderer::diagnostics()
            .render(&report, &mut doc, &mut PlotlyAdapter::new())
            .unwrap();
        assert_eq!(titles(&doc, "diagnostics-table"), ["Exit Logic Diagnostics"]);
    }

    #[test]
    fn test_missing_sections_leave_mount_untouched() {
        let mut doc = document("conditional-entry-tag-table");
        doc.get_element_by_id_mut("conditional-entry-tag-table")
            .unwrap()
            .append_text("stale");

        let outcome = RowTableRenderer::conditional_entry_tag()
            .render(&Report::default(), &mut doc, &mut PlotlyAdapter::new())
            .unwrap();

        assert_eq!(
            outcome,
            RenderOutcome::Skipped(SkipReason::MissingSection(SectionKey::ConditionalEntryTag))
        );
        assert_eq!(
            doc.get_element_by_id("conditional-entry-tag-table").unwrap().text_content(),
            "stale"
        );
    }

    fn notices(doc: &Document, mount: &str) -> Vec<String> {
        doc.get_element_by_id(mount)
            .unwrap()
            .descendants_by_class("section-notice")
            .iter()
            .map(|n| n.text_content())
            .collect()
    }

    #[test]
    fn test_diagnostics_error_payloads_render_notices() {
        let report = Report::from_value(json!({
            "Performance by Entry Tag": {"error": "Column 'entry_tag' not found in trades"},
            "Exit Logic Diagnostics": {"error": "Column 'exit_tag' not found in trades"},
        }))
        .unwrap();

        let mut doc = document("diagnostics-table");
        let outcome = RowTableRenderer::diagnostics()
            .render(&report, &mut doc, &mut PlotlyAdapter::new())
            .unwrap();

        assert!(outcome.is_rendered());
        assert_eq!(
            titles(&doc, "diagnostics-table"),
            ["Performance by Entry Tag", "Exit Logic Diagnostics"]
        );
        assert_eq!(
            notices(&doc, "diagnostics-table"),
            [
                "Column 'entry_tag' not found in trades",
                "Column 'exit_tag' not found in trades",
            ]
        );
    }

    #[test]
    fn test_error_notice_next_to_rows() {
        let report = Report::from_value(json!({
            "Performance by Entry Tag": {"error": "Column 'entry_tag' not found in trades"},
            "Exit Logic Diagnostics": {"rows": [{"Exit tag": "stop_loss", "Trades": 7}]},
        }))
        .unwrap();

        let mut doc = document("diagnostics-table");
        RowTableRenderer::diagnostics()
            .render(&report, &mut doc, &mut PlotlyAdapter::new())
            .unwrap();

        let mount = doc.get_element_by_id("diagnostics-table").unwrap();
        assert_eq!(mount.descendants_by_tag("table").len(), 1);
        assert_eq!(
            notices(&doc, "diagnostics-table"),
            ["Column 'entry_tag' not found in trades"]
        );
    }

    #[test]
    fn test_conditional_expectancy_error_payload_renders_notice() {
        let report = Report::from_value(json!({
            "Conditional Expectancy Analysis": {"error": "No trades available"},
        }))
        .unwrap();

        let mut doc = document("conditional-expectancy-table");
        let outcome = RowTableRenderer::conditional_expectancy()
            .render(&report, &mut doc, &mut PlotlyAdapter::new())
            .unwrap();

        assert!(outcome.is_rendered());
        assert_eq!(
            titles(&doc, "conditional-expectancy-table"),
            ["Conditional Expectancy Analysis"]
        );
        assert_eq!(
            notices(&doc, "conditional-expectancy-table"),
            ["No trades available"]
        );
    }

    #[test]
    fn test_sections_without_rows_skip() {
        let report = Report::from_value(json!({
            "Conditional Expectancy Analysis": {"By hour": {"rows": []}, "notes": "n/a"},
        }))
        .unwrap();

        let mut doc = document("conditional-expectancy-table");
        let outcome = RowTableRenderer::conditional_expectancy()
            .render(&report, &mut doc, &mut PlotlyAdapter::new())
            .unwrap();

        assert_eq!(outcome, RenderOutcome::Skipped(SkipReason::MissingData("rows")));
        assert!(doc.get_element_by_id("conditional-expectancy-table").unwrap().is_empty());
    }

    #[test]
    fn test_missing_mount_is_noop() {
        let report = Report::from_value(json!({
            "Conditional Entry Tag Performance": {"By session": {"rows": [{"a": 1}]}},
        }))
        .unwrap();
        let mut doc = Document::new();
        let outcome = RowTableRenderer::conditional_entry_tag()
            .render(&report, &mut doc, &mut PlotlyAdapter::new())
            .unwrap();

        assert!(!outcome.is_rendered());
        assert_eq!(doc, Document::new());
    }
}
