//! Shared card and table builders.

use crate::dom::Element;

const RIGHT_ALIGN: &str = "text-align:right;";

/// CSS class names for one family of card grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardStyle {
    /// Grid wrapper class.
    pub grid: &'static str,
    /// Card class.
    pub card: &'static str,
    /// Card title class.
    pub title: &'static str,
    /// Table class.
    pub table: &'static str,
}

impl CardStyle {
    /// KPI cards.
    pub const KPI: Self = Self {
        grid: "kpi-grid",
        card: "kpi-card",
        title: "kpi-title",
        table: "kpi-table",
    };

    /// Backtest configuration cards.
    pub const BT_INFO: Self = Self {
        grid: "bt-info-grid",
        card: "bt-info-card",
        title: "bt-info-title",
        table: "bt-info-table",
    };

    /// Generic section cards (row tables, overviews).
    pub const SECTION: Self = Self {
        grid: "section-grid",
        card: "section-card",
        title: "section-title",
        table: "section-table",
    };

    /// Empty grid wrapper.
    #[must_use]
    pub fn grid(&self) -> Element {
        Element::new("div").with_class(self.grid)
    }
}

/// A `{Metric, Value}` display row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Metric name, verbatim.
    pub metric: String,
    /// Formatted value.
    pub value: String,
}

impl DisplayRow {
    /// Create a display row.
    #[must_use]
    pub fn new(metric: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            value: value.into(),
        }
    }
}

/// Two-column Metric/Value table, values right-aligned.
#[must_use]
pub fn metric_table(rows: &[DisplayRow], class: &str) -> Element {
    let head = Element::new("thead").with_child(
        Element::new("tr")
            .with_child(Element::new("th").with_text("Metric"))
            .with_child(Element::new("th").with_style(RIGHT_ALIGN).with_text("Value")),
    );

    let body = Element::new("tbody").with_children(rows.iter().map(|row| {
        Element::new("tr")
            .with_child(Element::new("td").with_text(row.metric.as_str()))
            .with_child(
                Element::new("td")
                    .with_style(RIGHT_ALIGN)
                    .with_text(row.value.as_str()),
            )
    }));

    Element::new("table")
        .with_class(class)
        .with_child(head)
        .with_child(body)
}

/// Table with a header row and string cells.
#[must_use]
pub fn data_table<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>], class: &str) -> Element {
    let head = Element::new("thead").with_child(
        Element::new("tr")
            .with_children(headers.iter().map(|h| Element::new("th").with_text(h.as_ref()))),
    );

    let body = Element::new("tbody").with_children(rows.iter().map(|cells| {
        Element::new("tr")
            .with_children(cells.iter().map(|c| Element::new("td").with_text(c.as_str())))
    }));

    Element::new("table")
        .with_class(class)
        .with_child(head)
        .with_child(body)
}

/// Titled card wrapping a table or notice.
#[must_use]
pub fn card(style: &CardStyle, title: &str, body: Element) -> Element {
    Element::new("div")
        .with_class(style.card)
        .with_child(Element::new("div").with_class(style.title).with_text(title))
        .with_child(body)
}

/// Paragraph carrying a producer-reported message.
#[must_use]
pub fn notice(message: &str) -> Element {
    Element::new("p").with_class("section-notice").with_text(message)
}
