//! End-to-end rendering tests.
//!
//! Full report JSON → dashboard → page, through the public API and the
//! file pipeline.

// Allow unwrap in tests - tests should panic on unexpected errors
#![allow(clippy::unwrap_used)]

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::{Value, json};

use report_dashboard::sections::{MetricGroup, MetricTableRenderer};
use report_dashboard::{
    Dashboard, DashboardConfig, DashboardPage, Document, Element, PlotlyAdapter, Report,
    SectionKey, SectionRenderer, generate, load_config_from_string,
};

// =============================================================================
// Fixtures
// =============================================================================

fn full_report() -> Value {
    json!({
        "Backtest Configuration & Assumptions": {
            "Market & Data": {"Instruments": ["EURUSD"], "Timeframe": "M5"},
            "Execution Model": {"Spread model": "fixed", "Execution delay": null},
            "Capital Model": {"Starting equity": 10000.0, "Leverage": "1x"},
        },
        "Core Performance Metrics": {
            "Total trades": 120,
            "Final balance": {"raw": 11842.5, "kind": "money"},
            "Win rate (%)": {"raw": 54.2, "kind": "pct", "display": "54.20%"},
            "Profit factor": null,
            "Unlisted metric": 1,
        },
        "Trade Distribution & Payoff Geometry": {
            "R-multiple distribution": {"rows": [
                {"Bucket": "<-2R", "Trades": 5, "Share (%)": 10},
                {"Bucket": "0-1R", "Trades": 20, "Share (%)": 40},
            ]},
        },
        "Conditional Expectancy Analysis": {
            "By hour": {"rows": [{"Hour": 9, "Trades": 14, "Expectancy (R)": 0.21}], "sorted_by": "Hour"},
        },
        "Performance by Entry Tag": {"rows": [{"Entry tag": "breakout", "Trades": 70}]},
        "Exit Logic Diagnostics": {"rows": [{"Exit tag": "stop_loss", "Trades": 50}]},
        "Drawdown Structure": {"error": "No trades available"},
        "Capital Exposure": {"Avg exposure (%)": 35.5, "Time in market (%)": {"raw": 61.0, "kind": "pct"}},
        "__equity__": {
            "time": ["2024-01-01", "2024-01-02"],
            "equity": [10000, 10050],
            "drawdown": [0, 0],
        },
    })
}

fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
}

fn skeleton() -> Document {
    DashboardPage::default().with_generated_at(generated_at()).skeleton()
}

fn render(report: Value) -> (Document, PlotlyAdapter) {
    let report = Report::from_value(report).unwrap();
    let dashboard = Dashboard::new(report, &DashboardConfig::default().theme);
    let mut document = skeleton();
    let mut charts = PlotlyAdapter::new();
    dashboard.render(&mut document, &mut charts);
    (document, charts)
}

fn texts(document: &Document, mount: &str, class: &str) -> Vec<String> {
    document
        .get_element_by_id(mount)
        .unwrap()
        .descendants_by_class(class)
        .iter()
        .map(|el| el.text_content())
        .collect()
}

// =============================================================================
// Full dashboard
// =============================================================================

#[test]
fn test_full_report_fills_every_section() {
    let (document, charts) = render(full_report());

    for mount in [
        "backtest-info-table",
        "kpi-table",
        "trade-distribution-table",
        "conditional-expectancy-table",
        "diagnostics-table",
        "drawdown-structure-table",
        "capital-exposure-table",
    ] {
        assert!(
            !document.get_element_by_id(mount).unwrap().is_empty(),
            "{mount} should have content"
        );
    }

    let mounts: Vec<_> = charts.calls().iter().map(|c| c.mount_id.as_str()).collect();
    assert_eq!(mounts, ["trade-distribution-chart", "equity-chart", "drawdown-chart"]);
}

#[test]
fn test_kpi_cards_format_values() {
    let (document, _) = render(full_report());
    let cells: Vec<String> = document
        .get_element_by_id("kpi-table")
        .unwrap()
        .descendants_by_tag("td")
        .iter()
        .map(|td| td.text_content())
        .collect();

    assert_eq!(
        cells,
        ["Total trades", "120", "Final balance", "11842.5", "Win rate (%)", "54.20%"]
    );
}

#[test]
fn test_config_cards_render_every_key() {
    let (document, _) = render(full_report());
    assert_eq!(
        texts(&document, "backtest-info-table", "bt-info-title"),
        ["Market & Data", "Execution Model", "Capital Model"]
    );

    let html = document.get_element_by_id("backtest-info-table").unwrap().inner_html();
    assert!(html.contains("Market &amp; Data"));
    assert!(html.contains("<td>Execution delay</td>"));
    assert!(html.contains(">10000<"));
}

#[test]
fn test_sibling_sections() {
    let (document, _) = render(full_report());

    assert_eq!(
        texts(&document, "conditional-expectancy-table", "section-title"),
        ["By hour (sorted by Hour)"]
    );
    assert_eq!(
        texts(&document, "diagnostics-table", "section-title"),
        ["Performance by Entry Tag", "Exit Logic Diagnostics"]
    );
    assert_eq!(
        texts(&document, "drawdown-structure-table", "section-notice"),
        ["No trades available"]
    );
    assert_eq!(texts(&document, "capital-exposure-table", "section-title"), ["Summary"]);
}

#[test]
fn test_unknown_sections_are_ignored() {
    let (with_extra, _) = render(json!({
        "Core Performance Metrics": {"Total trades": 1},
        "Something New": {"rows": [{"a": 1}]},
    }));
    let (without, _) = render(json!({"Core Performance Metrics": {"Total trades": 1}}));
    assert_eq!(with_extra, without);
}

#[test]
fn test_missing_table_mount_keeps_chart() {
    let report = Report::from_value(full_report()).unwrap();
    let dashboard = Dashboard::new(report, &DashboardConfig::default().theme);

    let mut document = skeleton();
    let mut charts = PlotlyAdapter::new();
    // A host page without the table mount.
    let Some(table) = document.get_element_by_id_mut("trade-distribution-table") else {
        panic!("skeleton carries the table mount");
    };
    table.set_attr("id", "renamed");

    dashboard.render(&mut document, &mut charts);
    assert!(charts.call("trade-distribution-chart").is_some());
    assert!(document.get_element_by_id("renamed").unwrap().is_empty());
}

// =============================================================================
// File pipeline
// =============================================================================

#[test]
fn test_generate_writes_page() {
    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("report.json");
    let output_path = dir.path().join("nested/out/dashboard.html");
    std::fs::write(&report_path, full_report().to_string()).unwrap();

    let config = load_config_from_string(
        r#"
output:
  title: "Run 42"
"#,
    )
    .unwrap();
    let summary = generate(&report_path, &output_path, &config).unwrap();

    assert_eq!(summary.total(), 9);
    assert!(summary.failed.is_empty());

    let html = std::fs::read_to_string(&output_path).unwrap();
    assert!(html.contains("<title>Run 42</title>"));
    assert!(html.contains("Plotly.newPlot(\"trade-distribution-chart\""));
    assert!(html.contains("plotly-2.35.0.min.js"));
}

#[test]
fn test_generate_rejects_non_object_report() {
    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("report.json");
    std::fs::write(&report_path, "[]").unwrap();

    let err = generate(
        &report_path,
        &dir.path().join("dashboard.html"),
        &DashboardConfig::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("must be a JSON object"));
}

// =============================================================================
// Properties
// =============================================================================

const PROP_GROUPS: &[MetricGroup] = &[MetricGroup {
    title: "Props",
    metrics: &["m0", "m1", "m2", "m3", "m4", "m5"],
}];

proptest! {
    #[test]
    fn prop_metric_rows_follow_declared_order(
        present in proptest::collection::vec(any::<bool>(), 6),
        values in proptest::collection::vec(-1.0e6f64..1.0e6, 6),
    ) {
        // Payload inserted in reverse so it never matches the declared order.
        let mut payload = serde_json::Map::new();
        for i in (0..6).rev() {
            if present[i] {
                payload.insert(format!("m{i}"), json!(values[i]));
            }
        }
        let report = Report::from_value(json!({ "Core Performance Metrics": payload })).unwrap();

        let mut document = Document::from_body(
            Element::new("body").with_child(Element::new("div").with_id("kpi-table")),
        );
        MetricTableRenderer::new("kpi-table", SectionKey::CorePerformance, PROP_GROUPS)
            .render(&report, &mut document, &mut PlotlyAdapter::new())
            .unwrap();

        let names: Vec<String> = document
            .get_element_by_id("kpi-table")
            .unwrap()
            .descendants_by_tag("tr")
            .iter()
            .skip(1)
            .map(|tr| tr.child_elements().next().unwrap().text_content())
            .collect();
        let expected: Vec<String> = (0..6).filter(|&i| present[i]).map(|i| format!("m{i}")).collect();
        prop_assert_eq!(names, expected);
    }
}
