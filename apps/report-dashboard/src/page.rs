//! Host page.
//!
//! The skeleton carries every mount point the renderers write into, grouped
//! in one `<section>` per dashboard panel. Page assembly wraps the rendered
//! body with the stylesheet, the Plotly script and the recorded chart calls.

use chrono::{DateTime, Utc};

use crate::chart::PlotlyAdapter;
use crate::config::{DashboardConfig, ThemeConfig};
use crate::dom::{Document, Element, escape_attr, escape_text};

#[derive(Debug, Clone, Copy)]
enum Mount {
    Table(&'static str),
    Chart(&'static str),
}

const PANELS: &[(&str, &[Mount])] = &[
    (
        "Backtest Configuration & Assumptions",
        &[Mount::Table("backtest-info-table")],
    ),
    ("Core Performance Metrics", &[Mount::Table("kpi-table")]),
    (
        "Trade Distribution",
        &[
            Mount::Chart("trade-distribution-chart"),
            Mount::Table("trade-distribution-table"),
        ],
    ),
    (
        "Conditional Expectancy",
        &[Mount::Table("conditional-expectancy-table")],
    ),
    (
        "Equity & Drawdown",
        &[Mount::Chart("equity-chart"), Mount::Chart("drawdown-chart")],
    ),
    ("Diagnostics", &[Mount::Table("diagnostics-table")]),
    ("Drawdown Structure", &[Mount::Table("drawdown-structure-table")]),
    (
        "Conditional Entry Tag Performance",
        &[Mount::Table("conditional-entry-tag-table")],
    ),
    ("Capital Exposure", &[Mount::Table("capital-exposure-table")]),
];

/// Page chrome around the rendered sections.
#[derive(Debug, Clone)]
pub struct DashboardPage {
    title: String,
    plotly_src: String,
    theme: ThemeConfig,
    generated_at: DateTime<Utc>,
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

impl DashboardPage {
    /// Page stamped with the current time.
    #[must_use]
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            title: config.output.title.clone(),
            plotly_src: config.output.plotly_src.clone(),
            theme: config.theme.clone(),
            generated_at: Utc::now(),
        }
    }

    /// Override the generation timestamp.
    #[must_use]
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Every mount id in the skeleton, in page order.
    pub fn mount_ids() -> impl Iterator<Item = &'static str> {
        PANELS.iter().flat_map(|(_, mounts)| {
            mounts.iter().map(|m| match *m {
                Mount::Table(id) | Mount::Chart(id) => id,
            })
        })
    }

    /// Empty document with the header and every mount point.
    #[must_use]
    pub fn skeleton(&self) -> Document {
        let header = Element::new("header")
            .with_child(Element::new("h1").with_text(self.title.as_str()))
            .with_child(
                Element::new("p")
                    .with_class("generated")
                    .with_text(format!(
                        "Generated {}",
                        self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
                    )),
            );

        let panels = PANELS.iter().map(|(heading, mounts)| {
            Element::new("section")
                .with_class("panel")
                .with_child(Element::new("h2").with_text(*heading))
                .with_children(mounts.iter().map(|mount| match *mount {
                    Mount::Table(id) => Element::new("div").with_id(id),
                    Mount::Chart(id) => Element::new("div").with_id(id).with_class("chart"),
                }))
        });

        Document::from_body(
            Element::new("body")
                .with_child(header)
                .with_child(Element::new("main").with_children(panels)),
        )
    }

    /// Standalone HTML page.
    #[must_use]
    pub fn to_html(&self, document: &Document, charts: &PlotlyAdapter) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
    <script src="{plotly_src}"></script>
</head>
<body>
{body}
<script>
{script}
</script>
</body>
</html>
"#,
            title = escape_text(&self.title),
            css = self.css(),
            plotly_src = escape_attr(&self.plotly_src),
            body = document.body().inner_html(),
            script = charts.to_script(),
        )
    }

    fn css(&self) -> String {
        let ThemeConfig {
            background,
            font_color,
            bar_color,
            ..
        } = &self.theme;
        format!(
            r"
body {{ margin: 0; padding: 24px; background: #0d1117; color: {font_color}; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif; font-size: 14px; }}
header h1 {{ margin: 0 0 4px 0; font-size: 22px; }}
header .generated {{ margin: 0 0 24px 0; opacity: 0.6; }}
.panel {{ margin-bottom: 32px; }}
.panel h2 {{ font-size: 16px; border-bottom: 1px solid #30363d; padding-bottom: 6px; }}
.chart {{ height: 320px; }}
.kpi-grid, .bt-info-grid, .section-grid {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 16px; }}
.kpi-card, .bt-info-card, .section-card {{ background: {background}; border: 1px solid #30363d; border-radius: 6px; padding: 12px; }}
.kpi-title, .bt-info-title, .section-title {{ font-weight: 600; margin-bottom: 8px; color: {bar_color}; }}
table {{ width: 100%; border-collapse: collapse; }}
th, td {{ padding: 4px 8px; border-bottom: 1px solid #21262d; text-align: left; }}
th {{ font-weight: 600; opacity: 0.8; }}
.section-notice {{ opacity: 0.7; font-style: italic; }}
"
        )
    }
}
