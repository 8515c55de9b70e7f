//! Chart adapter port.
//!
//! Renderers describe charts declaratively (traces, layout, interaction
//! config) and hand them to a [`ChartAdapter`]. The charting library itself
//! is a black box; [`PlotlyAdapter`] records the calls and emits
//! `Plotly.newPlot` script blocks for the page.

mod plotly;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::ThemeConfig;

pub use plotly::{PlotCall, PlotlyAdapter};

/// Chart adapter errors.
#[derive(Debug, Error)]
pub enum ChartError {
    /// A trace, layout or config could not be serialized.
    #[error("Failed to serialize chart spec for '{mount_id}': {source}")]
    Serialize {
        /// Target mount id.
        mount_id: String,
        /// The underlying serialization error.
        source: serde_json::Error,
    },
}

/// The single call crossing into the charting library.
pub trait ChartAdapter {
    /// Draw (or redraw) a chart into `mount_id`.
    fn new_plot(
        &mut self,
        mount_id: &str,
        traces: &[Trace],
        layout: &Layout,
        config: &PlotConfig,
    ) -> Result<(), ChartError>;
}

/// Trace type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    /// Bar chart.
    Bar,
    /// Line / scatter chart.
    Scatter,
}

/// One data series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    /// Trace type.
    #[serde(rename = "type")]
    pub kind: TraceKind,
    /// X values, in input order.
    pub x: Vec<Value>,
    /// Y values, in input order.
    pub y: Vec<Value>,
    /// Legend name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Scatter mode (`lines`, `markers`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Area fill (`tozeroy`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Marker styling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    /// Line styling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
}

impl Trace {
    /// Bar trace with a solid marker color.
    #[must_use]
    pub fn bar(x: Vec<Value>, y: Vec<Value>, color: &str) -> Self {
        Self {
            kind: TraceKind::Bar,
            x,
            y,
            name: None,
            mode: None,
            fill: None,
            marker: Some(Marker {
                color: color.to_string(),
            }),
            line: None,
        }
    }

    /// Line trace.
    #[must_use]
    pub fn line(name: &str, x: Vec<Value>, y: Vec<Value>, color: &str) -> Self {
        Self {
            kind: TraceKind::Scatter,
            x,
            y,
            name: Some(name.to_string()),
            mode: Some("lines".to_string()),
            fill: None,
            marker: None,
            line: Some(Line {
                color: color.to_string(),
                width: 2.0,
            }),
        }
    }

    /// Fill the area between the trace and zero.
    #[must_use]
    pub fn filled_to_zero(mut self) -> Self {
        self.fill = Some("tozeroy".to_string());
        self
    }
}

/// Marker styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    /// CSS color.
    pub color: String,
}

/// Line styling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    /// CSS color.
    pub color: String,
    /// Width in pixels.
    pub width: f64,
}

/// Plot margins in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Margin {
    /// Top margin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<u32>,
    /// Right margin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<u32>,
    /// Bottom margin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<u32>,
    /// Left margin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub l: Option<u32>,
}

/// Font styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Font {
    /// CSS color.
    pub color: String,
}

/// Axis title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisTitle {
    /// Title text.
    pub text: String,
}

/// Axis options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Axis {
    /// Axis title.
    pub title: AxisTitle,
}

impl Axis {
    /// Axis with a fixed title.
    #[must_use]
    pub fn titled(text: &str) -> Self {
        Self {
            title: AxisTitle {
                text: text.to_string(),
            },
        }
    }
}

/// Layout options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    /// Plot margins.
    pub margin: Margin,
    /// Outer background.
    pub paper_bgcolor: String,
    /// Plot area background.
    pub plot_bgcolor: String,
    /// Global font.
    pub font: Font,
    /// X axis.
    pub xaxis: Axis,
    /// Y axis.
    pub yaxis: Axis,
    /// Legend visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}

impl Layout {
    /// Dark layout from the configured theme.
    #[must_use]
    pub fn dark(theme: &ThemeConfig, x_title: &str, y_title: &str) -> Self {
        Self {
            margin: Margin {
                t: Some(20),
                ..Margin::default()
            },
            paper_bgcolor: theme.background.clone(),
            plot_bgcolor: theme.background.clone(),
            font: Font {
                color: theme.font_color.clone(),
            },
            xaxis: Axis::titled(x_title),
            yaxis: Axis::titled(y_title),
            showlegend: None,
        }
    }
}

/// Interaction config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlotConfig {
    /// Show the floating mode bar.
    #[serde(rename = "displayModeBar")]
    pub display_mode_bar: bool,
    /// Resize with the container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsive: Option<bool>,
}

impl PlotConfig {
    /// Static charts: no mode bar.
    #[must_use]
    pub const fn static_chart() -> Self {
        Self {
            display_mode_bar: false,
            responsive: Some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_bar_trace_shape() {
        let trace = Trace::bar(vec![json!("0-1R")], vec![json!(20)], "#58a6ff");
        assert_eq!(
            serde_json::to_value(&trace).unwrap(),
            json!({
                "type": "bar",
                "x": ["0-1R"],
                "y": [20],
                "marker": {"color": "#58a6ff"},
            })
        );
    }

    #[test]
    fn test_filled_line_trace() {
        let trace = Trace::line("Drawdown", vec![], vec![], "#f85149").filled_to_zero();
        let value = serde_json::to_value(&trace).unwrap();
        assert_eq!(value["type"], "scatter");
        assert_eq!(value["fill"], "tozeroy");
        assert_eq!(value["mode"], "lines");
    }

    #[test]
    fn test_dark_layout_shape() {
        let layout = Layout::dark(&ThemeConfig::default(), "R bucket", "Trades");
        let value = serde_json::to_value(&layout).unwrap();
        assert_eq!(value["margin"], json!({"t": 20}));
        assert_eq!(value["paper_bgcolor"], "#161b22");
        assert_eq!(value["plot_bgcolor"], "#161b22");
        assert_eq!(value["font"]["color"], "#e6edf3");
        assert_eq!(value["xaxis"]["title"]["text"], "R bucket");
        assert_eq!(value["yaxis"]["title"]["text"], "Trades");
        assert!(value.get("showlegend").is_none());
    }

    #[test]
    fn test_static_config_disables_mode_bar() {
        let value = serde_json::to_value(PlotConfig::static_chart()).unwrap();
        assert_eq!(value["displayModeBar"], false);
    }
}
