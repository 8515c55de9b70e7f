//! Output page configuration.

use serde::{Deserialize, Serialize};

/// Where and how the dashboard page is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output HTML file.
    #[serde(default = "default_path")]
    pub path: String,
    /// Page title and header text.
    #[serde(default = "default_title")]
    pub title: String,
    /// Plotly bundle loaded by the page.
    #[serde(default = "default_plotly_src")]
    pub plotly_src: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            title: default_title(),
            plotly_src: default_plotly_src(),
        }
    }
}

fn default_path() -> String {
    "dashboard.html".to_string()
}

fn default_title() -> String {
    "Backtest Report".to_string()
}

fn default_plotly_src() -> String {
    "https://cdn.plot.ly/plotly-2.35.0.min.js".to_string()
}
