//! Chart colors.

use serde::{Deserialize, Serialize};

/// Dark chart palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Distribution bar color.
    #[serde(default = "default_bar_color")]
    pub bar_color: String,
    /// Paper and plot background.
    #[serde(default = "default_background")]
    pub background: String,
    /// Axis and label font color.
    #[serde(default = "default_font_color")]
    pub font_color: String,
    /// Equity line color.
    #[serde(default = "default_equity_color")]
    pub equity_color: String,
    /// Drawdown area color.
    #[serde(default = "default_drawdown_color")]
    pub drawdown_color: String,
}

impl ThemeConfig {
    /// Every color setting with its field name, for validation.
    #[must_use]
    pub fn colors(&self) -> [(&'static str, &str); 5] {
        [
            ("bar_color", self.bar_color.as_str()),
            ("background", self.background.as_str()),
            ("font_color", self.font_color.as_str()),
            ("equity_color", self.equity_color.as_str()),
            ("drawdown_color", self.drawdown_color.as_str()),
        ]
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            bar_color: default_bar_color(),
            background: default_background(),
            font_color: default_font_color(),
            equity_color: default_equity_color(),
            drawdown_color: default_drawdown_color(),
        }
    }
}

fn default_bar_color() -> String {
    "#58a6ff".to_string()
}

fn default_background() -> String {
    "#161b22".to_string()
}

fn default_font_color() -> String {
    "#e6edf3".to_string()
}

fn default_equity_color() -> String {
    "#3fb950".to_string()
}

fn default_drawdown_color() -> String {
    "#f85149".to_string()
}
