//! Equity and drawdown charts.

use serde_json::{Map, Value};

use super::{RenderError, RenderOutcome, SectionRenderer, SkipReason, skip};
use crate::chart::{ChartAdapter, Layout, PlotConfig, Trace};
use crate::config::ThemeConfig;
use crate::dom::Document;
use crate::report::{Report, SectionKey};

/// Draws `__equity__ = {time, equity, drawdown}` as two line charts.
#[derive(Debug, Clone)]
pub struct EquityCurveRenderer {
    equity_mount: &'static str,
    drawdown_mount: &'static str,
    theme: ThemeConfig,
}

impl EquityCurveRenderer {
    /// Renderer drawing into `equity-chart` and `drawdown-chart`.
    #[must_use]
    pub const fn new(theme: ThemeConfig) -> Self {
        Self {
            equity_mount: "equity-chart",
            drawdown_mount: "drawdown-chart",
            theme,
        }
    }
}

struct Series<'a> {
    time: &'a [Value],
    equity: &'a [Value],
    drawdown: &'a [Value],
}

fn series(payload: &Map<String, Value>) -> Option<Series<'_>> {
    let field = |name: &str| payload.get(name).and_then(Value::as_array).map(Vec::as_slice);
    Some(Series {
        time: field("time")?,
        equity: field("equity")?,
        drawdown: field("drawdown")?,
    })
}

impl SectionRenderer for EquityCurveRenderer {
    fn name(&self) -> &'static str {
        "equity_drawdown"
    }

    fn render(
        &self,
        report: &Report,
        document: &mut Document,
        charts: &mut dyn ChartAdapter,
    ) -> Result<RenderOutcome, RenderError> {
        let Some(payload) = report.section(SectionKey::EquitySeries) else {
            return Ok(skip(self.name(), SkipReason::MissingSection(SectionKey::EquitySeries)));
        };
        let Some(series) = series(payload) else {
            return Ok(skip(self.name(), SkipReason::MissingData("time/equity/drawdown")));
        };
        if series.equity.len() != series.time.len() || series.drawdown.len() != series.time.len() {
            tracing::warn!(
                time = series.time.len(),
                equity = series.equity.len(),
                drawdown = series.drawdown.len(),
                "equity series lengths differ"
            );
            return Ok(skip(self.name(), SkipReason::Malformed("series lengths differ")));
        }

        let equity_present = document.get_element_by_id(self.equity_mount).is_some();
        let drawdown_present = document.get_element_by_id(self.drawdown_mount).is_some();
        if !equity_present && !drawdown_present {
            return Ok(skip(self.name(), SkipReason::MissingMount(self.equity_mount)));
        }

        let config = PlotConfig::static_chart();

        if equity_present {
            let equity = Trace::line(
                "Equity",
                series.time.to_vec(),
                series.equity.to_vec(),
                &self.theme.equity_color,
            );
            let layout = Layout::dark(&self.theme, "Time", "Equity");
            charts.new_plot(self.equity_mount, &[equity], &layout, &config)?;
        } else {
            tracing::debug!(mount = self.equity_mount, "equity chart mount absent");
        }

        if drawdown_present {
            let drawdown = Trace::line(
                "Drawdown",
                series.time.to_vec(),
                series.drawdown.to_vec(),
                &self.theme.drawdown_color,
            )
            .filled_to_zero();
            let layout = Layout::dark(&self.theme, "Time", "Drawdown");
            charts.new_plot(self.drawdown_mount, &[drawdown], &layout, &config)?;
        } else {
            tracing::debug!(mount = self.drawdown_mount, "drawdown chart mount absent");
        }

        Ok(RenderOutcome::Rendered)
    }
}
