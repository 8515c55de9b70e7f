//! Dashboard orchestrator.
//!
//! Runs every section renderer exactly once, in a fixed order, against one
//! document and one chart adapter. Renderers do not see each other's
//! results; a failing renderer is logged and the sequence continues.

use crate::chart::ChartAdapter;
use crate::config::ThemeConfig;
use crate::dom::Document;
use crate::report::Report;
use crate::sections::{
    CategoryCardRenderer, DistributionRenderer, EquityCurveRenderer, MetricTableRenderer,
    RenderOutcome, RowTableRenderer, SectionOverviewRenderer, SectionRenderer, SkipReason,
};

/// What happened to each renderer during one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Renderers that wrote content, in call order.
    pub rendered: Vec<&'static str>,
    /// Renderers that were no-ops, with the reason.
    pub skipped: Vec<(&'static str, SkipReason)>,
    /// Renderers that failed, with the error message.
    pub failed: Vec<(&'static str, String)>,
}

impl RenderSummary {
    /// Total number of renderers invoked.
    #[must_use]
    pub fn total(&self) -> usize {
        self.rendered.len() + self.skipped.len() + self.failed.len()
    }
}

/// The renderers for a full dashboard, in display order.
#[must_use]
pub fn default_renderers(theme: &ThemeConfig) -> Vec<Box<dyn SectionRenderer>> {
    vec![
        Box::new(CategoryCardRenderer::backtest_config()),
        Box::new(MetricTableRenderer::kpi()),
        Box::new(DistributionRenderer::trade_distribution(theme.clone())),
        Box::new(RowTableRenderer::conditional_expectancy()),
        Box::new(EquityCurveRenderer::new(theme.clone())),
        Box::new(RowTableRenderer::diagnostics()),
        Box::new(SectionOverviewRenderer::drawdown_structure()),
        Box::new(RowTableRenderer::conditional_entry_tag()),
        Box::new(SectionOverviewRenderer::capital_exposure()),
    ]
}

/// Owns a report and the ordered list of renderers.
pub struct Dashboard {
    report: Report,
    renderers: Vec<Box<dyn SectionRenderer>>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("sections", &self.report.len())
            .field(
                "renderers",
                &self.renderers.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Dashboard {
    /// Dashboard with the default renderers.
    #[must_use]
    pub fn new(report: Report, theme: &ThemeConfig) -> Self {
        Self::with_renderers(report, default_renderers(theme))
    }

    /// Dashboard with an explicit renderer list.
    #[must_use]
    pub fn with_renderers(report: Report, renderers: Vec<Box<dyn SectionRenderer>>) -> Self {
        Self { report, renderers }
    }

    /// The report being rendered.
    #[must_use]
    pub const fn report(&self) -> &Report {
        &self.report
    }

    /// Renderer names, in call order.
    pub fn renderer_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.renderers.iter().map(|r| r.name())
    }

    /// Run every renderer once, in order.
    pub fn render(&self, document: &mut Document, charts: &mut dyn ChartAdapter) -> RenderSummary {
        let mut summary = RenderSummary::default();

        for renderer in &self.renderers {
            let name = renderer.name();
            let span = tracing::info_span!("section.render", section = name);
            let _guard = span.enter();

            match renderer.render(&self.report, document, charts) {
                Ok(RenderOutcome::Rendered) => summary.rendered.push(name),
                Ok(RenderOutcome::Skipped(reason)) => summary.skipped.push((name, reason)),
                Err(e) => {
                    tracing::warn!(section = name, error = %e, "section render failed");
                    summary.failed.push((name, e.to_string()));
                }
            }
        }

        tracing::info!(
            rendered = summary.rendered.len(),
            skipped = summary.skipped.len(),
            failed = summary.failed.len(),
            "dashboard rendered"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::json;

    use super::*;
    use crate::chart::{ChartError, PlotlyAdapter};
    use crate::page::DashboardPage;
    use crate::sections::RenderError;

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
        fail: bool,
    }

    impl SectionRenderer for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn render(
            &self,
            _report: &Report,
            _document: &mut Document,
            _charts: &mut dyn ChartAdapter,
        ) -> Result<RenderOutcome, RenderError> {
            self.log.borrow_mut().push(self.name);
            if self.fail {
                let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
                return Err(ChartError::Serialize {
                    mount_id: self.name.to_string(),
                    source,
                }
                .into());
            }
            Ok(RenderOutcome::Rendered)
        }
    }

    fn recorder(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>, fail: bool) -> Box<dyn SectionRenderer> {
        Box::new(Recorder {
            name,
            log: Rc::clone(log),
            fail,
        })
    }

    #[test]
    fn test_default_order() {
        let dashboard = Dashboard::new(Report::default(), &ThemeConfig::default());
        let names: Vec<_> = dashboard.renderer_names().collect();
        assert_eq!(
            names,
            [
                "backtest_config",
                "kpi",
                "trade_distribution",
                "conditional_expectancy",
                "equity_drawdown",
                "diagnostics",
                "drawdown_structure",
                "conditional_entry_tag",
                "capital_exposure",
            ]
        );
    }

    #[test]
    fn test_each_renderer_called_once_and_failures_isolated() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let dashboard = Dashboard::with_renderers(
            Report::default(),
            vec![
                recorder("first", &log, false),
                recorder("broken", &log, true),
                recorder("last", &log, false),
            ],
        );

        let summary = dashboard.render(&mut Document::new(), &mut PlotlyAdapter::new());

        assert_eq!(*log.borrow(), ["first", "broken", "last"]);
        assert_eq!(summary.rendered, ["first", "last"]);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, "broken");
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn test_empty_report_skips_everything() {
        let dashboard = Dashboard::new(Report::default(), &ThemeConfig::default());
        let mut doc = DashboardPage::default().skeleton();
        let before = doc.clone();
        let mut charts = PlotlyAdapter::new();

        let summary = dashboard.render(&mut doc, &mut charts);

        assert!(summary.rendered.is_empty());
        assert_eq!(summary.skipped.len(), 9);
        assert_eq!(doc, before);
        assert!(charts.calls().is_empty());
    }

    #[test]
    fn test_full_render_is_idempotent() {
        let report = Report::from_value(json!({
            "Core Performance Metrics": {"Total trades": 3, "Profit factor": 1.4},
            "Backtest Configuration & Assumptions": {"Capital Model": {"Leverage": "1x"}},
            "Trade Distribution & Payoff Geometry": {
                "R-multiple distribution": {"rows": [{"Bucket": "0-1R", "Trades": 3, "Share (%)": 100}]},
            },
        }))
        .unwrap();
        let dashboard = Dashboard::new(report, &ThemeConfig::default());
        let mut doc = DashboardPage::default().skeleton();
        let mut charts = PlotlyAdapter::new();

        let first = dashboard.render(&mut doc, &mut charts);
        let snapshot = (doc.clone(), charts.calls().to_vec());
        let second = dashboard.render(&mut doc, &mut charts);

        assert_eq!(first, second);
        assert_eq!(first.rendered, ["backtest_config", "kpi", "trade_distribution"]);
        assert_eq!((doc, charts.calls().to_vec()), snapshot);
    }
}
