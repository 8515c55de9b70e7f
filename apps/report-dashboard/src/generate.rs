//! Report-to-page pipeline.

use std::path::Path;

use crate::chart::PlotlyAdapter;
use crate::config::DashboardConfig;
use crate::dashboard::{Dashboard, RenderSummary};
use crate::error::DashboardError;
use crate::page::DashboardPage;
use crate::report::Report;

/// Render `report` into a standalone HTML page.
#[must_use]
pub fn render_html(report: Report, config: &DashboardConfig) -> (String, RenderSummary) {
    render_page(report, config, &DashboardPage::from_config(config))
}

fn render_page(
    report: Report,
    config: &DashboardConfig,
    page: &DashboardPage,
) -> (String, RenderSummary) {
    let dashboard = Dashboard::new(report, &config.theme);
    let mut document = page.skeleton();
    let mut charts = PlotlyAdapter::new();

    let summary = dashboard.render(&mut document, &mut charts);
    (page.to_html(&document, &charts), summary)
}

/// Read `report_path`, render it and write the page to `output_path`.
///
/// Parent directories of `output_path` are created as needed.
pub fn generate(
    report_path: &Path,
    output_path: &Path,
    config: &DashboardConfig,
) -> Result<RenderSummary, DashboardError> {
    let report = Report::load(report_path)?;
    tracing::info!(
        report = %report_path.display(),
        sections = report.len(),
        "report loaded"
    );

    let (html, summary) = render_html(report, config);

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| DashboardError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(output_path, html).map_err(|source| DashboardError::Write {
        path: output_path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        output = %output_path.display(),
        rendered = summary.rendered.len(),
        "dashboard written"
    );
    Ok(summary)
}
