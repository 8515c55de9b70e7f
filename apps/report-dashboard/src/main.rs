//! Report Dashboard Binary
//!
//! Renders a backtest `report.json` into a standalone `dashboard.html`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin report-dashboard -- results/report.json results/dashboard.html
//! ```
//!
//! # Environment Variables
//!
//! - `DASHBOARD_CONFIG`: YAML config path (default: `dashboard.yaml` if present)
//! - `REPORT_PATH`: input report (default: `report.json`; first argument wins)
//! - `DASHBOARD_OUTPUT`: output page (default: `output.path`; second argument wins)
//! - `RUST_LOG`: log filter (default: `observability.logging.level`)

use std::path::{Path, PathBuf};

use anyhow::Context;
use report_dashboard::config::DEFAULT_CONFIG_PATH;
use report_dashboard::telemetry::init_tracing;
use report_dashboard::{DashboardConfig, generate, load_config};

/// Default input report path.
const DEFAULT_REPORT_PATH: &str = "report.json";

fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config = resolve_config()?;
    init_tracing(&config.observability.logging).context("failed to initialize tracing")?;

    let mut args = std::env::args().skip(1);
    let report_path = args
        .next()
        .or_else(|| std::env::var("REPORT_PATH").ok())
        .map_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH), PathBuf::from);
    let output_path = args
        .next()
        .or_else(|| std::env::var("DASHBOARD_OUTPUT").ok())
        .map_or_else(|| PathBuf::from(&config.output.path), PathBuf::from);

    tracing::info!(
        report = %report_path.display(),
        output = %output_path.display(),
        "Rendering backtest dashboard"
    );

    let summary = generate(&report_path, &output_path, &config).with_context(|| {
        format!(
            "failed to render {} into {}",
            report_path.display(),
            output_path.display()
        )
    })?;

    for (section, reason) in &summary.skipped {
        tracing::debug!(section, ?reason, "section not rendered");
    }
    for (section, error) in &summary.failed {
        tracing::warn!(section, error = %error, "section failed");
    }

    tracing::info!(
        rendered = summary.rendered.len(),
        skipped = summary.skipped.len(),
        failed = summary.failed.len(),
        "Dashboard complete"
    );
    Ok(())
}

/// Load configuration: `DASHBOARD_CONFIG`, else `dashboard.yaml` if present, else defaults.
fn resolve_config() -> anyhow::Result<DashboardConfig> {
    if let Ok(path) = std::env::var("DASHBOARD_CONFIG") {
        return load_config(Some(&path)).with_context(|| format!("failed to load config {path}"));
    }
    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        return load_config(None).context("failed to load dashboard.yaml");
    }
    Ok(DashboardConfig::default())
}

/// Load `.env` from the working directory or the nearest ancestor.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}
