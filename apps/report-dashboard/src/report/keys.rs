//! Typed section keys.
//!
//! Section titles are the wire contract between the backtest engine and this
//! renderer. A rename on the producer side makes the section look absent,
//! which every renderer treats as a no-op.

use std::fmt;

/// A known top-level report section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKey {
    /// Headline KPIs (flat metric mapping).
    CorePerformance,
    /// Backtest configuration, grouped by category.
    BacktestConfig,
    /// R-multiple distribution and payoff summary.
    TradeDistribution,
    /// Expectancy grouped by hour, weekday and context columns.
    ConditionalExpectancy,
    /// Per entry tag performance rows.
    EntryTagPerformance,
    /// Per exit tag diagnostic rows.
    ExitLogicDiagnostics,
    /// Entry tag performance split by context.
    ConditionalEntryTag,
    /// Drawdown episodes and recovery statistics.
    DrawdownStructure,
    /// Capital usage and exposure statistics.
    CapitalExposure,
    /// Tail risk statistics.
    TailRisk,
    /// Equity and drawdown series attached next to the report sections.
    EquitySeries,
}

impl SectionKey {
    /// Every known section, in report production order.
    pub const ALL: [Self; 11] = [
        Self::BacktestConfig,
        Self::CorePerformance,
        Self::TradeDistribution,
        Self::TailRisk,
        Self::ConditionalExpectancy,
        Self::EntryTagPerformance,
        Self::ConditionalEntryTag,
        Self::ExitLogicDiagnostics,
        Self::DrawdownStructure,
        Self::CapitalExposure,
        Self::EquitySeries,
    ];

    /// Section title as it appears in the report.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CorePerformance => "Core Performance Metrics",
            Self::BacktestConfig => "Backtest Configuration & Assumptions",
            Self::TradeDistribution => "Trade Distribution & Payoff Geometry",
            Self::ConditionalExpectancy => "Conditional Expectancy Analysis",
            Self::EntryTagPerformance => "Performance by Entry Tag",
            Self::ExitLogicDiagnostics => "Exit Logic Diagnostics",
            Self::ConditionalEntryTag => "Conditional Entry Tag Performance",
            Self::DrawdownStructure => "Drawdown Structure",
            Self::CapitalExposure => "Capital Exposure",
            Self::TailRisk => "Tail Risk",
            Self::EquitySeries => "__equity__",
        }
    }

    /// Look up a section by its report title.
    #[must_use]
    pub fn from_title(title: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == title)
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
