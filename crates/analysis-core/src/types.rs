use std::fmt;

use serde::{Deserialize, Serialize};

use crate::stats;

/// Financial line items the metric extractor looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    Revenue,
    Profit,
    Debt,
    Asset,
}

impl MetricCategory {
    pub const ALL: [MetricCategory; 4] = [
        MetricCategory::Revenue,
        MetricCategory::Profit,
        MetricCategory::Debt,
        MetricCategory::Asset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricCategory::Revenue => "revenue",
            MetricCategory::Profit => "profit",
            MetricCategory::Debt => "debt",
            MetricCategory::Asset => "asset",
        }
    }
}

/// One labeled number found in the text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractedAmount {
    pub category: MetricCategory,
    pub value: f64,
}

/// Extracted amounts grouped by category, each list in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedMetrics {
    pub revenue: Vec<f64>,
    pub profit: Vec<f64>,
    pub debt: Vec<f64>,
    pub asset: Vec<f64>,
}

impl ExtractedMetrics {
    pub fn values(&self, category: MetricCategory) -> &[f64] {
        match category {
            MetricCategory::Revenue => &self.revenue,
            MetricCategory::Profit => &self.profit,
            MetricCategory::Debt => &self.debt,
            MetricCategory::Asset => &self.asset,
        }
    }

    pub fn values_mut(&mut self, category: MetricCategory) -> &mut Vec<f64> {
        match category {
            MetricCategory::Revenue => &mut self.revenue,
            MetricCategory::Profit => &mut self.profit,
            MetricCategory::Debt => &mut self.debt,
            MetricCategory::Asset => &mut self.asset,
        }
    }

    pub fn mean(&self, category: MetricCategory) -> Option<f64> {
        stats::mean(self.values(category))
    }

    pub fn is_empty(&self) -> bool {
        MetricCategory::ALL.iter().all(|c| self.values(*c).is_empty())
    }

    /// Flattened view, category by category.
    pub fn amounts(&self) -> impl Iterator<Item = ExtractedAmount> + '_ {
        MetricCategory::ALL.into_iter().flat_map(move |category| {
            self.values(category)
                .iter()
                .map(move |&value| ExtractedAmount { category, value })
        })
    }
}

/// Debt-to-income ratio. `Infinite` when the average profit is exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DebtCoverage {
    Finite(f64),
    Infinite,
}

impl DebtCoverage {
    pub fn from_means(avg_debt: f64, avg_profit: f64) -> Self {
        if avg_profit != 0.0 {
            DebtCoverage::Finite(avg_debt / avg_profit)
        } else {
            DebtCoverage::Infinite
        }
    }

    /// Strict comparison against a finite threshold; `Infinite` exceeds everything.
    pub fn exceeds(&self, threshold: f64) -> bool {
        match self {
            DebtCoverage::Finite(ratio) => *ratio > threshold,
            DebtCoverage::Infinite => true,
        }
    }
}

impl fmt::Display for DebtCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebtCoverage::Finite(ratio) => write!(f, "{:.2}", ratio),
            DebtCoverage::Infinite => f.write_str("inf"),
        }
    }
}

/// How much a single insight contributes to the overall risk rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    None,
    Medium,
    High,
}

/// What an insight line talks about. Drives the icon used when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Metric,
    Ratio,
    Assessment,
    Note,
    MarketRisk,
    OperationalRisk,
    NegativeSignal,
    Verdict,
}

/// One human-readable finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub severity: Severity,
    pub message: String,
}

impl Insight {
    pub fn new(kind: InsightKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::None,
            message: message.into(),
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn icon(&self) -> &'static str {
        match (self.kind, self.severity) {
            (InsightKind::Metric, _) => "📊",
            (InsightKind::Ratio, _) => "⚖️",
            (InsightKind::Note, _) => "ℹ️",
            (InsightKind::MarketRisk, _) => "📉",
            (InsightKind::OperationalRisk, _) => "🏭",
            (InsightKind::NegativeSignal, _) => "⚠️",
            (InsightKind::Verdict, _) => "📌",
            (InsightKind::Assessment, Severity::High) => "❌",
            (InsightKind::Assessment, Severity::Medium) => "⚠️",
            (InsightKind::Assessment, Severity::None) => "✅",
        }
    }

    pub fn render(&self) -> String {
        format!("{} {}", self.icon(), self.message)
    }
}

/// Categorical outcome closing an [`AnalysisVerdict`].
pub trait VerdictLabel {
    /// Line rendered instead of the verdict when there is no evidence at all.
    const FALLBACK: &'static str;

    fn headline(&self) -> String;
}

/// Buy / Sell / Hold call of the investment engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Buy => "Buy",
            Recommendation::Sell => "Sell",
            Recommendation::Hold => "Hold",
        }
    }
}

impl VerdictLabel for Recommendation {
    const FALLBACK: &'static str = "No meaningful financial insights extracted.";

    fn headline(&self) -> String {
        format!("Investment Recommendation: {}", self.as_str())
    }
}

/// Overall risk category of the risk engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskRating {
    Low,
    Medium,
    High,
}

impl RiskRating {
    /// 3 and above is high, exactly 2 is medium, anything lower is low.
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 3 => RiskRating::High,
            2 => RiskRating::Medium,
            _ => RiskRating::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskRating::Low => "Low Risk Investment",
            RiskRating::Medium => "Medium Risk Investment",
            RiskRating::High => "High Risk Investment",
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            RiskRating::Low => "🟢",
            RiskRating::Medium => "🟠",
            RiskRating::High => "🔴",
        }
    }
}

impl VerdictLabel for RiskRating {
    const FALLBACK: &'static str = "No significant risks detected.";

    fn headline(&self) -> String {
        format!("Overall Risk Rating: {} {}", self.indicator(), self.as_str())
    }
}

/// Ordered evidence lines plus exactly one categorical label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisVerdict<L> {
    pub insights: Vec<Insight>,
    pub label: L,
}

impl<L: VerdictLabel> AnalysisVerdict<L> {
    pub fn new(insights: Vec<Insight>, label: L) -> Self {
        Self { insights, label }
    }

    pub fn has_evidence(&self) -> bool {
        !self.insights.is_empty()
    }

    /// Evidence lines followed by the label line, or the single fallback line.
    pub fn lines(&self) -> Vec<String> {
        if self.insights.is_empty() {
            return vec![L::FALLBACK.to_string()];
        }
        self.insights
            .iter()
            .map(Insight::render)
            .chain(std::iter::once(
                Insight::new(InsightKind::Verdict, self.label.headline()).render(),
            ))
            .collect()
    }

    pub fn render(&self) -> String {
        self.lines().join("\n")
    }
}
