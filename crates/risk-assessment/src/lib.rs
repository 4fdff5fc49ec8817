//! Risk Assessment Engine
//!
//! Rates a financial report Low / Medium / High risk from two leverage ratios
//! and three keyword vocabularies. Each finding carries a [`Severity`]; the
//! overall score is 2 if any finding is high severity plus 1 if any is medium.

use analysis_core::{
    stats, AnalysisVerdict, DebtCoverage, DocumentAnalyzer, DocumentText, ExtractedMetrics,
    Insight, InsightKind, KeywordTable, MetricCategory, RiskRating, Severity, Vocabulary,
};
use metric_extractor::MetricExtractor;
use serde::{Deserialize, Serialize};

pub const SOLVENCY_HIGH_THRESHOLD: f64 = 0.6;
pub const SOLVENCY_MODERATE_THRESHOLD: f64 = 0.4;
pub const SERVICING_HIGH_THRESHOLD: f64 = 4.0;
pub const SERVICING_MODERATE_THRESHOLD: f64 = 2.0;

const CATEGORIES: [MetricCategory; 3] = [
    MetricCategory::Debt,
    MetricCategory::Asset,
    MetricCategory::Profit,
];

/// Qualitative risk vocabularies, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Market,
    Operational,
    NegativeSignal,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 3] = [
        RiskCategory::Market,
        RiskCategory::Operational,
        RiskCategory::NegativeSignal,
    ];

    fn title(&self) -> &'static str {
        match self {
            RiskCategory::Market => "Market Risks detected",
            RiskCategory::Operational => "Operational Risks detected",
            RiskCategory::NegativeSignal => "Negative Signals",
        }
    }

    fn insight_kind(&self) -> InsightKind {
        match self {
            RiskCategory::Market => InsightKind::MarketRisk,
            RiskCategory::Operational => InsightKind::OperationalRisk,
            RiskCategory::NegativeSignal => InsightKind::NegativeSignal,
        }
    }

    /// Negative signals count as a medium-severity finding; the other two are informational.
    fn severity(&self) -> Severity {
        match self {
            RiskCategory::NegativeSignal => Severity::Medium,
            _ => Severity::None,
        }
    }
}

/// Keywords of one vocabulary found in the text, in vocabulary order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSignal {
    pub category: RiskCategory,
    pub keywords: Vec<String>,
}

/// Output of [`RiskAssessmentEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub debt_to_assets: Option<f64>,
    pub debt_to_income: Option<DebtCoverage>,
    pub keyword_signals: Vec<KeywordSignal>,
    pub score: u8,
    pub verdict: AnalysisVerdict<RiskRating>,
}

impl RiskAssessment {
    pub fn rating(&self) -> RiskRating {
        self.verdict.label
    }

    pub fn render(&self) -> String {
        self.verdict.render()
    }
}

/// Solvency, debt servicing and keyword risk checks over report text.
pub struct RiskAssessmentEngine {
    extractor: MetricExtractor,
    vocabularies: Vec<(RiskCategory, KeywordTable)>,
}

impl RiskAssessmentEngine {
    pub fn new() -> Self {
        Self::with_config(MetricExtractor::new(), &Vocabulary::default())
    }

    pub fn with_config(extractor: MetricExtractor, vocabulary: &Vocabulary) -> Self {
        let vocabularies = RiskCategory::ALL
            .into_iter()
            .map(|category| {
                let table = match category {
                    RiskCategory::Market => &vocabulary.market_risk,
                    RiskCategory::Operational => &vocabulary.operational_risk,
                    RiskCategory::NegativeSignal => &vocabulary.negative_signals,
                };
                (category, table.clone())
            })
            .collect();
        Self {
            extractor,
            vocabularies,
        }
    }

    fn solvency_insight(&self, debt_to_assets: f64) -> Insight {
        if debt_to_assets > SOLVENCY_HIGH_THRESHOLD {
            Insight::new(
                InsightKind::Assessment,
                "High solvency risk: Company relies heavily on debt.",
            )
            .with_severity(Severity::High)
        } else if debt_to_assets > SOLVENCY_MODERATE_THRESHOLD {
            Insight::new(
                InsightKind::Assessment,
                "Moderate solvency risk: Debt levels may be concerning.",
            )
            .with_severity(Severity::Medium)
        } else {
            Insight::new(InsightKind::Assessment, "Healthy solvency position.")
        }
    }

    fn servicing_insight(&self, debt_to_income: DebtCoverage) -> Insight {
        if debt_to_income.exceeds(SERVICING_HIGH_THRESHOLD) {
            Insight::new(
                InsightKind::Assessment,
                "High debt servicing risk: Profits may not cover obligations.",
            )
            .with_severity(Severity::High)
        } else if debt_to_income.exceeds(SERVICING_MODERATE_THRESHOLD) {
            Insight::new(InsightKind::Assessment, "Moderate debt servicing risk.")
                .with_severity(Severity::Medium)
        } else {
            Insight::new(
                InsightKind::Assessment,
                "Debt levels manageable relative to income.",
            )
        }
    }

    /// Presence-only keyword detection; vocabularies with no hit are omitted.
    pub fn detect_keywords(&self, lowered: &str) -> Vec<KeywordSignal> {
        self.vocabularies
            .iter()
            .filter_map(|(category, table)| {
                let hits = table.matches_in(lowered);
                if hits.is_empty() {
                    None
                } else {
                    Some(KeywordSignal {
                        category: *category,
                        keywords: hits.into_iter().map(str::to_string).collect(),
                    })
                }
            })
            .collect()
    }

    /// 2 for any high-severity finding plus 1 for any medium-severity finding.
    pub fn risk_score(insights: &[Insight]) -> u8 {
        let high = insights.iter().any(|i| i.severity == Severity::High);
        let medium = insights.iter().any(|i| i.severity == Severity::Medium);
        (if high { 2 } else { 0 }) + (if medium { 1 } else { 0 })
    }

    pub fn analyze_text(&self, text: &str) -> RiskAssessment {
        self.analyze(&DocumentText::from_text(text))
    }

    fn analyze_normalized(&self, normalized: &str) -> RiskAssessment {
        let extracted = self.extractor.extract_categories(normalized, &CATEGORIES);
        self.assess(&extracted, &normalized.to_lowercase())
    }

    /// Rates figures that were already extracted, with `lowered` the
    /// normalized document text in lowercase.
    pub fn assess(&self, extracted: &ExtractedMetrics, lowered: &str) -> RiskAssessment {
        let mut insights = Vec::new();

        // Liquidity & solvency
        let avg_debt = extracted.mean(MetricCategory::Debt);
        let debt_to_assets = match (avg_debt, extracted.mean(MetricCategory::Asset)) {
            (Some(avg_debt), Some(avg_assets)) => {
                let ratio = stats::ratio_or(avg_debt, avg_assets, 0.0);
                insights.push(Insight::new(
                    InsightKind::Ratio,
                    format!("Debt-to-Assets Ratio: {:.2}", ratio),
                ));
                insights.push(self.solvency_insight(ratio));
                Some(ratio)
            }
            _ => None,
        };

        // Debt servicing
        let debt_to_income = match (avg_debt, extracted.mean(MetricCategory::Profit)) {
            (Some(avg_debt), Some(avg_profit)) => {
                let coverage = DebtCoverage::from_means(avg_debt, avg_profit);
                insights.push(Insight::new(
                    InsightKind::Ratio,
                    format!("Debt-to-Income Ratio: {}", coverage),
                ));
                insights.push(self.servicing_insight(coverage));
                Some(coverage)
            }
            _ => None,
        };

        let keyword_signals = self.detect_keywords(lowered);
        for signal in &keyword_signals {
            insights.push(
                Insight::new(
                    signal.category.insight_kind(),
                    format!("{}: {}", signal.category.title(), signal.keywords.join(", ")),
                )
                .with_severity(signal.category.severity()),
            );
        }

        let score = Self::risk_score(&insights);
        let rating = RiskRating::from_score(score);

        tracing::debug!(
            debts = extracted.debt.len(),
            assets = extracted.asset.len(),
            profits = extracted.profit.len(),
            keyword_categories = keyword_signals.len(),
            score,
            rating = rating.as_str(),
            "Risk assessment complete"
        );

        RiskAssessment {
            debt_to_assets,
            debt_to_income,
            keyword_signals,
            score,
            verdict: AnalysisVerdict::new(insights, rating),
        }
    }
}

impl DocumentAnalyzer for RiskAssessmentEngine {
    type Output = RiskAssessment;

    fn analyze(&self, document: &DocumentText) -> RiskAssessment {
        self.analyze_normalized(&document.normalized())
    }
}

impl Default for RiskAssessmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
