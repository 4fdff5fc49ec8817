use std::time::Instant;

use analysis_core::{DocumentText, ExtractedMetrics, MetricCategory, Vocabulary};
use chrono::{DateTime, Utc};
use investment_analysis::{InvestmentAssessment, InvestmentInsightEngine};
use metric_extractor::{MetricExtractor, NumeralPolicy};
use risk_assessment::{RiskAssessment, RiskAssessmentEngine};
use serde::{Deserialize, Serialize};

pub const DEFAULT_QUERY: &str = "Analyze this financial document for investment insights";

/// Trimmed query, or [`DEFAULT_QUERY`] when missing or blank.
pub fn normalize_query(query: Option<&str>) -> String {
    match query.map(str::trim) {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => DEFAULT_QUERY.to_string(),
    }
}

/// Knobs shared by every engine the orchestrator builds.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSettings {
    pub numeral_policy: NumeralPolicy,
    pub vocabulary: Vocabulary,
}

/// Everything produced for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub query: String,
    pub page_count: usize,
    pub extracted: ExtractedMetrics,
    pub investment: InvestmentAssessment,
    pub risk: RiskAssessment,
    /// Both verdicts rendered as one readable block.
    pub summary: String,
    pub analyzed_at: DateTime<Utc>,
}

/// Runs the extraction, investment and risk steps over one document.
///
/// Holds no per-request state; share one instance behind an `Arc`.
pub struct DocumentAnalysisOrchestrator {
    extractor: MetricExtractor,
    investment_engine: InvestmentInsightEngine,
    risk_engine: RiskAssessmentEngine,
}

impl DocumentAnalysisOrchestrator {
    pub fn new() -> Self {
        Self::with_settings(&AnalysisSettings::default())
    }

    pub fn with_settings(settings: &AnalysisSettings) -> Self {
        let extractor = MetricExtractor::with_policy(settings.numeral_policy);
        Self {
            extractor,
            investment_engine: InvestmentInsightEngine::with_config(
                extractor,
                &settings.vocabulary,
            ),
            risk_engine: RiskAssessmentEngine::with_config(extractor, &settings.vocabulary),
        }
    }

    pub fn numeral_policy(&self) -> NumeralPolicy {
        self.extractor.policy()
    }

    pub fn analyze(&self, query: &str, document: &DocumentText) -> DocumentReport {
        let started = Instant::now();

        if document.is_blank() {
            tracing::warn!(pages = document.page_count(), "Document has no extractable text");
        }

        // One normalization and one extraction pass feed both engines.
        let normalized = document.normalized();
        let lowered = normalized.to_lowercase();
        let extracted = self
            .extractor
            .extract_categories(&normalized, &MetricCategory::ALL);
        let investment = self.investment_engine.assess(&extracted, &lowered);
        let risk = self.risk_engine.assess(&extracted, &lowered);
        let summary = compose_summary(&investment, &risk);

        tracing::info!(
            pages = document.page_count(),
            recommendation = investment.recommendation().as_str(),
            risk_rating = risk.rating().as_str(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Document analysis complete"
        );

        DocumentReport {
            query: query.to_string(),
            page_count: document.page_count(),
            extracted,
            investment,
            risk,
            summary,
            analyzed_at: Utc::now(),
        }
    }
}

impl Default for DocumentAnalysisOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

fn compose_summary(investment: &InvestmentAssessment, risk: &RiskAssessment) -> String {
    format!(
        "Investment Analysis:\n{}\n\nRisk Assessment:\n{}",
        investment.render(),
        risk.render()
    )
}
