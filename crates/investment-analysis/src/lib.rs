use analysis_core::{
    stats, AnalysisVerdict, DebtCoverage, DocumentAnalyzer, DocumentText, ExtractedMetrics,
    Insight, InsightKind, KeywordTable, MetricCategory, Recommendation, Severity, Vocabulary,
};
use metric_extractor::MetricExtractor;
use serde::{Deserialize, Serialize};

/// Margin above which a positive outlook turns into a Buy (exclusive).
pub const BUY_MARGIN_THRESHOLD: f64 = 15.0;
/// Margin below which the call is Sell (exclusive).
pub const SELL_MARGIN_THRESHOLD: f64 = 5.0;

const CATEGORIES: [MetricCategory; 3] = [
    MetricCategory::Revenue,
    MetricCategory::Profit,
    MetricCategory::Debt,
];

/// Direction of the keyword sentiment tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outlook {
    Positive,
    Negative,
    Neutral,
}

/// Keyword hit counts, with repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub positive_hits: usize,
    pub negative_hits: usize,
}

impl SentimentScore {
    pub fn outlook(&self) -> Outlook {
        if self.positive_hits > self.negative_hits {
            Outlook::Positive
        } else if self.negative_hits > self.positive_hits {
            Outlook::Negative
        } else {
            Outlook::Neutral
        }
    }

    fn insight(&self) -> Insight {
        match self.outlook() {
            Outlook::Positive => {
                Insight::new(InsightKind::Assessment, "Positive financial outlook detected.")
            }
            Outlook::Negative => {
                Insight::new(InsightKind::Assessment, "Negative financial risks detected.")
                    .with_severity(Severity::Medium)
            }
            Outlook::Neutral => Insight::new(InsightKind::Note, "Neutral outlook."),
        }
    }
}

/// Ratios computed from the extracted amounts. Absent when inputs are missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvestmentMetrics {
    pub average_revenue: Option<f64>,
    pub average_profit: Option<f64>,
    pub profit_margin: Option<f64>,
    pub average_debt: Option<f64>,
    pub debt_to_income: Option<DebtCoverage>,
}

/// Output of [`InvestmentInsightEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentAssessment {
    pub metrics: InvestmentMetrics,
    pub sentiment: SentimentScore,
    pub verdict: AnalysisVerdict<Recommendation>,
}

impl InvestmentAssessment {
    pub fn recommendation(&self) -> Recommendation {
        self.verdict.label
    }

    pub fn render(&self) -> String {
        self.verdict.render()
    }
}

/// Profit margin, keyword sentiment and a Buy/Sell/Hold call from report text.
pub struct InvestmentInsightEngine {
    extractor: MetricExtractor,
    positive_words: KeywordTable,
    negative_words: KeywordTable,
}

impl InvestmentInsightEngine {
    pub fn new() -> Self {
        Self::with_config(MetricExtractor::new(), &Vocabulary::default())
    }

    pub fn with_config(extractor: MetricExtractor, vocabulary: &Vocabulary) -> Self {
        Self {
            extractor,
            positive_words: vocabulary.positive_sentiment.clone(),
            negative_words: vocabulary.negative_sentiment.clone(),
        }
    }

    fn calculate_profit_margin(&self, avg_profit: f64, avg_revenue: f64) -> f64 {
        stats::ratio_or(avg_profit, avg_revenue, 0.0) * 100.0
    }

    /// Count positive and negative keyword occurrences in lowercased text.
    pub fn score_sentiment(&self, lowered: &str) -> SentimentScore {
        SentimentScore {
            positive_hits: self.positive_words.count_occurrences(lowered),
            negative_hits: self.negative_words.count_occurrences(lowered),
        }
    }

    fn recommend(&self, profit_margin: Option<f64>, sentiment: &SentimentScore) -> Recommendation {
        let Some(margin) = profit_margin else {
            return Recommendation::Hold;
        };
        let outlook = sentiment.outlook();
        if margin > BUY_MARGIN_THRESHOLD && outlook == Outlook::Positive {
            Recommendation::Buy
        } else if margin < SELL_MARGIN_THRESHOLD || outlook == Outlook::Negative {
            Recommendation::Sell
        } else {
            Recommendation::Hold
        }
    }

    pub fn analyze_text(&self, text: &str) -> InvestmentAssessment {
        self.analyze(&DocumentText::from_text(text))
    }

    fn analyze_normalized(&self, normalized: &str) -> InvestmentAssessment {
        let extracted = self.extractor.extract_categories(normalized, &CATEGORIES);
        self.assess(&extracted, &normalized.to_lowercase())
    }

    /// Scores figures that were already extracted, with `lowered` the
    /// normalized document text in lowercase.
    pub fn assess(&self, extracted: &ExtractedMetrics, lowered: &str) -> InvestmentAssessment {
        let mut insights = Vec::new();
        let mut metrics = InvestmentMetrics::default();

        // Profitability
        if let (Some(avg_revenue), Some(avg_profit)) = (
            extracted.mean(MetricCategory::Revenue),
            extracted.mean(MetricCategory::Profit),
        ) {
            let margin = self.calculate_profit_margin(avg_profit, avg_revenue);
            metrics.average_revenue = Some(avg_revenue);
            metrics.average_profit = Some(avg_profit);
            metrics.profit_margin = Some(margin);

            insights.push(Insight::new(
                InsightKind::Metric,
                format!("Average Revenue: {}", stats::format_currency(avg_revenue)),
            ));
            insights.push(Insight::new(
                InsightKind::Metric,
                format!("Average Profit: {}", stats::format_currency(avg_profit)),
            ));
            insights.push(Insight::new(
                InsightKind::Metric,
                format!("Profit Margin: {:.2}%", margin),
            ));
        }

        // Leverage
        if let (Some(avg_debt), Some(avg_profit)) = (
            extracted.mean(MetricCategory::Debt),
            extracted.mean(MetricCategory::Profit),
        ) {
            let coverage = DebtCoverage::from_means(avg_debt, avg_profit);
            metrics.average_debt = Some(avg_debt);
            metrics.debt_to_income = Some(coverage);

            insights.push(Insight::new(
                InsightKind::Ratio,
                format!("Avg Debt: {}", stats::format_currency(avg_debt)),
            ));
            insights.push(Insight::new(
                InsightKind::Ratio,
                format!("Debt-to-Income Ratio: {}", coverage),
            ));
        }

        let sentiment = self.score_sentiment(lowered);
        insights.push(sentiment.insight());

        let recommendation = self.recommend(metrics.profit_margin, &sentiment);

        tracing::debug!(
            revenues = extracted.revenue.len(),
            profits = extracted.profit.len(),
            debts = extracted.debt.len(),
            positive_hits = sentiment.positive_hits,
            negative_hits = sentiment.negative_hits,
            recommendation = recommendation.as_str(),
            "Investment analysis complete"
        );

        InvestmentAssessment {
            metrics,
            sentiment,
            verdict: AnalysisVerdict::new(insights, recommendation),
        }
    }
}

impl DocumentAnalyzer for InvestmentInsightEngine {
    type Output = InvestmentAssessment;

    fn analyze(&self, document: &DocumentText) -> InvestmentAssessment {
        self.analyze_normalized(&document.normalized())
    }
}

impl Default for InvestmentInsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
