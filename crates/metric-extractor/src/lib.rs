//! Labeled-number extraction from financial report text.
//!
//! Each category is found with a pattern of the form
//! `<label> <any words> [$]<numeral>`: a label word, the shortest run of word
//! and space characters, an optional dollar sign, then a numeral made of
//! digits, commas and dots. Matches never overlap and are reported in
//! document order.

use analysis_core::{
    normalize_whitespace, DocumentText, ExtractedAmount, ExtractedMetrics, MetricCategory,
};
use once_cell::sync::Lazy;
use regex::Regex;

pub mod policy;
pub use policy::{ExtractionError, NumeralPolicy};

/// Label alternatives per category and what must follow the label.
struct LabelRule {
    category: MetricCategory,
    labels: &'static str,
    separator: &'static str,
}

const LABEL_RULES: &[LabelRule] = &[
    // Revenue is the only label that needs whitespace right after it.
    LabelRule {
        category: MetricCategory::Revenue,
        labels: "revenues?",
        separator: r"\s+",
    },
    LabelRule {
        category: MetricCategory::Profit,
        labels: "net income|profit",
        separator: "",
    },
    LabelRule {
        category: MetricCategory::Debt,
        labels: "debt|liabilities",
        separator: "",
    },
    LabelRule {
        category: MetricCategory::Asset,
        labels: "assets?",
        separator: "",
    },
];

static PATTERNS: Lazy<Vec<(MetricCategory, Regex)>> = Lazy::new(|| {
    LABEL_RULES
        .iter()
        .map(|rule| {
            let pattern = format!(
                r"(?i)(?:{}){}[\w\s]*?\$?(?P<amount>[0-9,.]+)",
                rule.labels, rule.separator
            );
            (rule.category, Regex::new(&pattern).unwrap())
        })
        .collect()
});

fn pattern_for(category: MetricCategory) -> &'static Regex {
    PATTERNS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, re)| re)
        .unwrap_or_else(|| unreachable!("every category has a label rule"))
}

/// Pulls revenue, profit, debt and asset figures out of plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricExtractor {
    policy: NumeralPolicy,
}

impl MetricExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: NumeralPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> NumeralPolicy {
        self.policy
    }

    /// Values for one category in already whitespace-normalized text.
    pub fn extract_category(&self, normalized: &str, category: MetricCategory) -> Vec<f64> {
        let mut dropped = 0usize;
        let values: Vec<f64> = pattern_for(category)
            .captures_iter(normalized)
            .filter_map(|caps| {
                let raw = caps.name("amount")?.as_str();
                let parsed = self.policy.parse(raw);
                if parsed.is_none() {
                    dropped += 1;
                }
                parsed
            })
            .collect();

        if dropped > 0 {
            tracing::debug!(
                category = category.as_str(),
                dropped,
                policy = self.policy.as_str(),
                "Dropped numerals rejected by policy"
            );
        }
        values
    }

    /// Extract only the requested categories; the others stay empty.
    pub fn extract_categories(
        &self,
        normalized: &str,
        categories: &[MetricCategory],
    ) -> ExtractedMetrics {
        let mut metrics = ExtractedMetrics::default();
        for &category in categories {
            *metrics.values_mut(category) = self.extract_category(normalized, category);
        }
        metrics
    }

    /// Extract every category from raw text, normalizing whitespace first.
    pub fn extract_text(&self, text: &str) -> ExtractedMetrics {
        self.extract_categories(&normalize_whitespace(text), &MetricCategory::ALL)
    }

    pub fn extract(&self, document: &DocumentText) -> ExtractedMetrics {
        self.extract_categories(&document.normalized(), &MetricCategory::ALL)
    }

    /// Flat list of every amount, grouped by category.
    pub fn extract_amounts(&self, document: &DocumentText) -> Vec<ExtractedAmount> {
        self.extract(document).amounts().collect()
    }
}
