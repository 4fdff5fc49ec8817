use super::*;

fn engine() -> RiskAssessmentEngine {
    RiskAssessmentEngine::new()
}

#[test]
fn test_debt_to_assets_of_exactly_point_six_is_moderate() {
    let result = engine().analyze_text("total debt 60 and total assets 100");
    assert_eq!(result.debt_to_assets, Some(0.6));
    assert_eq!(
        result.verdict.lines(),
        vec![
            "⚖️ Debt-to-Assets Ratio: 0.60",
            "⚠️ Moderate solvency risk: Debt levels may be concerning.",
            "📌 Overall Risk Rating: 🟢 Low Risk Investment",
        ]
    );
    assert_eq!(result.score, 1);
}

#[test]
fn test_high_solvency_alone_scores_two() {
    let result = engine().analyze_text("debt 70 assets 100");
    assert_eq!(result.score, 2);
    assert_eq!(result.rating(), RiskRating::Medium);
    assert_eq!(
        result.render(),
        "⚖️ Debt-to-Assets Ratio: 0.70\n\
         ❌ High solvency risk: Company relies heavily on debt.\n\
         📌 Overall Risk Rating: 🟠 Medium Risk Investment"
    );
}

#[test]
fn test_solvency_lower_boundary_is_healthy() {
    let result = engine().analyze_text("debt 40 assets 100");
    assert_eq!(result.debt_to_assets, Some(0.4));
    assert_eq!(result.verdict.insights[1].message, "Healthy solvency position.");
    assert_eq!(result.verdict.insights[1].severity, Severity::None);
    assert_eq!(result.rating(), RiskRating::Low);
}

#[test]
fn test_zero_assets_gives_zero_ratio() {
    let result = engine().analyze_text("debt 70 assets 0");
    assert_eq!(result.debt_to_assets, Some(0.0));
    assert_eq!(result.rating(), RiskRating::Low);
}

#[test]
fn test_high_and_medium_findings_rate_high() {
    let result = engine().analyze_text("debt 70 assets 100 amid a recession and a loss");
    assert_eq!(result.score, 3);
    assert_eq!(result.rating(), RiskRating::High);
    assert_eq!(
        result.verdict.lines(),
        vec![
            "⚖️ Debt-to-Assets Ratio: 0.70",
            "❌ High solvency risk: Company relies heavily on debt.",
            "📉 Market Risks detected: recession",
            "⚠️ Negative Signals: loss",
            "📌 Overall Risk Rating: 🔴 High Risk Investment",
        ]
    );
}

#[test]
fn test_debt_servicing_thresholds() {
    let high = engine().analyze_text("debt 500 net income 100");
    assert_eq!(high.debt_to_income, Some(DebtCoverage::Finite(5.0)));
    assert_eq!(high.verdict.insights[0].message, "Debt-to-Income Ratio: 5.00");
    assert_eq!(high.verdict.insights[1].severity, Severity::High);

    let at_four = engine().analyze_text("debt 400 net income 100");
    assert_eq!(at_four.verdict.insights[1].message, "Moderate debt servicing risk.");
    assert_eq!(at_four.verdict.insights[1].severity, Severity::Medium);

    let at_two = engine().analyze_text("debt 200 net income 100");
    assert_eq!(
        at_two.verdict.insights[1].message,
        "Debt levels manageable relative to income."
    );
    assert_eq!(at_two.verdict.insights[1].severity, Severity::None);
}

#[test]
fn test_zero_profit_is_infinite_and_high_risk() {
    let result = engine().analyze_text("debt 500 profit 0");
    assert_eq!(result.debt_to_income, Some(DebtCoverage::Infinite));
    assert_eq!(result.verdict.insights[0].message, "Debt-to-Income Ratio: inf");
    assert_eq!(result.verdict.insights[1].severity, Severity::High);
    assert_eq!(result.rating(), RiskRating::Medium);
}

#[test]
fn test_keyword_detection_is_presence_only_and_ordered() {
    let result = engine()
        .analyze_text("Risk, risk and more RISK; fraud, currency and inflation, default");
    assert_eq!(
        result.keyword_signals,
        vec![
            KeywordSignal {
                category: RiskCategory::Market,
                keywords: vec!["inflation".into(), "currency".into()],
            },
            KeywordSignal {
                category: RiskCategory::Operational,
                keywords: vec!["fraud".into()],
            },
            KeywordSignal {
                category: RiskCategory::NegativeSignal,
                keywords: vec!["risk".into(), "default".into()],
            },
        ]
    );
    assert_eq!(
        result.verdict.lines(),
        vec![
            "📉 Market Risks detected: inflation, currency",
            "🏭 Operational Risks detected: fraud",
            "⚠️ Negative Signals: risk, default",
            "📌 Overall Risk Rating: 🟢 Low Risk Investment",
        ]
    );
}

#[test]
fn test_keyword_substring_match() {
    let result = engine().analyze_text("The company keeps risking its runway");
    assert_eq!(result.keyword_signals.len(), 1);
    assert_eq!(result.keyword_signals[0].keywords, vec!["risk".to_string()]);
    assert_eq!(result.score, 1);
}

#[test]
fn test_multi_word_operational_keywords() {
    let result = engine().analyze_text("A management failure disrupted the supply chain");
    assert_eq!(
        result.keyword_signals[0].keywords,
        vec!["supply chain".to_string(), "management failure".to_string()]
    );
    assert_eq!(result.rating(), RiskRating::Low);
}

#[test]
fn test_no_signals_falls_back() {
    let result = engine().analyze_text("The weather was mild.");
    assert!(!result.verdict.has_evidence());
    assert_eq!(result.score, 0);
    assert_eq!(result.rating(), RiskRating::Low);
    assert_eq!(result.render(), "No significant risks detected.");
}

#[test]
fn test_risk_score_is_additive() {
    let medium = Insight::new(InsightKind::NegativeSignal, "m").with_severity(Severity::Medium);
    let high = Insight::new(InsightKind::Assessment, "h").with_severity(Severity::High);
    let none = Insight::new(InsightKind::Ratio, "r");

    assert_eq!(RiskAssessmentEngine::risk_score(&[none.clone()]), 0);
    assert_eq!(RiskAssessmentEngine::risk_score(&[medium.clone(), medium.clone()]), 1);
    assert_eq!(RiskAssessmentEngine::risk_score(&[high.clone(), high.clone()]), 2);
    assert_eq!(RiskAssessmentEngine::risk_score(&[none, medium, high]), 3);
}

#[test]
fn test_custom_vocabulary() {
    let mut vocabulary = Vocabulary::default();
    vocabulary.market_risk = KeywordTable::new("market_risk", &["tariff"]);
    let engine = RiskAssessmentEngine::with_config(MetricExtractor::new(), &vocabulary);

    let result = engine.analyze_text("New tariffs and more competition");
    assert_eq!(result.keyword_signals.len(), 1);
    assert_eq!(result.keyword_signals[0].keywords, vec!["tariff".to_string()]);
}

#[test]
fn test_analysis_is_idempotent() {
    let text = "liabilities 8,000 assets 10,000 net income 1,000 \
                lawsuit pending, uncertain outlook";
    let engine = engine();
    let first = engine.analyze_text(text);
    assert_eq!(first, engine.analyze_text(text));
    assert_eq!(first.rating(), RiskRating::High);
}

#[test]
fn test_assessment_serializes() {
    let result = engine().analyze_text("debt 500 profit 0");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["debt_to_income"]["kind"], "infinite");
    assert_eq!(json["verdict"]["label"], "Medium");
    assert_eq!(json["score"], 2);
}
