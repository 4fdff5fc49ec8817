use super::*;

fn engine() -> InvestmentInsightEngine {
    InvestmentInsightEngine::new()
}

#[test]
fn test_profit_margin_from_averaged_amounts() {
    let text = "revenue $1,200 and revenue $800 with net income $100 and net income $50";
    let result = engine().analyze_text(text);

    assert_eq!(result.metrics.average_revenue, Some(1000.0));
    assert_eq!(result.metrics.average_profit, Some(75.0));
    assert_eq!(result.metrics.profit_margin, Some(7.5));
    assert_eq!(result.recommendation(), Recommendation::Hold);
    assert_eq!(
        result.verdict.lines(),
        vec![
            "📊 Average Revenue: $1,000.00",
            "📊 Average Profit: $75.00",
            "📊 Profit Margin: 7.50%",
            "ℹ️ Neutral outlook.",
            "📌 Investment Recommendation: Hold",
        ]
    );
}

#[test]
fn test_buy_needs_high_margin_and_positive_outlook() {
    let result = engine().analyze_text("revenue 1000 net income 200 strong growth");
    assert_eq!(result.metrics.profit_margin, Some(20.0));
    assert_eq!(result.sentiment.outlook(), Outlook::Positive);
    assert_eq!(result.recommendation(), Recommendation::Buy);
}

#[test]
fn test_margin_of_exactly_fifteen_is_not_buy() {
    let result = engine().analyze_text("revenue 1000 net income 150 strong growth");
    assert_eq!(result.metrics.profit_margin, Some(15.0));
    assert_eq!(result.sentiment.outlook(), Outlook::Positive);
    assert_eq!(result.recommendation(), Recommendation::Hold);
}

#[test]
fn test_high_margin_without_positive_outlook_holds() {
    let result = engine().analyze_text("revenue 1000 net income 300");
    assert_eq!(result.sentiment.outlook(), Outlook::Neutral);
    assert_eq!(result.recommendation(), Recommendation::Hold);
}

#[test]
fn test_low_margin_sells() {
    let result = engine().analyze_text("revenue 1000 net income 20");
    assert_eq!(result.metrics.profit_margin, Some(2.0));
    assert_eq!(result.recommendation(), Recommendation::Sell);
}

#[test]
fn test_margin_of_exactly_five_is_not_sell() {
    let result = engine().analyze_text("revenue 1000 net income 50");
    assert_eq!(result.metrics.profit_margin, Some(5.0));
    assert_eq!(result.recommendation(), Recommendation::Hold);
}

#[test]
fn test_negative_outlook_sells_even_with_fair_margin() {
    let result = engine().analyze_text("revenue 1000 net income 100 after a loss and a decline");
    assert_eq!(result.sentiment.negative_hits, 2);
    assert_eq!(result.recommendation(), Recommendation::Sell);
    assert!(result
        .verdict
        .lines()
        .contains(&"⚠️ Negative financial risks detected.".to_string()));
}

#[test]
fn test_recommendation_holds_without_margin() {
    // Strongly negative text, but no revenue/profit pair to compute a margin
    let result = engine().analyze_text("loss loss decline risk litigation");
    assert_eq!(result.sentiment.outlook(), Outlook::Negative);
    assert_eq!(result.metrics.profit_margin, None);
    assert_eq!(result.recommendation(), Recommendation::Hold);
}

#[test]
fn test_debt_to_income_lines() {
    let result = engine().analyze_text("net income 200 and debt 500");
    assert_eq!(result.metrics.average_debt, Some(500.0));
    assert_eq!(result.metrics.debt_to_income, Some(DebtCoverage::Finite(2.5)));
    assert_eq!(result.metrics.profit_margin, None);

    let lines = result.verdict.lines();
    assert_eq!(lines[0], "⚖️ Avg Debt: $500.00");
    assert_eq!(lines[1], "⚖️ Debt-to-Income Ratio: 2.50");
}

#[test]
fn test_zero_profit_gives_infinite_debt_to_income() {
    let result = engine().analyze_text("net income 0 and debt 500");
    assert_eq!(result.metrics.debt_to_income, Some(DebtCoverage::Infinite));
    assert!(result
        .verdict
        .lines()
        .contains(&"⚖️ Debt-to-Income Ratio: inf".to_string()));
}

#[test]
fn test_zero_revenue_margin_is_zero() {
    let result = engine().analyze_text("revenue 0 and net income 40");
    assert_eq!(result.metrics.profit_margin, Some(0.0));
    assert_eq!(result.recommendation(), Recommendation::Sell);
}

#[test]
fn test_sentiment_counts_repetitions_and_substrings() {
    let score = engine().score_sentiment("profits rose, growth growth growth; risking a decline");
    assert_eq!(score.positive_hits, 4);
    assert_eq!(score.negative_hits, 2);
    assert_eq!(score.outlook(), Outlook::Positive);
}

#[test]
fn test_sentiment_is_case_insensitive() {
    let result = engine().analyze_text("STRONG Growth and POSITIVE momentum");
    assert_eq!(result.sentiment.positive_hits, 3);
}

#[test]
fn test_empty_text_still_reports_outlook() {
    let result = engine().analyze_text("");
    assert!(result.verdict.has_evidence());
    assert_eq!(
        result.render(),
        "ℹ️ Neutral outlook.\n📌 Investment Recommendation: Hold"
    );
}

#[test]
fn test_custom_vocabulary() {
    let mut vocabulary = Vocabulary::default();
    vocabulary.positive_sentiment = KeywordTable::new("positive_sentiment", &["moonshot"]);
    let engine = InvestmentInsightEngine::with_config(MetricExtractor::new(), &vocabulary);

    let result = engine.analyze_text("revenue 100 net income 50 moonshot");
    assert_eq!(result.sentiment.positive_hits, 1);
    assert_eq!(result.recommendation(), Recommendation::Buy);
}

#[test]
fn test_analysis_is_idempotent() {
    let text = "revenue 900 net income 120 debt 300 strong expansion despite litigation";
    let engine = engine();
    assert_eq!(engine.analyze_text(text), engine.analyze_text(text));
}

#[test]
fn test_assessment_serializes() {
    let result = engine().analyze_text("revenue 1000 net income 200 strong growth");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["verdict"]["label"], "Buy");
    assert_eq!(json["sentiment"]["positive_hits"], 2);
    assert_eq!(json["verdict"]["insights"][0]["kind"], "metric");
}

#[test]
fn test_huge_figures_keep_a_finite_margin() {
    let n = "9".repeat(308);
    let text = format!("revenue {n} revenue {n} net income {n} net income {n}");
    let result = engine().analyze_text(&text);

    let avg_revenue = result.metrics.average_revenue.unwrap();
    assert!(avg_revenue.is_finite());
    assert_eq!(result.metrics.profit_margin, Some(100.0));
    assert!(result
        .verdict
        .lines()
        .iter()
        .all(|line| !line.contains("NaN") && !line.contains("inf")));
    assert!(result.verdict.lines().contains(&"📊 Profit Margin: 100.00%".to_string()));
}
