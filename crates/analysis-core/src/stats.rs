/// Small numeric helpers shared by the engines.
///
/// Ratios over extracted amounts are undefined when an input list is empty;
/// these helpers surface that as `None` rather than NaN.

/// Arithmetic mean of a data slice, `None` when empty.
///
/// Finite inputs always give a finite mean: if the plain sum overflows, the
/// values are scaled down before summing.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let n = data.len() as f64;
    let sum: f64 = data.iter().sum();
    if sum.is_finite() {
        Some(sum / n)
    } else {
        Some(data.iter().map(|x| x / n).sum())
    }
}

/// `numerator / denominator`, or `fallback` when the denominator is zero.
pub fn ratio_or(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator != 0.0 {
        numerator / denominator
    } else {
        fallback
    }
}

/// Format a non-negative amount as `$1,234.56`.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac}")
}
