pub const NOT_AVAILABLE: &str = "N/A";

/// Reads a number out of a dataset string. Accepts a decimal comma
/// (`"1,5"`) when it is the only separator, and ignores surrounding space.
pub fn parse_lenient_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = match trimmed.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) if trimmed.matches(',').count() == 1 && !trimmed.contains('.') => {
            trimmed.replace(',', ".").parse::<f64>().ok()
        }
        Err(_) => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Groups the integral part in thousands (`1234567.891` -> `1,234,567.891`).
/// At most three fraction digits are kept and trailing zeros are dropped.
pub fn format_grouped(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let fixed = format!("{rounded:.3}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative && rounded != 0.0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Plain form of a metric: integers without a fraction, everything else as is.
pub fn format_plain(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

pub fn or_not_available(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Splits one CSV line on commas and strips every double quote.
pub fn split_unquoted_csv(line: &str) -> Vec<String> {
    line.split(',')
        .map(|s| s.replace('"', "").trim().to_string())
        .collect()
}

pub fn is_http_url(value: &str) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
