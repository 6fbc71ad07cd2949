//! Number formatting for report output

/// Digits of a non-negative whole number with thousands separators
fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a currency value without cents, e.g. `$1,250,000`
pub fn format_currency(value: f64) -> String {
    let dollars = group_thousands(value.abs().round() as u64);
    if value < 0.0 && dollars != "0" {
        format!("-${dollars}")
    } else {
        format!("${dollars}")
    }
}

/// Format a currency value in compact form (e.g., $2.1M, $450K, $50)
pub fn format_compact_currency(value: f64) -> String {
    let abs_value = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if abs_value >= 1_000_000_000.0 {
        format!("{}${:.1}B", sign, abs_value / 1_000_000_000.0)
    } else if abs_value >= 1_000_000.0 {
        format!("{}${:.1}M", sign, abs_value / 1_000_000.0)
    } else if abs_value >= 1_000.0 {
        format!("{}${:.0}K", sign, abs_value / 1_000.0)
    } else {
        format!("{}${:.0}", sign, abs_value)
    }
}

/// Format a fraction as a percentage, `0.125` -> `12.50%`
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Format a whole count with thousands separators
pub fn format_count(value: u64) -> String {
    group_thousands(value)
}
