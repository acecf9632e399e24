/// Inserts `,` between every group of three integer digits.
pub fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn format_dollars(value: f64, keep_zero_cents: bool) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    let grouped = group_thousands(whole);

    if cents == "00" && !keep_zero_cents {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{cents}")
    }
}

/// Price for the result message: `$450,000`, or `$450,000.50` when cents matter.
pub fn format_price(value: f64) -> String {
    format_dollars(value, false)
}

/// A stored two-decimal history price such as `450000.00`, as `$450,000.00`.
/// Values that do not parse are shown as stored.
pub fn format_stored_price(stored: &str) -> String {
    match stored.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => format_dollars(value, true),
        _ => format!("${stored}"),
    }
}
