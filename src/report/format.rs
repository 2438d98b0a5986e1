//! Value formatting shared by tables, chart labels, and gridlines.

/// Format a currency amount: `$` prefix, comma thousands grouping, fixed
/// two decimals. The sign rides inside the prefix (`$-250.00`), matching
/// how variances have always been displayed.
pub fn format_currency(value: f64) -> String {
    format!("${}", group_thousands(value))
}

/// Format a plain quantity (hours, mAh, grams): whole values without a decimal point (`12`),
/// fractional values as-is (`12.5`).
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (number, decimals) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}{}.{}", sign, grouped, decimals)
}
