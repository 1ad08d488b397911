// Renderer module - formatting utilities
// Most rendering logic is in layout.rs; this module holds the pure
// value-to-text helpers it shares.

/// Format a dollar amount with cents, e.g. "$1,234.56"
pub fn format_usd(amount: f64) -> String {
    let cents = format!("{:.2}", amount.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(whole), frac)
}

/// Format a dollar amount without cents, for axis labels and bar values
pub fn format_usd_compact(amount: f64) -> String {
    let whole = format!("{:.0}", amount.abs());
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(&whole))
}

/// Format a count with thousands separators, e.g. "12,345"
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Three-letter weekday label for narrow bar slots
pub fn short_day(day: &str) -> String {
    day.chars().take(3).collect()
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
