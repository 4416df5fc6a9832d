//! Number formatting for counts shown to people.


/// Group digits with commas: `1234567` → `"1,234,567"`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Short form for large counts: `1.2B`, `3.4M`, `5.6K`, else thousands format.
///
/// One decimal, with a trailing `.0` dropped (`2000` → `"2K"`).
pub fn format_compact(n: u64) -> String {
    const UNITS: [(u64, &str); 3] = [(1_000_000_000, "B"), (1_000_000, "M"), (1_000, "K")];

    for (scale, suffix) in UNITS {
        if n >= scale {
            let value = format!("{:.1}", n as f64 / scale as f64);
            let value = value.strip_suffix(".0").unwrap_or(&value);
            return format!("{value}{suffix}");
        }
    }
    format_thousands(n)
}

/// Parse a count as printed on a results page (`"1,234"`, `"1.234"`, `" 56 "`).
///
/// Returns `None` when no digits are present.
pub fn parse_count(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
