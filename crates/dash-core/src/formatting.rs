//! Number formatting for chart annotations, axis labels and reports.

/// Format a number with thousands separators and a fixed number of decimal
/// places.  Non-finite values render as `"n/a"`.
///
/// # Examples
///
/// ```
/// use dash_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }

    let fixed = format!("{:.*}", decimals as usize, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    // A value that rounds to zero keeps no sign.
    if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format a revenue amount with a leading `$`, thousands separators and
/// `decimals` decimal places.
///
/// ```
/// use dash_core::formatting::format_currency;
///
/// assert_eq!(format_currency(1234.56, 2), "$1,234.56");
/// assert_eq!(format_currency(-9.6, 0), "-$10");
/// ```
pub fn format_currency(amount: f64, decimals: u32) -> String {
    let body = format_number(amount, decimals);
    match body.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${body}"),
    }
}

/// Short axis-tick form: `950`, `12.5k`, `3.2M`.
///
/// ```
/// use dash_core::formatting::format_compact;
///
/// assert_eq!(format_compact(950.0), "950");
/// assert_eq!(format_compact(12_500.0), "12.5k");
/// assert_eq!(format_compact(3_200_000.0), "3.2M");
/// ```
pub fn format_compact(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    let (scaled, suffix) = if abs >= 1_000_000.0 {
        (abs / 1_000_000.0, "M")
    } else if abs >= 1_000.0 {
        (abs / 1_000.0, "k")
    } else {
        return format!("{sign}{}", format_number(abs, 0));
    };
    let text = format!("{scaled:.1}");
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{sign}{text}{suffix}")
}

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
