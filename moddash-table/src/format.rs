//! Number and text formatting for cells.

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: char = '…';

pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Truncates `s` to at most `max_width` columns, ending with `…` if cut.
///
/// Returns the text and whether it was truncated.
pub fn truncate_to_width(s: &str, max_width: usize) -> (String, bool) {
    if display_width(s) <= max_width {
        return (s.to_string(), false);
    }
    if max_width == 0 {
        return (String::new(), true);
    }

    let target_width = max_width - 1;
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    // Don't leave a dangling space before the ellipsis.
    let trimmed = result.trim_end().len();
    result.truncate(trimmed);
    result.push(ELLIPSIS);
    (result, true)
}

/// Formats with thousands separators: `1234567.8` → `"1,234,567.8"`.
pub fn format_plain(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

const UNITS: [(f64, &str); 3] = [(1e3, "K"), (1e6, "M"), (1e9, "B")];

/// Formats with a magnitude suffix: `1_200` → `"1.2K"`, `3_400_000` → `"3.4M"`.
///
/// Trailing zero decimals are dropped, so `1_000` renders as `"1K"`.
pub fn format_compact(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }

    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    let mut unit = UNITS.iter().rposition(|(scale, _)| abs >= *scale);

    loop {
        let scaled = unit.map_or(abs, |i| abs / UNITS[i].0);
        let text = format!("{:.*}", decimals, scaled);

        // 999.96 rounds to "1000.0"; move up a unit instead.
        let next = unit.map_or(0, |i| i + 1);
        if next < UNITS.len() && text.parse::<f64>().is_ok_and(|v| v >= 1000.0) {
            unit = Some(next);
            continue;
        }

        let digits = trim_zeros(&text);
        if digits == "0" {
            return "0".to_string();
        }
        let suffix = unit.map_or("", |i| UNITS[i].1);
        return format!("{}{}{}", sign, digits, suffix);
    }
}

/// Formats a ratio as a percentage: `0.0523` → `"5.23%"` with two decimals.
pub fn format_percent(ratio: f64, decimals: usize) -> String {
    if !ratio.is_finite() {
        return "—".to_string();
    }
    format!("{:.*}%", decimals, ratio * 100.0)
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
