use rust_decimal::Decimal;

/// Format a decimal amount with thousand separators and 2 decimal places,
/// prefixed by the currency symbol. e.g. `-1234.5` → `"-R$1,234.50"`
pub(crate) fn format_amount(val: Decimal, currency: &str) -> String {
    let abs = val.abs();
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO {
        format!("-{currency}{with_commas}.{dec_part}")
    } else {
        format!("{currency}{with_commas}.{dec_part}")
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Display form of a stored date: the calendar date when readable, the raw text otherwise.
pub(crate) fn display_date(raw: &str) -> String {
    crate::models::parse_date(raw)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Text gauge like `[████░░░░]` for a 0.0..=1.0 ratio.
pub(crate) fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64) as usize).min(width);
    let empty = width - filled;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page.saturating_sub(1));
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}
