use chrono::Month;

/// Parse a month given as `1`-`12` or an English name/abbreviation.
pub fn parse_month(input: &str) -> Option<Month> {
    let trimmed = input.trim();
    if let Ok(n) = trimmed.parse::<u8>() {
        return Month::try_from(n).ok();
    }
    trimmed.parse::<Month>().ok()
}

/// Three-letter label, e.g. `Mar`.
pub fn month_label(month: Month) -> &'static str {
    let name = month.name();
    &name[..3]
}
