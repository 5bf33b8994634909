//! Formatting utilities for record display
//!
//! Central location for formatting record data (dates, optional cells,
//! percentages) to avoid duplication across CLI and TUI modules.

use jiff::Timestamp;

/// Format an ISO 8601 timestamp as a date for display
///
/// Falls back to truncating the raw string when it does not parse, and to
/// returning it unchanged when it is too short to truncate.
///
/// # Examples
///
/// ```
/// use rolodex::formatting::format_date;
///
/// assert_eq!(format_date("2024-01-15T10:30:00Z"), "2024-01-15");
/// assert_eq!(format_date("2024-01-15"), "2024-01-15");
/// assert_eq!(format_date("short"), "short");
/// ```
pub fn format_date(date_str: &str) -> String {
    if let Ok(timestamp) = date_str.parse::<Timestamp>() {
        return timestamp.strftime("%Y-%m-%d").to_string();
    }
    if date_str.len() >= 10 {
        date_str[..10].to_string()
    } else {
        date_str.to_string()
    }
}

/// Format an ISO 8601 timestamp as date and time for display
pub fn format_datetime(date_str: &str) -> String {
    if let Ok(timestamp) = date_str.parse::<Timestamp>() {
        return timestamp.strftime("%Y-%m-%d %H:%M").to_string();
    }
    date_str.to_string()
}

/// Render an optional date cell, using `N/A` for missing values
pub fn date_cell(value: Option<&str>) -> String {
    value.map(format_date).unwrap_or_else(|| "N/A".to_string())
}

/// Render an optional text cell, using `N/A` for missing values
pub fn text_cell(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "N/A".to_string(),
    }
}

/// Render an optional percentage cell
pub fn rate_cell(value: Option<u32>) -> String {
    match value {
        Some(v) => format!("{v}%"),
        None => "N/A".to_string(),
    }
}

/// Truncate a string to `width` characters, appending an ellipsis when
/// anything was cut
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{cut}…")
}
