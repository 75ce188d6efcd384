//! Cell-level normalizers for the spreadsheet export.
//!
//! Each function takes one raw cell and returns a typed value with an
//! explicit sentinel contract: `None` marks absent data and is never
//! conflated with an explicit negative answer or a conversion failure.
//! Notably, an empty cell and the literal "нет" diverge in `parse_bool`
//! (unknown vs false); that asymmetry is part of the data contract.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ImportError;

static TENURE_YEARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*(?:лет|год|года)").expect("tenure years pattern"));
static TENURE_MONTHS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*месяц").expect("tenure months pattern"));

/// Collapse internal whitespace runs, trim and lower-case a header cell.
pub fn normalize_header(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Trim a data cell. Type conversion happens in the dedicated parsers.
pub fn normalize_value(value: &str) -> String {
    value.trim().to_string()
}

/// Tri-state yes/no cell. Empty input is unknown, not a refusal.
pub fn parse_bool(value: &str) -> Option<bool> {
    let normalized = value.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }
    if normalized == "нет" {
        return Some(false);
    }
    match normalized.as_str() {
        "да" | "yes" | "true" | "1" => Some(true),
        "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// The export describes supervision in free text; any mention of the
/// management word root counts, everything else is a plain no.
pub fn parse_subordinates(value: &str) -> bool {
    value.trim().to_lowercase().contains("руковод")
}

/// Tenure free text: "3 года 4 месяца", "11 месяцев", a bare number of
/// years, or empty (zero tenure). Year and month patterns are searched
/// independently; the first numeric match per unit wins.
pub fn parse_tenure(value: &str) -> Result<f64, ImportError> {
    let text = value.replace('\n', " ").trim().to_lowercase();
    let mut years = 0.0;
    let mut months = 0.0;

    let year_match = TENURE_YEARS_RE.captures(&text);
    if let Some(caps) = &year_match {
        years = caps[1]
            .parse::<f64>()
            .map_err(|_| ImportError::conversion("tenure", value))?;
    }

    let month_match = TENURE_MONTHS_RE.captures(&text);
    if let Some(caps) = &month_match {
        months = caps[1]
            .parse::<f64>()
            .map_err(|_| ImportError::conversion("tenure", value))?;
    }

    if year_match.is_none() && month_match.is_none() && !text.is_empty() {
        years = text
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| ImportError::conversion("tenure", value))?;
    }

    Ok(years + months / 12.0)
}

/// Age-style cell: empty or "нет" mean absent; "35.0" truncates to 35.
pub fn parse_optional_int(value: &str) -> Result<Option<i32>, ImportError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.to_lowercase() == "нет" {
        return Ok(None);
    }
    let parsed = trimmed
        .parse::<f64>()
        .map_err(|_| ImportError::conversion("integer", value))?;
    Ok(Some(parsed.trunc() as i32))
}

/// Vacation dates arrive as either a full timestamp or a bare date; the
/// first format that parses wins.
pub fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>, ImportError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.to_lowercase() == "нет" {
        return Ok(None);
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(Some(stamp.date()));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    Err(ImportError::conversion("date", value))
}

/// KPI cell: decimal with an optional comma separator, or the absent
/// sentinel ("нет"/empty).
pub fn parse_kpi_value(value: &str) -> Result<Option<f64>, ImportError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.to_lowercase() == "нет" {
        return Ok(None);
    }
    let parsed = trimmed
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| ImportError::conversion("kpi", value))?;
    Ok(Some(parsed))
}
