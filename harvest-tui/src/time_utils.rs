use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

/// `YYYY-MM-DD`, the wire and display format for spent dates.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("duration is empty")]
    EmptyDuration,
    #[error("duration must be H:MM")]
    InvalidFormat,
}

/// Format decimal hours as `H:MM`.
pub fn format_hours(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round().max(0.0) as u64;
    format!("{}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Parse an `H:MM` duration into decimal hours.
pub fn parse_duration(input: &str) -> Result<f64, DurationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DurationError::EmptyDuration);
    }

    let (hours, minutes) = trimmed
        .split_once(':')
        .ok_or(DurationError::InvalidFormat)?;
    let hours = parse_non_negative(hours)?;
    let minutes = parse_non_negative(minutes)?;
    if minutes >= 60 {
        return Err(DurationError::InvalidFormat);
    }

    Ok(hours as f64 + minutes as f64 / 60.0)
}

// Only plain ASCII digits; `u32::from_str` would also accept a leading '+'.
fn parse_non_negative(part: &str) -> Result<u32, DurationError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DurationError::InvalidFormat);
    }
    part.parse().map_err(|_| DurationError::InvalidFormat)
}

/// The local UTC offset, or UTC when it cannot be determined.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

pub fn local_today() -> Date {
    OffsetDateTime::now_utc().to_offset(local_offset()).date()
}

pub fn format_date(date: Date) -> Result<String, time::error::Format> {
    date.format(DATE_FORMAT)
}

pub fn parse_date(s: &str) -> Option<Date> {
    Date::parse(s.trim(), DATE_FORMAT).ok()
}

/// Human label for the focused date, e.g. `Fri 16 Oct 2026`.
pub fn describe_date(date: Date) -> String {
    let weekday = date.weekday().to_string();
    let month = date.month().to_string();
    format!(
        "{} {} {} {}",
        &weekday[..3],
        date.day(),
        &month[..3],
        date.year()
    )
}
