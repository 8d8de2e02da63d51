use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::constants::{CLIENT_DATETIME_FORMAT, SLOT_LABEL_FORMAT};
use crate::error::{AppError, AppResult};

pub fn parse_date(date_str: &str) -> AppResult<NaiveDate> {
    let date_str = date_str.trim();
    // Accept a full timestamp too, the booking form sends whatever the picker holds
    let day = date_str.get(..10).unwrap_or(date_str);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date: {}", date_str)))
}

/// Parses the client's wall-clock time. Offsets are dropped, the local time is kept.
pub fn parse_client_datetime(dt_str: &str) -> AppResult<NaiveDateTime> {
    let dt_str = dt_str.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(dt_str) {
        return Ok(dt.naive_local());
    }

    let formats = [CLIENT_DATETIME_FORMAT, "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];
    for fmt in &formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(dt_str, fmt) {
            return Ok(naive);
        }
    }

    Err(AppError::Validation(format!("Invalid datetime: {}", dt_str)))
}

/// Client-supplied time when present, otherwise the server's local time.
pub fn resolve_now(now: Option<&str>) -> AppResult<NaiveDateTime> {
    match now {
        Some(now) => parse_client_datetime(now),
        None => Ok(Local::now().naive_local()),
    }
}

/// Hour of day named by a slot label such as `"03:00 PM"`.
pub fn parse_slot_label(label: &str) -> AppResult<u32> {
    let time = NaiveTime::parse_from_str(label.trim(), SLOT_LABEL_FORMAT)
        .map_err(|_| AppError::Validation(format!("Invalid time slot: {}", label)))?;

    if time.minute() != 0 {
        return Err(AppError::Validation(format!(
            "Time slot is not on the hour: {}",
            label
        )));
    }

    Ok(time.hour())
}
