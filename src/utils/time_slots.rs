use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotMode {
    From,
    To,
}

/// A selectable booking boundary at the top of an hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(NaiveDateTime);

impl TimeSlot {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.0
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn label(&self) -> String {
        format_hour_label(self.hour())
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for TimeSlot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.label())
    }
}

/// 12-hour label such as `"09:00 AM"`; hours 0 and 12 both render as `12`.
pub fn format_hour_label(hour: u32) -> String {
    let hour = hour % 24;
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    let period = if hour < 12 { "AM" } else { "PM" };
    format!("{:02}:00 {}", display, period)
}

pub fn truncate_to_hour(at: NaiveDateTime) -> NaiveDateTime {
    at.date().and_hms_opt(at.hour(), 0, 0).unwrap_or(at)
}

/// Hourly slots from `start` through 11 PM of the same day.
///
/// For a "from" list on the current day the first slot is the hour after
/// `now`, so past and running hours cannot be picked. When that lands past
/// 11 PM the list is empty.
pub fn generate_time_slots(
    start: NaiveDateTime,
    mode: SlotMode,
    now: NaiveDateTime,
) -> Vec<TimeSlot> {
    let day = start.date();
    let mut first_hour = start.hour();
    if mode == SlotMode::From && day == now.date() {
        first_hour = first_hour.max(now.hour() + 1);
    }

    (first_hour..24)
        .filter_map(|hour| day.and_hms_opt(hour, 0, 0))
        .map(TimeSlot)
        .collect()
}

pub fn slots_for_date(date: NaiveDate, mode: SlotMode, now: NaiveDateTime) -> Vec<TimeSlot> {
    match date.and_hms_opt(0, 0, 0) {
        Some(midnight) => generate_time_slots(midnight, mode, now),
        None => Vec::new(),
    }
}

/// "To" slots for a chosen "from" time, starting one hour later.
///
/// An 11 PM "from" rolls over to midnight of the next day, so the returned
/// date is the day the "to" slots belong to.
pub fn to_slots_after(from: NaiveDateTime) -> (NaiveDate, Vec<TimeSlot>) {
    let from = truncate_to_hour(from);
    match from.checked_add_signed(Duration::hours(1)) {
        Some(start) => (start.date(), generate_time_slots(start, SlotMode::To, start)),
        None => (from.date(), Vec::new()),
    }
}
