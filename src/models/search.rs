use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::utils::datetime::parse_slot_label;
use crate::utils::geo::Coordinate;
use crate::utils::time_slots::{slots_for_date, to_slots_after, SlotMode, TimeSlot};

/// Booking search form state.
///
/// Slot lists are produced by the pure generators in
/// [`crate::utils::time_slots`]; choosing defaults is a separate step,
/// [`SearchForm::apply_default_selection`], run when the date changes.
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    destination: Option<Coordinate>,
    date: Option<NaiveDate>,
    from_slots: Vec<TimeSlot>,
    to_date: Option<NaiveDate>,
    to_slots: Vec<TimeSlot>,
    from: Option<TimeSlot>,
    to: Option<TimeSlot>,
}

impl SearchForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destination(&self) -> Option<Coordinate> {
        self.destination
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn from_slots(&self) -> &[TimeSlot] {
        &self.from_slots
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        self.to_date
    }

    pub fn to_slots(&self) -> &[TimeSlot] {
        &self.to_slots
    }

    pub fn from(&self) -> Option<TimeSlot> {
        self.from
    }

    pub fn to(&self) -> Option<TimeSlot> {
        self.to
    }

    pub fn set_destination(&mut self, destination: Coordinate) {
        self.destination = Some(destination);
    }

    pub fn set_date(&mut self, date: NaiveDate, now: NaiveDateTime) {
        self.date = Some(date);
        self.from_slots = slots_for_date(date, SlotMode::From, now);
        self.apply_default_selection();
    }

    /// Selects the first "from" slot and the slot right after it.
    pub fn apply_default_selection(&mut self) {
        self.from = self.from_slots.first().copied();
        self.refresh_to_slots();
        self.to = self.to_slots.first().copied();
    }

    pub fn select_from(&mut self, label: &str) -> AppResult<()> {
        let slot = find_slot(&self.from_slots, label)?
            .ok_or_else(|| AppError::Validation(format!("Unavailable from time: {}", label)))?;

        self.from = Some(slot);
        self.refresh_to_slots();
        if !self.to.is_some_and(|to| self.to_slots.contains(&to)) {
            self.to = self.to_slots.first().copied();
        }
        Ok(())
    }

    pub fn select_to(&mut self, label: &str) -> AppResult<()> {
        let slot = find_slot(&self.to_slots, label)?
            .ok_or_else(|| AppError::Validation(format!("Unavailable to time: {}", label)))?;

        self.to = Some(slot);
        Ok(())
    }

    pub fn to_query(&self) -> AppResult<SearchQuery> {
        let destination = self
            .destination
            .ok_or_else(|| AppError::Validation("Destination is required".to_string()))?;
        let from = self
            .from
            .ok_or_else(|| AppError::Validation("From time is required".to_string()))?;
        let to = self
            .to
            .ok_or_else(|| AppError::Validation("To time is required".to_string()))?;

        if to.starts_at() <= from.starts_at() {
            return Err(AppError::Validation(
                "To time must be after from time".to_string(),
            ));
        }

        Ok(SearchQuery {
            start: from.starts_at(),
            end: to.starts_at(),
            latitude: destination.latitude,
            longitude: destination.longitude,
        })
    }

    fn refresh_to_slots(&mut self) {
        match self.from {
            Some(from) => {
                let (to_date, to_slots) = to_slots_after(from.starts_at());
                self.to_date = Some(to_date);
                self.to_slots = to_slots;
            }
            None => {
                self.to_date = None;
                self.to_slots.clear();
            }
        }
    }
}

/// Slot offered at the hour `label` names; an error when the label is not a slot label.
fn find_slot(slots: &[TimeSlot], label: &str) -> AppResult<Option<TimeSlot>> {
    let hour = parse_slot_label(label)?;
    Ok(slots.iter().find(|slot| slot.hour() == hour).copied())
}

/// Time window and location the spot search endpoint accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchQueryRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    pub date: String,
    pub from: String,
    pub to: String,
    pub now: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn today() -> NaiveDate {
        now().date()
    }

    #[test]
    fn test_new_form_is_empty() {
        let form = SearchForm::new();
        assert!(form.from_slots().is_empty());
        assert!(form.from().is_none());
        assert!(form.to_query().is_err());
    }

    #[test]
    fn test_set_date_applies_defaults() {
        let mut form = SearchForm::new();
        form.set_date(today(), now());

        assert_eq!(form.from().unwrap().label(), "03:00 PM");
        assert_eq!(form.to().unwrap().label(), "04:00 PM");
        assert_eq!(form.to(), form.from_slots().get(1).copied());
        assert_eq!(form.to_date(), Some(today()));
    }

    #[test]
    fn test_select_from_refreshes_to_slots() {
        let mut form = SearchForm::new();
        form.set_date(today(), now());
        form.select_to("08:00 PM").unwrap();

        form.select_from("06:00 PM").unwrap();
        assert_eq!(form.to_slots()[0].label(), "07:00 PM");
        assert_eq!(form.to().unwrap().label(), "08:00 PM");

        form.select_from("09:00 PM").unwrap();
        assert_eq!(form.to().unwrap().label(), "10:00 PM");
    }

    #[test]
    fn test_eleven_pm_from_rolls_to_into_next_day() {
        let mut form = SearchForm::new();
        form.set_date(today(), now());
        form.select_from("11:00 PM").unwrap();

        let next_day = today().succ_opt().unwrap();
        assert_eq!(form.to_date(), Some(next_day));
        assert_eq!(form.to_slots().len(), 24);
        assert_eq!(form.to().unwrap().starts_at(), next_day.and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_past_from_time_is_rejected() {
        let mut form = SearchForm::new();
        form.set_date(today(), now());

        assert!(form.select_from("01:00 PM").is_err());
        assert!(form.select_to("03:00 PM").is_err());
    }

    #[test]
    fn test_select_accepts_label_variants_and_rejects_malformed() {
        let mut form = SearchForm::new();
        form.set_date(today(), now());

        form.select_from("6:00 pm").unwrap();
        assert_eq!(form.from().unwrap().label(), "06:00 PM");

        let err = form.select_to("18:00").unwrap_err();
        assert!(err.to_string().contains("Invalid time slot"));
        let err = form.select_from("06:30 PM").unwrap_err();
        assert!(err.to_string().contains("not on the hour"));
        assert_eq!(form.from().unwrap().label(), "06:00 PM");
    }

    #[test]
    fn test_late_evening_today_has_no_defaults() {
        let late = today().and_hms_opt(23, 10, 0).unwrap();
        let mut form = SearchForm::new();
        form.set_date(today(), late);

        assert!(form.from_slots().is_empty());
        assert!(form.from().is_none());
        assert!(form.to().is_none());
        assert!(form.to_slots().is_empty());
    }

    #[test]
    fn test_to_query_builds_window() {
        let mut form = SearchForm::new();
        form.set_destination(Coordinate::new(30.2672, -97.7431));
        form.set_date(today(), now());
        form.select_to("06:00 PM").unwrap();

        let query = form.to_query().unwrap();
        assert_eq!(query.start, today().and_hms_opt(15, 0, 0).unwrap());
        assert_eq!(query.end, today().and_hms_opt(18, 0, 0).unwrap());
        assert_eq!(query.latitude, 30.2672);
    }

    #[test]
    fn test_to_query_requires_destination() {
        let mut form = SearchForm::new();
        form.set_date(today(), now());

        assert!(matches!(form.to_query(), Err(AppError::Validation(_))));
    }
}
