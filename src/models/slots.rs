use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::time_slots::TimeSlot;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FromSlotsRequest {
    pub date: String,
    pub now: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FromSlotsResponse {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
    pub default_from: Option<TimeSlot>,
    pub default_to: Option<TimeSlot>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToSlotsRequest {
    pub date: String,
    pub from: String,
    pub now: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToSlotsResponse {
    pub date: Option<NaiveDate>,
    pub slots: Vec<TimeSlot>,
}
