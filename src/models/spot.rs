use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use validator::Validate;

use crate::constants::SPOT_STATUS_AVAILABLE;
use crate::error::{AppError, AppResult};
use crate::models::MapViewport;
use crate::utils::geo::{Coordinate, Locatable, NumericValue, WithDistance};

/// Spot record as the marketplace backend returns it, before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSpot {
    #[serde(default)]
    pub latitude: NumericValue,
    #[serde(default)]
    pub longitude: NumericValue,
    #[serde(default)]
    pub fee: Option<NumericValue>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Search results keyed by spot id, in the order the backend sent them.
pub type SpotSearchResponse = IndexMap<String, RawSpot>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotStatus {
    Available,
    Unavailable(i64),
    Unknown,
}

impl From<Option<i64>> for SpotStatus {
    fn from(code: Option<i64>) -> Self {
        match code {
            Some(SPOT_STATUS_AVAILABLE) => SpotStatus::Available,
            Some(code) => SpotStatus::Unavailable(code),
            None => SpotStatus::Unknown,
        }
    }
}

impl Serialize for SpotStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SpotStatus::Available => serializer.serialize_i64(SPOT_STATUS_AVAILABLE),
            SpotStatus::Unavailable(code) => serializer.serialize_i64(*code),
            SpotStatus::Unknown => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSpot {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub fee: Option<f64>,
    pub photos: Vec<String>,
    pub status: SpotStatus,
    pub address: Option<String>,
}

impl ParkingSpot {
    pub fn is_available(&self) -> bool {
        self.status == SpotStatus::Available
    }
}

impl Locatable for ParkingSpot {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl RawSpot {
    pub fn validate(&self, id: &str) -> AppResult<ParkingSpot> {
        let coordinate = Coordinate::new(self.latitude.as_f64(), self.longitude.as_f64());
        let invalid = |reason: &str| AppError::InvalidCoordinate {
            spot: id.to_string(),
            reason: reason.to_string(),
        };

        if coordinate.latitude.is_nan() {
            return Err(invalid("latitude is not a number"));
        }
        if coordinate.longitude.is_nan() {
            return Err(invalid("longitude is not a number"));
        }
        if !coordinate.in_range() {
            return Err(invalid("outside of the valid latitude/longitude range"));
        }

        let fee = match &self.fee {
            Some(value) => {
                let fee = value.as_f64();
                if !fee.is_finite() || fee < 0.0 {
                    return Err(AppError::Validation(format!(
                        "Invalid fee for spot {}: {:?}",
                        id, value
                    )));
                }
                Some(fee)
            }
            None => None,
        };

        Ok(ParkingSpot {
            id: id.to_string(),
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            fee,
            photos: self.photos.clone(),
            status: self.status.into(),
            address: self.address.clone(),
        })
    }
}

/// Validates every record, skipping the ones that fail.
pub fn parse_search_response(raw: &SpotSearchResponse) -> Vec<ParkingSpot> {
    raw.iter()
        .filter_map(|(id, spot)| match spot.validate(id) {
            Ok(spot) => Some(spot),
            Err(e) => {
                tracing::warn!("Skipping spot from search response: {}", e);
                None
            }
        })
        .collect()
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NearbySpotsRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub max_distance_km: Option<f64>,
    pub available_only: Option<bool>,
    pub spots: SpotSearchResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbySpotsResponse {
    pub spots: Vec<WithDistance<ParkingSpot>>,
    pub total_count: usize,
    pub viewport: MapViewport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::austin_search_response;

    fn raw(latitude: &str, longitude: &str) -> RawSpot {
        RawSpot {
            latitude: latitude.into(),
            longitude: longitude.into(),
            fee: None,
            photos: Vec::new(),
            status: Some(0),
            address: None,
        }
    }

    #[test]
    fn test_string_coordinates_validate() {
        let spot = raw("30.27", "-97.74").validate("5").unwrap();

        assert_eq!(spot.id, "5");
        assert_eq!(spot.latitude, 30.27);
        assert_eq!(spot.longitude, -97.74);
        assert!(spot.is_available());
    }

    #[test]
    fn test_non_numeric_latitude_is_rejected() {
        let err = raw("abc", "-97.74").validate("9").unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidCoordinate { ref spot, .. } if spot == "9"
        ));
    }

    #[test]
    fn test_out_of_range_coordinate_is_rejected() {
        assert!(raw("95", "0").validate("1").is_err());
        assert!(raw("0", "181").validate("1").is_err());
    }

    #[test]
    fn test_negative_fee_is_rejected() {
        let mut spot = raw("30", "-97");
        spot.fee = Some("-3".into());
        assert!(matches!(spot.validate("1"), Err(AppError::Validation(_))));

        spot.fee = Some("4.50".into());
        assert_eq!(spot.validate("1").unwrap().fee, Some(4.5));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(SpotStatus::from(Some(0)), SpotStatus::Available);
        assert_eq!(SpotStatus::from(Some(2)), SpotStatus::Unavailable(2));
        assert_eq!(SpotStatus::from(None), SpotStatus::Unknown);
    }

    #[test]
    fn test_parse_search_response_keeps_key_order_and_skips_invalid() {
        let response: SpotSearchResponse =
            serde_json::from_value(austin_search_response()).unwrap();

        let ids: Vec<_> = parse_search_response(&response)
            .into_iter()
            .map(|spot| spot.id)
            .collect();

        assert_eq!(ids, vec!["12", "3", "40", "7"]);
    }

    #[test]
    fn test_status_serializes_as_code() {
        let spot = raw("30", "-97").validate("1").unwrap();
        let value = serde_json::to_value(&spot).unwrap();

        assert_eq!(value["status"], 0);
        assert_eq!(value["latitude"], 30.0);
    }
}
