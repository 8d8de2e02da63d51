use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::EARTH_RADIUS_KM;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A number as the backend sends it: a JSON number or a numeric string.
/// Anything else (null, booleans, objects, a missing field) lands in `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Default for NumericValue {
    fn default() -> Self {
        NumericValue::Other(serde_json::Value::Null)
    }
}

impl NumericValue {
    /// Parsed value, `NaN` when it is not a number or numeric string.
    pub fn as_f64(&self) -> f64 {
        match self {
            NumericValue::Number(n) => *n,
            NumericValue::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
            NumericValue::Other(_) => f64::NAN,
        }
    }
}

impl From<f64> for NumericValue {
    fn from(value: f64) -> Self {
        NumericValue::Number(value)
    }
}

impl From<&str> for NumericValue {
    fn from(value: &str) -> Self {
        NumericValue::Text(value.to_string())
    }
}

pub trait Locatable {
    fn coordinate(&self) -> Coordinate;
}

impl Locatable for Coordinate {
    fn coordinate(&self) -> Coordinate {
        *self
    }
}

impl<T: Locatable> Locatable for &T {
    fn coordinate(&self) -> Coordinate {
        (*self).coordinate()
    }
}

/// Unvalidated spot position, as held by the map and nearby views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSpotLocation {
    #[serde(default, deserialize_with = "deserialize_spot_id")]
    pub id: String,
    #[serde(default)]
    pub latitude: NumericValue,
    #[serde(default)]
    pub longitude: NumericValue,
}

impl ParkingSpotLocation {
    pub fn new(
        id: impl Into<String>,
        latitude: impl Into<NumericValue>,
        longitude: impl Into<NumericValue>,
    ) -> Self {
        Self {
            id: id.into(),
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }
}

impl Locatable for ParkingSpotLocation {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude.as_f64(), self.longitude.as_f64())
    }
}

fn deserialize_spot_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SpotId {
        Text(String),
        Number(i64),
    }

    Ok(match SpotId::deserialize(deserializer)? {
        SpotId::Text(s) => s,
        SpotId::Number(n) => n.to_string(),
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithDistance<T> {
    pub distance_km: f64,
    #[serde(flatten)]
    pub content: T,
}

impl<T> WithDistance<T> {
    pub fn new(distance_km: f64, content: T) -> Self {
        Self {
            distance_km,
            content,
        }
    }
}

impl<T: Locatable> Locatable for WithDistance<T> {
    fn coordinate(&self) -> Coordinate {
        self.content.coordinate()
    }
}

/// Great-circle distance in kilometers.
pub fn haversine_distance(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Keeps the candidates whose distance from `base` is at most `max_distance_km`,
/// in input order. Candidates with unparseable coordinates produce a `NaN`
/// distance and are dropped.
pub fn filter_nearby_points<T, I>(base: Coordinate, candidates: I, max_distance_km: f64) -> Vec<T>
where
    T: Locatable,
    I: IntoIterator<Item = T>,
{
    nearby_with_distance(base, candidates, max_distance_km)
        .into_iter()
        .map(|found| found.content)
        .collect()
}

pub fn nearby_with_distance<T, I>(
    base: Coordinate,
    candidates: I,
    max_distance_km: f64,
) -> Vec<WithDistance<T>>
where
    T: Locatable,
    I: IntoIterator<Item = T>,
{
    let mut malformed = 0usize;
    let nearby: Vec<_> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let distance = haversine_distance(base, candidate.coordinate());
            if distance.is_nan() {
                malformed += 1;
            }
            // NaN <= max is false, which drops malformed candidates
            (distance <= max_distance_km).then(|| WithDistance::new(distance, candidate))
        })
        .collect();

    if malformed > 0 {
        tracing::debug!("Dropped {} candidates with malformed coordinates", malformed);
    }

    nearby
}
