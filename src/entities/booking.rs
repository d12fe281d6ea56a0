use std::fmt;

use chrono::Utc;
use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::entities::FareEstimate;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    #[default]
    OneWay,
    RoundTrip,
}

impl TripType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::OneWay => "one-way",
            Self::RoundTrip => "round-trip",
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarType {
    #[default]
    Sedan,
    Etios,
    Suv,
    Innova,
}

impl CarType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sedan => "sedan",
            Self::Etios => "etios",
            Self::Suv => "suv",
            Self::Innova => "innova",
        }
    }
}

impl fmt::Display for CarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Form submission as sent by the booking widget.
///
/// Every field is optional on the wire so that a missing value surfaces as a
/// descriptive validation error instead of a deserialization rejection.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub pickup_location: String,
    #[serde(default)]
    pub drop_location: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub trip_type: Option<TripType>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub car_type: Option<CarType>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub distance: Option<f64>,
    pub estimation: Option<FareEstimate>,
    pub booking_id: Option<String>,
}

/// A request that passed field validation. Trip and car type are resolved,
/// text fields are trimmed and non-empty.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: String,
    pub kind: BookingKind,
    pub pickup_location: String,
    pub drop_location: String,
    pub trip_type: TripType,
    pub date: String,
    pub time: String,
    pub car_type: CarType,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub estimation: Option<FareEstimate>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingKind {
    Enquiry,
    Confirmation,
}

/// A select left on its placeholder posts `""`; treat it like an absent field.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value: Option<String> = Option::deserialize(deserializer)?;

    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            let deserializer: de::value::StrDeserializer<'_, de::value::Error> =
                value.into_deserializer();
            T::deserialize(deserializer)
                .map(Some)
                .map_err(|err| <D::Error as de::Error>::custom(err))
        }
    }
}

impl BookingRequest {
    /// The distance the client committed to, preferring the attached estimate.
    pub fn committed_distance(&self) -> Option<f64> {
        self.estimation
            .as_ref()
            .map(|estimation| estimation.distance)
            .or(self.distance)
    }

    pub fn client_duration(&self) -> Option<String> {
        self.estimation
            .as_ref()
            .map(|estimation| estimation.duration.clone())
            .filter(|duration| !duration.trim().is_empty())
    }
}

/// `HRD-20240131-3FA2C1`: issue date plus six hex digits of a v4 uuid.
pub fn new_booking_id() -> String {
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(6)
        .collect();

    format!(
        "HRD-{}-{}",
        Utc::now().format("%Y%m%d"),
        suffix.to_uppercase()
    )
}

#[test]
fn booking_id_shape() {
    let id = new_booking_id();
    let parts: Vec<&str> = id.split('-').collect();

    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "HRD");
    assert_eq!(parts[1].len(), 8);
    assert_eq!(parts[2].len(), 6);
    assert!(parts[2]
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
}

#[test]
fn request_uses_wire_names() {
    let request: BookingRequest = serde_json::from_value(serde_json::json!({
        "pickupLocation": "Coimbatore",
        "dropLocation": "Chennai",
        "tripType": "round-trip",
        "carType": "innova",
        "distance": 510.0,
    }))
    .unwrap();

    assert_eq!(request.trip_type, Some(TripType::RoundTrip));
    assert_eq!(request.car_type, Some(CarType::Innova));
    assert_eq!(request.committed_distance(), Some(510.0));
    assert!(request.name.is_empty());
}

#[test]
fn blank_selects_read_as_missing() {
    let request: BookingRequest = serde_json::from_value(serde_json::json!({
        "tripType": "",
        "carType": "  ",
    }))
    .unwrap();

    assert_eq!(request.trip_type, None);
    assert_eq!(request.car_type, None);

    let request: BookingRequest = serde_json::from_value(serde_json::json!({
        "tripType": null,
        "carType": " suv ",
    }))
    .unwrap();

    assert_eq!(request.trip_type, None);
    assert_eq!(request.car_type, Some(CarType::Suv));
}

#[test]
fn unknown_car_type_is_still_rejected() {
    let result = serde_json::from_value::<BookingRequest>(serde_json::json!({
        "carType": "bus",
    }));

    assert!(result.is_err());
}
