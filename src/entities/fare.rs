use serde::{Deserialize, Serialize};

use crate::entities::{CarType, TripType};

pub const ONE_WAY_MIN_KM: f64 = 130.0;
pub const ROUND_TRIP_MIN_KM: f64 = 250.0;

/// Round trips touching Bangalore bill at least 300 km. Matched as a
/// case-insensitive substring of either free-text location; no geocoding.
pub const BANGALORE_ROUND_TRIP_MIN_KM: f64 = 300.0;

const BANGALORE: &str = "bangalore";

/// Average highway speed used when the client did not report a duration.
const AVERAGE_SPEED_KMPH: f64 = 60.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareEstimate {
    pub distance: f64,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub base_fare: f64,
    #[serde(default)]
    pub total_fare: f64,
    #[serde(default)]
    pub car_type: CarType,
    #[serde(default)]
    pub trip_type: TripType,
}

/// Outcome of the minimum-distance check.
#[derive(Clone, Debug, PartialEq)]
pub enum Verdict {
    Accepted(FareEstimate),
    Rejected { min_distance: f64, message: String },
}

/// Everything the rule needs to know about a trip.
#[derive(Clone, Copy, Debug)]
pub struct Trip<'a> {
    pub trip_type: TripType,
    pub car_type: CarType,
    pub distance: f64,
    pub pickup_location: &'a str,
    pub drop_location: &'a str,
}

/// Per-kilometre rate in rupees.
pub fn rate(car_type: CarType) -> f64 {
    match car_type {
        CarType::Sedan | CarType::Etios => 14.0,
        CarType::Suv => 19.0,
        CarType::Innova => 20.0,
    }
}

/// Driver bata charged once per trip.
pub fn driver_allowance(trip_type: TripType) -> f64 {
    match trip_type {
        TripType::OneWay => 400.0,
        TripType::RoundTrip => 500.0,
    }
}

pub fn mentions_bangalore(location: &str) -> bool {
    location.to_lowercase().contains(BANGALORE)
}

pub fn min_distance(trip_type: TripType, pickup_location: &str, drop_location: &str) -> f64 {
    match trip_type {
        TripType::OneWay => ONE_WAY_MIN_KM,
        TripType::RoundTrip
            if mentions_bangalore(pickup_location) || mentions_bangalore(drop_location) =>
        {
            BANGALORE_ROUND_TRIP_MIN_KM
        }
        TripType::RoundTrip => ROUND_TRIP_MIN_KM,
    }
}

fn rejection_message(trip_type: TripType, min_distance: f64) -> String {
    if trip_type == TripType::RoundTrip && min_distance == BANGALORE_ROUND_TRIP_MIN_KM {
        return format!(
            "Minimum {} km required for Bangalore pickup round trips",
            min_distance
        );
    }

    format!("Minimum {} km required for {} trips", min_distance, trip_type)
}

pub fn total_fare(car_type: CarType, trip_type: TripType, distance: f64) -> f64 {
    distance * rate(car_type) + driver_allowance(trip_type)
}

/// `"4h 10m"`, or `"45m"` under an hour.
pub fn format_duration(distance: f64) -> String {
    let minutes = (distance * 60.0 / AVERAGE_SPEED_KMPH).floor() as u64;
    let (hours, minutes) = (minutes / 60, minutes % 60);

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Applies the minimum-distance rule and, when it holds, prices the trip.
/// `duration` is carried through when the client measured one.
#[tracing::instrument(level = "debug")]
pub fn evaluate(trip: Trip<'_>, duration: Option<String>) -> Verdict {
    let min_distance = min_distance(trip.trip_type, trip.pickup_location, trip.drop_location);

    if trip.distance < min_distance {
        return Verdict::Rejected {
            min_distance,
            message: rejection_message(trip.trip_type, min_distance),
        };
    }

    let base_fare = trip.distance * rate(trip.car_type);

    Verdict::Accepted(FareEstimate {
        distance: trip.distance,
        duration: duration.unwrap_or_else(|| format_duration(trip.distance)),
        base_fare,
        total_fare: total_fare(trip.car_type, trip.trip_type, trip.distance),
        car_type: trip.car_type,
        trip_type: trip.trip_type,
    })
}
