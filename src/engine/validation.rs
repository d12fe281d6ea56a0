use validator::ValidateEmail;

use crate::{
    entities::{new_booking_id, Booking, BookingKind, BookingRequest},
    error::{
        invalid_distance_error, invalid_email_error, invalid_phone_error, missing_fields_error,
        Error,
    },
};

/// `local@domain.tld`: RFC-shaped per `validator`, and the domain must carry
/// at least one dot.
pub fn is_valid_email(email: &str) -> bool {
    if !email.to_string().validate_email() {
        return false;
    }

    email
        .rsplit_once('@')
        .map_or(false, |(_, domain)| domain.contains('.'))
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}

/// Checks presence and shape of the submitted fields. The minimum-distance
/// rule is applied separately once the trip is known to be well formed.
#[tracing::instrument(skip(request))]
pub fn validate(request: BookingRequest, kind: BookingKind) -> Result<Booking, Error> {
    let pickup_location = request.pickup_location.trim();
    let drop_location = request.drop_location.trim();
    let date = request.date.trim();
    let time = request.time.trim();
    let name = request.name.trim();
    let phone = request.phone.trim();
    let email = request.email.trim();

    let mut missing = Vec::new();
    if pickup_location.is_empty() {
        missing.push("pickupLocation");
    }
    if drop_location.is_empty() {
        missing.push("dropLocation");
    }
    if request.trip_type.is_none() {
        missing.push("tripType");
    }
    if date.is_empty() {
        missing.push("date");
    }
    if time.is_empty() {
        missing.push("time");
    }
    if request.car_type.is_none() {
        missing.push("carType");
    }
    if name.is_empty() {
        missing.push("name");
    }
    if phone.is_empty() {
        missing.push("phone");
    }
    if kind == BookingKind::Confirmation {
        if email.is_empty() {
            missing.push("email");
        }
        if request.committed_distance().is_none() {
            missing.push("distance");
        }
    }

    if !missing.is_empty() {
        tracing::info!(?missing, "rejecting request with missing fields");
        return Err(missing_fields_error(&missing));
    }

    // enquiries may omit the email, but a given one must be well formed
    if !email.is_empty() && !is_valid_email(email) {
        return Err(invalid_email_error());
    }

    if !is_valid_phone(phone) {
        return Err(invalid_phone_error());
    }

    if let Some(distance) = request.committed_distance() {
        if !distance.is_finite() || distance < 0.0 {
            return Err(invalid_distance_error());
        }
    }

    let booking_id = request
        .booking_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .unwrap_or_else(new_booking_id);

    // checked above
    let (Some(trip_type), Some(car_type)) = (request.trip_type, request.car_type) else {
        return Err(missing_fields_error(&["tripType", "carType"]));
    };

    Ok(Booking {
        booking_id,
        kind,
        pickup_location: pickup_location.into(),
        drop_location: drop_location.into(),
        trip_type,
        date: date.into(),
        time: time.into(),
        car_type,
        name: name.into(),
        phone: phone.into(),
        email: email.into(),
        estimation: None,
    })
}
