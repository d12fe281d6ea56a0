mod booking;
mod fare;
mod notification;

pub use booking::{new_booking_id, Booking, BookingKind, BookingRequest, CarType, TripType};
pub use fare::{evaluate, FareEstimate, Trip, Verdict};
pub use notification::{EmailResults, NotificationResult};
