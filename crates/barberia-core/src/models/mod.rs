//! Data models for the booking client.
//!
//! These types mirror the JSON exchanged with the appointment service, plus
//! the static service catalog. Display implementations live in
//! [`crate::display::models`].

pub mod appointment;
pub mod service;
pub mod slot;
pub mod status;
pub mod user;

#[cfg(test)]
mod tests;

use jiff::{civil::DateTime, tz::TimeZone, Timestamp};
use serde::{Deserialize, Deserializer};

pub use appointment::{Appointment, NewAppointment};
pub use service::{Catalog, Service, SERVICES};
pub use slot::{AvailabilityResponse, SlotSource, SlotTime, TimeSlot};
pub use status::AppointmentStatus;
pub use user::{AccessToken, NewUser, User};

/// Accepts naive (`2025-09-20T10:00:00.123`) and zoned
/// (`2025-09-20T10:00:00Z`) stamps; anything unparseable becomes `None`.
pub(crate) fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_stamp))
}

fn parse_stamp(raw: &str) -> Option<DateTime> {
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Some(ts.to_zoned(TimeZone::system()).datetime());
    }
    raw.parse::<DateTime>().ok()
}
