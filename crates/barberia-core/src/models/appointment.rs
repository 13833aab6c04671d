//! Appointment records as exchanged with the appointment service.

use jiff::civil::{Date, DateTime};
use serde::{Deserialize, Serialize};

use super::{lenient_datetime, AppointmentStatus, SlotTime};

/// A server-acknowledged appointment. The client only ever holds read-only
/// copies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    /// Unique identifier assigned by the server
    pub id: u64,

    /// Owner of the appointment
    pub user_id: u64,

    /// Day of the appointment
    pub date: Date,

    /// Start time of the appointment
    pub time: SlotTime,

    /// Display name of the booked service
    pub service_type: String,

    /// Free-form notes left by the customer
    #[serde(default)]
    pub notes: Option<String>,

    /// When the server recorded the booking (server local time)
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime>,
}

impl Appointment {
    /// Start of the appointment as a civil datetime.
    pub fn starts_at(&self) -> DateTime {
        self.date.to_datetime(self.time.to_civil())
    }

    /// Status relative to `now`.
    pub fn status(&self, now: DateTime) -> AppointmentStatus {
        if self.starts_at() < now {
            AppointmentStatus::Past
        } else {
            AppointmentStatus::Upcoming
        }
    }

    /// Notes, treating blank notes as absent.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// Body of `POST /appointments/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewAppointment {
    /// Day of the appointment (`YYYY-MM-DD`)
    pub date: Date,

    /// Start time (`HH:MM`)
    pub time: SlotTime,

    /// Display name of the service
    pub service_type: String,

    /// Notes, sent as `null` when the customer left none
    pub notes: Option<String>,
}
