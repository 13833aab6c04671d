//! Parameter structures for booking client operations
//!
//! These structures carry user input from any front end (the CLI today) into
//! the core without framework-specific derives. Front ends define their own
//! argument types and convert into these with `From`.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   Core Params   │    │  Workflow /     │
//! │  (clap derives) │───▶│ (minimal deps)  │───▶│  ApiClient      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::SlotTime;

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for logging in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Login {
    /// Username or email, sent as the form's `username` field
    pub username: String,
    /// Plain-text password, only ever sent to `/token`
    pub password: String,
}

/// Parameters for registering a new account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Signup {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Parameters for looking up availability on a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Availability {
    /// Day to look up
    pub date: Date,
}

/// Parameters for booking an appointment in one go.
///
/// The booking still runs through every workflow step; `time` may be left
/// out to stop after the slots for `date` are loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointment {
    /// Catalog id of the service
    pub service_id: String,
    /// Day of the appointment
    pub date: Date,
    /// Start time; `None` stops at slot selection
    pub time: Option<SlotTime>,
    /// Optional notes for the barber
    #[serde(default)]
    pub notes: Option<String>,
}

/// Parameters for the admin appointment listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListAppointments {
    /// Only appointments on this date; all when `None`
    pub date: Option<Date>,
}

/// Parameters for searching the admin user directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchUsers {
    /// Case-insensitive fragment of username or email
    pub query: Option<String>,
}

/// Parameters for the admin calendar view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowCalendar {
    /// Any date inside the month to show; the current month when `None`
    pub month: Option<Date>,
    /// Day whose appointments are listed under the grid
    pub day: Option<Date>,
}
