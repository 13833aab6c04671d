//! Contract with the remote appointment service and its HTTP implementation.
//!
//! The workflow engine and view-models only see the [`AppointmentService`]
//! and [`AdminService`] traits; [`ApiClient`] implements both over the REST
//! API, and tests substitute scripted doubles.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │ BookingWorkflow │    │ AppointmentSvc  │    │   ApiClient     │
//! │ AppointmentList │───▶│ AdminService    │───▶│ (reqwest +      │
//! │ AdminSession    │    │   (traits)      │    │  SessionStore)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use async_trait::async_trait;
use jiff::civil::Date;

use crate::{
    error::Result,
    models::{Appointment, NewAppointment, TimeSlot, User},
};

pub mod builder;
pub mod client;
mod detail;

pub use builder::{ClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use client::{ApiClient, MIN_PASSWORD_LEN};

/// Operations the booking workflow and the appointment list depend on.
#[async_trait]
pub trait AppointmentService: Send + Sync {
    /// Slots for `date`, each flagged with its availability.
    ///
    /// Fails with a network or server error; callers degrade gracefully.
    async fn availability(&self, date: Date) -> Result<Vec<TimeSlot>>;

    /// Books an appointment. Conflicts come back as server errors carrying
    /// the server's message.
    async fn create_appointment(&self, appointment: &NewAppointment) -> Result<Appointment>;

    /// Appointments of the current user.
    async fn my_appointments(&self) -> Result<Vec<Appointment>>;

    /// Cancels an appointment. Cancelling an id that no longer exists
    /// succeeds.
    async fn cancel_appointment(&self, id: u64) -> Result<()>;
}

/// Read-only operations backing the admin surface.
#[async_trait]
pub trait AdminService: Send + Sync {
    /// Every appointment of every user.
    async fn all_appointments(&self) -> Result<Vec<Appointment>>;

    /// Every registered user.
    async fn all_users(&self) -> Result<Vec<User>>;
}
