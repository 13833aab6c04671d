//! Appointment status.

/// Where an appointment stands relative to the current time.
///
/// The server deletes cancelled appointments, so every record the client
/// receives is a confirmed booking; only its position in time varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    /// The appointment has not started yet and may still be cancelled
    Upcoming,

    /// The appointment start time has passed
    Past,
}

impl AppointmentStatus {
    /// Lowercase name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Upcoming => "upcoming",
            AppointmentStatus::Past => "past",
        }
    }

    /// Status with an icon for list display.
    ///
    /// ```rust
    /// use barberia_core::models::AppointmentStatus;
    ///
    /// assert_eq!(AppointmentStatus::Upcoming.with_icon(), "● Upcoming");
    /// assert_eq!(AppointmentStatus::Past.with_icon(), "○ Past");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            AppointmentStatus::Upcoming => "● Upcoming",
            AppointmentStatus::Past => "○ Past",
        }
    }
}
