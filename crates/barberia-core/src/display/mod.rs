//! Display formatting for the terminal.
//!
//! Domain models implement [`std::fmt::Display`] directly; collections and
//! views that need context (the current time, a heading, joined users) go
//! through the wrapper types here. Everything renders as markdown.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │   Formatted     │
//! │ (Appointment,   │───▶│ (Appointments,  │───▶│    Output       │
//! │  SlotBoard)     │    │  Listing, ...)  │    │   (Terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (Services, Appointments,
//!   Listing, Directory)
//! - [`results`]: Booking confirmation and admin views (calendar, stats)
//! - [`status`]: One-line feedback (OperationStatus)
//! - [`datetime`]: `DD/MM/YYYY` date formatting
//! - [`models`]: Display implementations for domain models
//!
//! ```rust
//! use barberia_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Logged out");
//! assert_eq!(status.to_string(), "Success: Logged out\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Appointments, Directory, Listing, Services};
pub use datetime::{DayMonthYear, LocalDateTime, MonthHeading};
pub use status::{OperationStatus, StatusKind};
