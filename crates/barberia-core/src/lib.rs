//! Core library for the barber shop booking client.
//!
//! The crate holds everything a front end needs to book and manage
//! appointments against the shop's REST API:
//!
//! - [`booking`]: the booking wizard state machine
//! - [`appointments`]: the customer's appointment list view-model
//! - [`admin`]: the admin session with listing, calendar, directory and stats
//! - [`api`]: the service contract and its HTTP client
//! - [`session`]: the persistent credential and profile store
//! - [`display`]: markdown formatting for the terminal
//! - [`handlers`]: one-shot runs of the above for command-line front ends
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use barberia_core::{
//!     booking::{BookingWorkflow, SubmissionOutcome},
//!     models::{Catalog, SlotTime},
//!     params::Login,
//!     ClientBuilder,
//! };
//! use jiff::civil::date;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ClientBuilder::new()
//!     .with_base_url(Some("http://localhost:8000/api/v1"))
//!     .build()
//!     .await?;
//! client
//!     .login(&Login {
//!         username: "carlos".to_string(),
//!         password: "secret".to_string(),
//!     })
//!     .await?;
//!
//! let mut booking = BookingWorkflow::starting_today(Catalog::default());
//! booking.choose_service("haircut")?;
//! booking.advance()?;
//! booking.pick_date(&client, date(2030, 9, 25)).await?;
//! booking.advance()?;
//! booking.choose_time("10:30".parse::<SlotTime>()?)?;
//! booking.advance()?;
//!
//! match booking.submit(&client).await? {
//!     SubmissionOutcome::Confirmed(confirmation) => println!("{}", confirmation.message),
//!     SubmissionOutcome::Failed { message } => eprintln!("{message}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod api;
pub mod appointments;
pub mod booking;
pub mod db;
pub mod display;
pub mod error;
pub mod handlers;
pub mod models;
pub mod params;
pub mod session;

// Re-export commonly used types
pub use admin::AdminSession;
pub use api::{AdminService, ApiClient, AppointmentService, ClientBuilder};
pub use appointments::AppointmentList;
pub use booking::{BookingStep, BookingWorkflow, SubmissionOutcome};
pub use display::OperationStatus;
pub use error::{BookingError, ErrorKind, Result};
pub use models::{Appointment, AppointmentStatus, Catalog, Service, SlotTime, TimeSlot, User};
pub use session::SessionStore;
