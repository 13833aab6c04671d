//! Client-side booking workflow.
//!
//! A booking session walks the customer through four steps and ends in a
//! confirmed reservation:
//!
//! ```text
//! SelectingService ─▶ SelectingDate ─▶ SelectingTime ─▶ ReviewingConfirmation ─▶ Confirmed
//!                          │                 ▲                   │
//!                          └── slot fetch ───┘                   └── submit (stays on failure)
//! ```
//!
//! [`BookingWorkflow`] is a synchronous state machine. Its effects are
//! returned to the caller instead of being performed in place: choosing a
//! date hands back a [`FetchTicket`] to resolve later, and confirming hands
//! back the [`NewAppointment`](crate::models::NewAppointment) to send. The
//! `async` drivers ([`BookingWorkflow::pick_date`],
//! [`BookingWorkflow::submit`]) run those effects against any
//! [`AppointmentService`](crate::api::AppointmentService).
//!
//! When availability cannot be loaded the workflow keeps going on locally
//! synthesized slots ([`fallback_slots`]) and flags the board as degraded.

mod draft;
mod fallback;
mod workflow;


pub use draft::{
    BookingStep, Confirmation, Draft, FetchTicket, SlotBoard, SlotResolution, SlotState,
    SubmissionOutcome,
};
pub use fallback::{fallback_slots, FALLBACK_AVAILABILITY};
pub use workflow::{BookingWorkflow, GENERIC_SUBMIT_ERROR};
