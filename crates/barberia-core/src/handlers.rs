//! One-shot handlers for front ends that run a whole flow per invocation.
//!
//! Interactive front ends drive [`BookingWorkflow`], [`AppointmentList`] and
//! [`AdminSession`] step by step. A command-line front end gets all its input
//! up front, so these handlers run the same state machines to completion and
//! hand back the final state for display.
//!
//! ```text
//! Front end → Handler → Workflow / View-model → AppointmentService
//! ```

use jiff::civil::{Date, DateTime};
use log::debug;

use crate::{
    admin::AdminSession,
    api::{AdminService, AppointmentService},
    appointments::AppointmentList,
    booking::{BookingWorkflow, SlotBoard, SubmissionOutcome},
    display::DayMonthYear,
    error::{BookingError, Result},
    models::Catalog,
    params::{Availability, BookAppointment, Id},
};

/// Where a one-shot booking stopped.
#[derive(Debug, Clone)]
pub struct BookingReport {
    /// The workflow in its final state
    pub workflow: BookingWorkflow,
    /// Submission result; `None` when the run stopped at slot selection
    pub outcome: Option<SubmissionOutcome>,
    /// Warning carried by estimated slots, kept after the board is cleared
    pub degraded: Option<String>,
    /// Why the requested time was refused on an estimated board
    pub rejected_time: Option<String>,
}

impl BookingReport {
    fn stopped(workflow: BookingWorkflow, degraded: Option<String>) -> Self {
        Self {
            workflow,
            outcome: None,
            degraded,
            rejected_time: None,
        }
    }

    /// Slots loaded for the requested date.
    pub fn slot_board(&self) -> Option<&SlotBoard> {
        self.workflow.slot_board()
    }

    /// Whether the run worked from estimated slots.
    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

/// Runs a booking through every workflow step.
///
/// Validation failures (unknown service, past date, unavailable time) are
/// returned as errors before anything is submitted. A rejected submission is
/// not an error: it is reported in the outcome.
///
/// When availability could not be loaded the report carries the degraded
/// warning on every path. A time refused by an estimated board is recorded
/// in `rejected_time` instead of failing the run, since the estimate says
/// nothing about the real schedule.
pub async fn handle_book<S>(
    service: &S,
    catalog: Catalog,
    today: Date,
    params: &BookAppointment,
) -> Result<BookingReport>
where
    S: AppointmentService + ?Sized,
{
    let mut workflow = BookingWorkflow::new(catalog, today);
    workflow.choose_service(&params.service_id)?;
    workflow.advance()?;
    workflow.pick_date(service, params.date).await?;
    workflow.advance()?;

    let degraded = workflow
        .slot_board()
        .and_then(SlotBoard::warning)
        .map(str::to_string);

    let Some(time) = params.time else {
        debug!("No time given, stopping at slot selection");
        return Ok(BookingReport::stopped(workflow, degraded));
    };

    if let Err(e) = workflow.choose_time(time) {
        if degraded.is_none() {
            return Err(e);
        }
        debug!("Estimated board refused {time}: {e}");
        let mut report = BookingReport::stopped(workflow, degraded);
        report.rejected_time = Some(e.to_string());
        return Ok(report);
    }

    workflow.advance()?;
    if let Some(notes) = &params.notes {
        workflow.set_notes(notes.as_str())?;
    }

    let outcome = workflow.submit(service).await?;
    Ok(BookingReport {
        workflow,
        outcome: Some(outcome),
        degraded,
        rejected_time: None,
    })
}

/// Looks up the slots for a date, degrading to estimated slots when the
/// service cannot answer.
pub async fn handle_availability<S>(
    service: &S,
    today: Date,
    params: &Availability,
) -> Result<SlotBoard>
where
    S: AppointmentService + ?Sized,
{
    if params.date < today {
        return Err(BookingError::validation("date").with_reason(format!(
            "{} is in the past",
            DayMonthYear(&params.date)
        )));
    }

    let outcome = service.availability(params.date).await;
    Ok(SlotBoard::from_outcome(
        params.date,
        outcome,
        &mut rand::thread_rng(),
    ))
}

/// Loads the user's appointments.
pub async fn handle_list_appointments<S>(service: &S) -> Result<AppointmentList>
where
    S: AppointmentService + ?Sized,
{
    let mut list = AppointmentList::new();
    list.refresh(service).await?;
    Ok(list)
}

/// Cancels an appointment after checking it has not taken place yet.
///
/// Returns the list as it stands after the cancellation.
pub async fn handle_cancel<S>(service: &S, params: &Id, now: DateTime) -> Result<AppointmentList>
where
    S: AppointmentService + ?Sized,
{
    let mut list = handle_list_appointments(service).await?;
    list.request_cancel(params.id, now)?;
    list.confirm_cancel(service).await?;
    Ok(list)
}

/// Opens an admin session with everything loaded.
pub async fn handle_admin_load<S>(service: &S, today: Date) -> Result<AdminSession>
where
    S: AdminService + ?Sized,
{
    let mut session = AdminSession::new(today);
    session.load(service).await?;
    Ok(session)
}
