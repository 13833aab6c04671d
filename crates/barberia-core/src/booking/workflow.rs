//! The booking wizard state machine.

use jiff::{civil::Date, Zoned};
use log::{debug, info, warn};
use rand::Rng;

use super::draft::{
    BookingStep, Confirmation, Draft, FetchTicket, SlotBoard, SlotResolution, SlotState,
    SubmissionOutcome,
};
use crate::{
    api::AppointmentService,
    display::DayMonthYear,
    error::{BookingError, Result},
    models::{Appointment, Catalog, NewAppointment, Service, SlotTime, TimeSlot},
};

/// Message shown when a submission fails without a server explanation.
pub const GENERIC_SUBMIT_ERROR: &str = "Could not confirm the appointment";

/// One booking session: service → date → time → review → confirmed.
///
/// Transitions are methods that either apply or return a validation error
/// and leave the session untouched. Slot fetches are tagged with a
/// [`FetchTicket`]; results for superseded tickets are dropped.
///
/// ```rust
/// use barberia_core::{booking::{BookingStep, BookingWorkflow}, models::Catalog};
/// use jiff::civil::date;
///
/// let mut workflow = BookingWorkflow::new(Catalog::default(), date(2025, 9, 20));
/// workflow.choose_service("haircut")?;
/// assert_eq!(workflow.advance()?, BookingStep::SelectingDate);
///
/// // Dates before today never pass the guard.
/// assert!(workflow.choose_date(date(2025, 9, 19)).is_err());
/// let ticket = workflow.choose_date(date(2025, 9, 25))?;
/// assert!(ticket.is_some());
/// # Ok::<(), barberia_core::BookingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BookingWorkflow {
    catalog: Catalog,
    today: Date,
    step: BookingStep,
    draft: Draft,
    slots: SlotState,
    next_seq: u64,
    submitting: bool,
    last_error: Option<String>,
    confirmation: Option<Confirmation>,
}

impl BookingWorkflow {
    /// Starts a session where `today` is the earliest bookable date.
    pub fn new(catalog: Catalog, today: Date) -> Self {
        Self {
            catalog,
            today,
            step: BookingStep::SelectingService,
            draft: Draft::default(),
            slots: SlotState::Idle,
            next_seq: 0,
            submitting: false,
            last_error: None,
            confirmation: None,
        }
    }

    /// Starts a session using today's date in the system time zone.
    pub fn starting_today(catalog: Catalog) -> Self {
        Self::new(catalog, Zoned::now().date())
    }

    /// Current step.
    pub fn step(&self) -> BookingStep {
        self.step
    }

    /// The draft built so far.
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Earliest bookable date.
    pub fn today(&self) -> Date {
        self.today
    }

    /// Services that can be chosen.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Slot state for the draft date.
    pub fn slots(&self) -> &SlotState {
        &self.slots
    }

    /// Loaded slots, once the fetch for the draft date has resolved.
    pub fn slot_board(&self) -> Option<&SlotBoard> {
        match &self.slots {
            SlotState::Ready(board) => Some(board),
            SlotState::Idle | SlotState::Loading(_) => None,
        }
    }

    /// Whether a slot fetch for the draft date is outstanding.
    pub fn is_loading_slots(&self) -> bool {
        matches!(self.slots, SlotState::Loading(_))
    }

    /// Whether a submission is in flight; confirm is disabled meanwhile.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Message of the last failed submission, cleared on the next attempt.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The confirmation, once the session reached `Confirmed`.
    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    /// Whether `advance` would be accepted from the current step.
    pub fn can_advance(&self) -> bool {
        match self.step {
            BookingStep::SelectingService => self.draft.service.is_some(),
            BookingStep::SelectingDate => self.draft.date.is_some(),
            BookingStep::SelectingTime => self.draft.time.is_some(),
            BookingStep::ReviewingConfirmation | BookingStep::Confirmed => false,
        }
    }

    /// Whether `confirm` would be accepted.
    pub fn can_confirm(&self) -> bool {
        self.step == BookingStep::ReviewingConfirmation
            && !self.submitting
            && self.draft.is_complete()
    }

    /// Chooses a service by catalog id.
    pub fn choose_service(&mut self, id: &str) -> Result<&'static Service> {
        self.expect_step(BookingStep::SelectingService)?;

        let service = self.catalog.find(id).ok_or_else(|| {
            BookingError::validation("service").with_reason(format!("unknown service '{id}'"))
        })?;

        self.draft.service = Some(service);
        Ok(service)
    }

    /// Moves to the next step once the current step's field is set.
    pub fn advance(&mut self) -> Result<BookingStep> {
        let next = self.step.next().ok_or_else(|| {
            BookingError::validation("step")
                .with_reason(format!("cannot advance from '{}'", self.step.label()))
        })?;

        if !self.can_advance() {
            let field = match self.step {
                BookingStep::SelectingService => "service",
                BookingStep::SelectingDate => "date",
                _ => "time",
            };
            return Err(
                BookingError::validation(field).with_reason("must be chosen before continuing")
            );
        }

        debug!("Booking step {} -> {}", self.step.label(), next.label());
        self.step = next;
        Ok(next)
    }

    /// Returns to the previous step, keeping every field already chosen.
    pub fn back(&mut self) -> Result<BookingStep> {
        self.ensure_idle()?;

        let previous = self.step.previous().ok_or_else(|| {
            BookingError::validation("step")
                .with_reason(format!("cannot go back from '{}'", self.step.label()))
        })?;

        self.step = previous;
        Ok(previous)
    }

    /// Chooses a date and issues a slot fetch for it.
    ///
    /// Returns `None` when `date` is already the draft date, since its slots
    /// are already loaded or loading. Choosing a different date clears the
    /// chosen time and supersedes any outstanding fetch.
    pub fn choose_date(&mut self, date: Date) -> Result<Option<FetchTicket>> {
        self.expect_step(BookingStep::SelectingDate)?;

        if date < self.today {
            return Err(BookingError::validation("date").with_reason(format!(
                "{} is in the past; the earliest bookable day is {}",
                DayMonthYear(&date),
                DayMonthYear(&self.today)
            )));
        }

        if self.draft.date == Some(date) && self.slots != SlotState::Idle {
            return Ok(None);
        }

        if self.draft.date != Some(date) {
            self.draft.time = None;
        }
        self.draft.date = Some(date);

        let ticket = FetchTicket::new(date, self.next_seq);
        self.next_seq += 1;
        self.slots = SlotState::Loading(ticket);

        debug!("Issued slot fetch #{} for {date}", ticket.seq());
        Ok(Some(ticket))
    }

    /// Applies a slot fetch result using the thread RNG for degraded mode.
    pub fn resolve_slots(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<TimeSlot>>,
    ) -> SlotResolution {
        self.resolve_slots_with(ticket, outcome, &mut rand::thread_rng())
    }

    /// Applies a slot fetch result.
    ///
    /// Results whose ticket is not the live one are dropped. A failed fetch
    /// still resolves, to a degraded board (see [`SlotBoard::from_outcome`]).
    pub fn resolve_slots_with<R: Rng + ?Sized>(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<TimeSlot>>,
        rng: &mut R,
    ) -> SlotResolution {
        if self.slots != SlotState::Loading(ticket) {
            debug!("Dropping slots for superseded fetch ({})", ticket.date());
            return SlotResolution::Stale;
        }

        let board = SlotBoard::from_outcome(ticket.date(), outcome, rng);
        self.slots = SlotState::Ready(board);
        SlotResolution::Applied
    }

    /// Chooses the slot starting at `time`; it must be listed and available.
    pub fn choose_time(&mut self, time: SlotTime) -> Result<()> {
        self.expect_step(BookingStep::SelectingTime)?;

        let board = match &self.slots {
            SlotState::Ready(board) => board,
            SlotState::Loading(_) => {
                return Err(BookingError::validation("time").with_reason("slots are still loading"))
            }
            SlotState::Idle => {
                return Err(BookingError::validation("time").with_reason("no date chosen"))
            }
        };

        match board.slot(time) {
            Some(slot) if slot.available => {
                self.draft.time = Some(time);
                Ok(())
            }
            Some(_) => Err(BookingError::validation("time")
                .with_reason(format!("{time} is no longer available"))),
            None => Err(BookingError::validation("time").with_reason(format!(
                "{time} is not a slot on {}",
                DayMonthYear(&board.date())
            ))),
        }
    }

    /// Replaces the notes. Optional and unvalidated.
    pub fn set_notes(&mut self, notes: impl Into<String>) -> Result<()> {
        self.expect_step(BookingStep::ReviewingConfirmation)?;
        self.ensure_idle()?;
        self.draft.notes = notes.into();
        Ok(())
    }

    /// Starts a submission and returns the payload to send.
    ///
    /// Rejected while another submission is in flight or while any of
    /// service, date and time is missing.
    pub fn confirm(&mut self) -> Result<NewAppointment> {
        self.expect_step(BookingStep::ReviewingConfirmation)?;
        self.ensure_idle()?;

        let request = self.draft.to_request()?;
        self.submitting = true;
        self.last_error = None;
        Ok(request)
    }

    /// Applies the answer to the submission started by [`confirm`].
    ///
    /// [`confirm`]: Self::confirm
    pub fn finish_submission(&mut self, outcome: Result<Appointment>) -> Result<SubmissionOutcome> {
        if !self.submitting {
            return Err(BookingError::validation("submission").with_reason("no submission in flight"));
        }
        self.submitting = false;

        match outcome {
            Ok(appointment) => {
                let message = format!(
                    "Your appointment is booked for {} at {}.",
                    DayMonthYear(&appointment.date),
                    appointment.time
                );
                info!("Booking confirmed: appointment {}", appointment.id);

                let confirmation = Confirmation {
                    appointment,
                    message,
                };
                self.step = BookingStep::Confirmed;
                self.draft = Draft::default();
                self.slots = SlotState::Idle;
                self.confirmation = Some(confirmation.clone());
                Ok(SubmissionOutcome::Confirmed(confirmation))
            }
            Err(e) => {
                let message = e.user_message(GENERIC_SUBMIT_ERROR);
                warn!("Booking rejected: {e}");
                self.last_error = Some(message.clone());
                Ok(SubmissionOutcome::Failed { message })
            }
        }
    }

    /// Fetches the slots for `ticket` and applies them.
    pub async fn load_slots<S>(&mut self, service: &S, ticket: FetchTicket) -> SlotResolution
    where
        S: AppointmentService + ?Sized,
    {
        let outcome = service.availability(ticket.date()).await;
        self.resolve_slots(ticket, outcome)
    }

    /// Chooses a date and waits for its slots.
    pub async fn pick_date<S>(&mut self, service: &S, date: Date) -> Result<Option<SlotResolution>>
    where
        S: AppointmentService + ?Sized,
    {
        match self.choose_date(date)? {
            Some(ticket) => Ok(Some(self.load_slots(service, ticket).await)),
            None => Ok(None),
        }
    }

    /// Confirms and submits the draft.
    pub async fn submit<S>(&mut self, service: &S) -> Result<SubmissionOutcome>
    where
        S: AppointmentService + ?Sized,
    {
        let request = self.confirm()?;
        let outcome = service.create_appointment(&request).await;
        self.finish_submission(outcome)
    }

    fn expect_step(&self, expected: BookingStep) -> Result<()> {
        if self.step == expected {
            Ok(())
        } else {
            Err(BookingError::validation("step").with_reason(format!(
                "expected to {}, but the booking is at '{}'",
                expected.label(),
                self.step.label()
            )))
        }
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.submitting {
            Err(BookingError::validation("submission").with_reason("a submission is in flight"))
        } else {
            Ok(())
        }
    }
}
