//! Steps, draft and slot state of a booking session.

use jiff::civil::Date;
use log::warn;
use rand::Rng;

use super::fallback::fallback_slots;
use crate::{
    display::DayMonthYear,
    error::{BookingError, Result},
    models::{Appointment, NewAppointment, Service, SlotSource, SlotTime, TimeSlot},
};

/// Position of a booking session in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    /// Choosing one of the catalog services
    SelectingService,
    /// Choosing a day on or after today
    SelectingDate,
    /// Choosing an available slot on the chosen day
    SelectingTime,
    /// Reviewing the summary, editing notes and confirming
    ReviewingConfirmation,
    /// The server accepted the booking
    Confirmed,
}

impl BookingStep {
    /// The step `back` returns to, if any.
    pub fn previous(self) -> Option<Self> {
        match self {
            BookingStep::SelectingService | BookingStep::Confirmed => None,
            BookingStep::SelectingDate => Some(BookingStep::SelectingService),
            BookingStep::SelectingTime => Some(BookingStep::SelectingDate),
            BookingStep::ReviewingConfirmation => Some(BookingStep::SelectingTime),
        }
    }

    /// The step `advance` moves to, if any. Confirmation is reached through
    /// submission, never by advancing.
    pub fn next(self) -> Option<Self> {
        match self {
            BookingStep::SelectingService => Some(BookingStep::SelectingDate),
            BookingStep::SelectingDate => Some(BookingStep::SelectingTime),
            BookingStep::SelectingTime => Some(BookingStep::ReviewingConfirmation),
            BookingStep::ReviewingConfirmation | BookingStep::Confirmed => None,
        }
    }

    /// Short label for prompts and logs.
    pub fn label(self) -> &'static str {
        match self {
            BookingStep::SelectingService => "select a service",
            BookingStep::SelectingDate => "select a date",
            BookingStep::SelectingTime => "select a time",
            BookingStep::ReviewingConfirmation => "review and confirm",
            BookingStep::Confirmed => "confirmed",
        }
    }
}

/// The appointment under construction. Only the workflow mutates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub(super) service: Option<&'static Service>,
    pub(super) date: Option<Date>,
    pub(super) time: Option<SlotTime>,
    pub(super) notes: String,
}

impl Draft {
    /// Chosen service.
    pub fn service(&self) -> Option<&'static Service> {
        self.service
    }

    /// Chosen date.
    pub fn date(&self) -> Option<Date> {
        self.date
    }

    /// Chosen slot time.
    pub fn time(&self) -> Option<SlotTime> {
        self.time
    }

    /// Notes typed so far (possibly empty).
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Whether service, date and time are all set.
    pub fn is_complete(&self) -> bool {
        self.service.is_some() && self.date.is_some() && self.time.is_some()
    }

    /// Builds the creation payload, or reports the first missing field.
    pub fn to_request(&self) -> Result<NewAppointment> {
        let service = self
            .service
            .ok_or_else(|| BookingError::validation("service").with_reason("no service chosen"))?;
        let date = self
            .date
            .ok_or_else(|| BookingError::validation("date").with_reason("no date chosen"))?;
        let time = self
            .time
            .ok_or_else(|| BookingError::validation("time").with_reason("no time chosen"))?;

        let notes = self.notes.trim();
        Ok(NewAppointment {
            date,
            time,
            service_type: service.name.to_string(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }
}

/// Tag attached to a slot fetch. A result is applied only while its ticket
/// is the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    date: Date,
    seq: u64,
}

impl FetchTicket {
    pub(super) fn new(date: Date, seq: u64) -> Self {
        Self { date, seq }
    }

    /// Date the fetch was issued for.
    pub fn date(&self) -> Date {
        self.date
    }

    /// Issue order within the session; later tickets supersede earlier ones.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Slots loaded for one date.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotBoard {
    date: Date,
    slots: Vec<TimeSlot>,
    source: SlotSource,
}

impl SlotBoard {
    /// Builds the board for `date` from an availability answer.
    ///
    /// A failed lookup yields locally synthesized slots marked as degraded,
    /// with a warning naming the cause.
    pub fn from_outcome<R: Rng + ?Sized>(
        date: Date,
        outcome: Result<Vec<TimeSlot>>,
        rng: &mut R,
    ) -> Self {
        match outcome {
            Ok(mut slots) => {
                slots.sort_by_key(|slot| slot.time);
                Self {
                    date,
                    slots,
                    source: SlotSource::Live,
                }
            }
            Err(e) => {
                warn!("Availability for {date} unavailable, using estimated slots: {e}");
                Self {
                    date,
                    slots: fallback_slots(rng),
                    source: SlotSource::Degraded {
                        warning: format!(
                            "Could not load availability for {}; showing estimated slots ({})",
                            DayMonthYear(&date),
                            e.user_message("service unreachable")
                        ),
                    },
                }
            }
        }
    }

    /// Date the slots belong to.
    pub fn date(&self) -> Date {
        self.date
    }

    /// Slots in service order.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Where the slots came from.
    pub fn source(&self) -> &SlotSource {
        &self.source
    }

    /// Whether the slots were synthesized locally.
    pub fn is_degraded(&self) -> bool {
        matches!(self.source, SlotSource::Degraded { .. })
    }

    /// Warning to surface alongside degraded slots.
    pub fn warning(&self) -> Option<&str> {
        match &self.source {
            SlotSource::Degraded { warning } => Some(warning),
            SlotSource::Live => None,
        }
    }

    /// Looks up the slot starting at `time`.
    pub fn slot(&self, time: SlotTime) -> Option<&TimeSlot> {
        self.slots.iter().find(|slot| slot.time == time)
    }

    /// Number of slots that can be booked.
    pub fn available_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.available).count()
    }
}

/// Slot list state for the current draft date.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotState {
    /// No date chosen yet
    Idle,
    /// A fetch is outstanding for the ticket's date
    Loading(FetchTicket),
    /// Slots are known for the draft date
    Ready(SlotBoard),
}

/// What happened to a slot fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotResolution {
    /// The result belonged to the live fetch and replaced the slot list
    Applied,
    /// The ticket was superseded by a later date choice; nothing changed
    Stale,
}

/// A successful booking.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    /// The server's record of the booking
    pub appointment: Appointment,
    /// Human-readable summary for the customer
    pub message: String,
}

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The workflow moved to `Confirmed`
    Confirmed(Confirmation),
    /// The workflow stayed in review; `message` is what to show
    Failed { message: String },
}
