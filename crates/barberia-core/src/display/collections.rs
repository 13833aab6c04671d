//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper handles the empty case with a short sentence so commands
//! never print a blank screen.

use std::fmt;

use jiff::civil::DateTime;

use super::datetime::DayMonthYear;
use crate::{
    admin::{DirectoryEntry, ListingEntry},
    models::{Appointment, Service},
};

/// The service catalog as a bullet list.
pub struct Services(pub &'static [Service]);

impl fmt::Display for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Services")?;
        writeln!(f)?;
        for service in self.0 {
            write!(f, "{service}")?;
        }
        Ok(())
    }
}

/// A customer's appointments, each tagged upcoming or past relative to
/// `now`.
///
/// ```rust
/// use barberia_core::{display::Appointments, models::{Appointment, SlotTime}};
/// use jiff::civil::date;
///
/// let booked = Appointment {
///     id: 4,
///     user_id: 1,
///     date: date(2025, 9, 25),
///     time: SlotTime::new(10, 30).unwrap(),
///     service_type: "Corte de pelo".to_string(),
///     notes: None,
///     created_at: None,
/// };
/// let items = vec![booked];
/// let output = Appointments::new(&items, date(2025, 9, 20).at(9, 0, 0, 0)).to_string();
/// assert!(output.contains("25/09/2025 at 10:30"));
/// assert!(output.contains("● Upcoming"));
/// ```
pub struct Appointments<'a> {
    items: &'a [Appointment],
    now: DateTime,
}

impl<'a> Appointments<'a> {
    /// Wraps `items`, judging their status against `now`.
    pub fn new(items: &'a [Appointment], now: DateTime) -> Self {
        Self { items, now }
    }

    /// Number of appointments.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no appointments.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for Appointments<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return writeln!(f, "You have no appointments.");
        }

        for appointment in self.items {
            write!(f, "{appointment}")?;
            writeln!(f, "{}", appointment.status(self.now).with_icon())?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Admin appointment listing, joined with client names.
pub struct Listing<'a> {
    entries: Vec<ListingEntry<'a>>,
    day: Option<jiff::civil::Date>,
}

impl<'a> Listing<'a> {
    /// Listing over every appointment.
    pub fn all(entries: Vec<ListingEntry<'a>>) -> Self {
        Self { entries, day: None }
    }

    /// Listing restricted to one day; the heading names the day.
    pub fn for_day(entries: Vec<ListingEntry<'a>>, day: jiff::civil::Date) -> Self {
        Self {
            entries,
            day: Some(day),
        }
    }
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.day {
            Some(day) => writeln!(f, "# Appointments for {} ({})", DayMonthYear(day), self.entries.len())?,
            None => writeln!(f, "# All appointments ({})", self.entries.len())?,
        }
        writeln!(f)?;

        if self.entries.is_empty() {
            return match &self.day {
                Some(day) => writeln!(f, "No appointments on {}.", DayMonthYear(day)),
                None => writeln!(f, "No appointments."),
            };
        }

        for entry in &self.entries {
            let appointment = entry.appointment;
            writeln!(
                f,
                "- **{}** {} · {} · {}",
                appointment.time,
                DayMonthYear(&appointment.date),
                entry.client_name(),
                appointment.service_type
            )?;
            if let Some(user) = entry.user {
                writeln!(f, "  - Email: {}", user.email)?;
            }
            if let Some(notes) = appointment.notes() {
                writeln!(f, "  - Notes: {notes}")?;
            }
        }
        Ok(())
    }
}

/// Admin user directory with appointment counts.
pub struct Directory<'a>(pub Vec<DirectoryEntry<'a>>);

impl fmt::Display for Directory<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Users ({})", self.0.len())?;
        writeln!(f)?;

        if self.0.is_empty() {
            return writeln!(f, "No users found.");
        }

        for entry in &self.0 {
            let plural = if entry.appointments == 1 { "" } else { "s" };
            write!(
                f,
                "- **{}** <{}>: {} appointment{plural}",
                entry.user.username, entry.user.email, entry.appointments
            )?;
            if let Some(created_at) = &entry.user.created_at {
                write!(f, ", registered {}", DayMonthYear(&created_at.date()))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
