//! Display implementations for domain models.
//!
//! Output is markdown, rendered by the CLI's terminal renderer.

use std::fmt;

use super::datetime::{DayMonthYear, LocalDateTime};
use crate::{
    booking::{Draft, SlotBoard},
    models::{Appointment, AppointmentStatus, Service, TimeSlot, User},
};

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- **{}** ({}): {}", self.name, self.id, self.price)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.available {
            write!(f, "{} available", self.time)
        } else {
            write!(f, "~~{}~~ taken", self.time)
        }
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} at {} (ID: {})",
            DayMonthYear(&self.date),
            self.time,
            self.id
        )?;
        writeln!(f)?;
        writeln!(f, "- **Service**: {}", self.service_type)?;
        if let Some(notes) = self.notes() {
            writeln!(f, "- **Notes**: {notes}")?;
        }
        if let Some(created_at) = &self.created_at {
            writeln!(f, "- **Booked**: {}", LocalDateTime(created_at))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} (ID: {})", self.username, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Email**: {}", self.email)?;
        if let Some(created_at) = &self.created_at {
            writeln!(f, "- **Registered**: {}", LocalDateTime(created_at))?;
        }
        Ok(())
    }
}

impl fmt::Display for SlotBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "# Slots for {} ({} available)",
            DayMonthYear(&self.date()),
            self.available_count()
        )?;
        writeln!(f)?;

        if let Some(warning) = self.warning() {
            writeln!(f, "> **Warning**: {warning}")?;
            writeln!(f)?;
        }

        if self.slots().is_empty() {
            return writeln!(f, "No slots on this day.");
        }

        for slot in self.slots() {
            writeln!(f, "- {slot}")?;
        }
        Ok(())
    }
}

/// Review summary shown before confirming.
impl fmt::Display for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Booking summary")?;
        writeln!(f)?;
        match self.service() {
            Some(service) => writeln!(f, "- **Service**: {} ({})", service.name, service.price)?,
            None => writeln!(f, "- **Service**: not chosen")?,
        }
        match self.date() {
            Some(date) => writeln!(f, "- **Date**: {}", DayMonthYear(&date))?,
            None => writeln!(f, "- **Date**: not chosen")?,
        }
        match self.time() {
            Some(time) => writeln!(f, "- **Time**: {time}")?,
            None => writeln!(f, "- **Time**: not chosen")?,
        }
        let notes = self.notes().trim();
        if !notes.is_empty() {
            writeln!(f, "- **Notes**: {notes}")?;
        }
        Ok(())
    }
}
