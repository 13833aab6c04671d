//! Time slots and slot times.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// First bookable hour of the day.
pub const OPENING_HOUR: u8 = 9;

/// Hour at which the shop closes; the last slot starts half an hour earlier.
pub const CLOSING_HOUR: u8 = 18;

/// Length of a slot in minutes.
pub const SLOT_MINUTES: u8 = 30;

/// A time of day with minute precision, displayed and sent as `HH:MM`.
///
/// The server may answer with `HH:MM:SS`; seconds are accepted on input and
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotTime {
    hour: u8,
    minute: u8,
}

impl SlotTime {
    /// Creates a slot time, rejecting out-of-range components.
    pub fn new(hour: u8, minute: u8) -> Result<Self, String> {
        if hour > 23 || minute > 59 {
            return Err(format!("Invalid time of day: {hour:02}:{minute:02}"));
        }
        Ok(Self { hour, minute })
    }

    /// Hour component (0-23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute component (0-59).
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Whether the time falls on the half-hour grid within opening hours.
    pub fn is_bookable(&self) -> bool {
        self.minute % SLOT_MINUTES == 0 && self.hour >= OPENING_HOUR && self.hour < CLOSING_HOUR
    }

    /// Every slot start between opening and closing, in order.
    ///
    /// ```rust
    /// use barberia_core::models::SlotTime;
    ///
    /// let grid: Vec<_> = SlotTime::opening_grid().collect();
    /// assert_eq!(grid.len(), 18);
    /// assert_eq!(grid[0].to_string(), "09:00");
    /// assert_eq!(grid[17].to_string(), "17:30");
    /// ```
    pub fn opening_grid() -> impl Iterator<Item = SlotTime> {
        (OPENING_HOUR..CLOSING_HOUR).flat_map(|hour| {
            (0..60)
                .step_by(usize::from(SLOT_MINUTES))
                .map(move |minute| SlotTime { hour, minute })
        })
    }

    /// Converts to a jiff civil time.
    pub fn to_civil(self) -> jiff::civil::Time {
        jiff::civil::time(self.hour as i8, self.minute as i8, 0, 0)
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for SlotTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid time '{s}', expected HH:MM");
        let mut parts = s.trim().split(':');
        let hour = parts.next().ok_or_else(invalid)?;
        let minute = parts.next().ok_or_else(invalid)?;
        // Seconds, when present, must still be numeric.
        if let Some(seconds) = parts.next() {
            let whole = seconds.split('.').next().unwrap_or_default();
            whole.parse::<u8>().map_err(|_| invalid())?;
        }
        if parts.next().is_some() || hour.len() > 2 || minute.len() != 2 {
            return Err(invalid());
        }
        let hour = hour.parse::<u8>().map_err(|_| invalid())?;
        let minute = minute.parse::<u8>().map_err(|_| invalid())?;
        SlotTime::new(hour, minute)
    }
}

impl TryFrom<String> for SlotTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotTime> for String {
    fn from(value: SlotTime) -> Self {
        value.to_string()
    }
}

/// A bookable unit of time on a given date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    /// Start time of the slot
    pub time: SlotTime,

    /// Whether the slot could be booked when the list was produced
    pub available: bool,
}

impl TimeSlot {
    /// Creates a slot.
    pub fn new(time: SlotTime, available: bool) -> Self {
        Self { time, available }
    }
}

/// Where a slot list came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotSource {
    /// Answered by the appointment service
    Live,
    /// Synthesized locally because the service could not be reached; the
    /// warning explains why
    Degraded { warning: String },
}

/// Body of `GET /appointments/availability/{date}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityResponse {
    /// Slots for the requested date
    #[serde(default)]
    pub available_slots: Vec<TimeSlot>,
}
