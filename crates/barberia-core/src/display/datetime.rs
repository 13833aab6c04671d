//! Date and time display in the shop's day-first format.

use std::fmt;

use jiff::civil::{Date, DateTime};

/// Formats a civil date as `DD/MM/YYYY`.
///
/// ```rust
/// use barberia_core::display::DayMonthYear;
/// use jiff::civil::date;
///
/// assert_eq!(DayMonthYear(&date(2025, 9, 25)).to_string(), "25/09/2025");
/// ```
pub struct DayMonthYear<'a>(pub &'a Date);

impl fmt::Display for DayMonthYear<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%d/%m/%Y"))
    }
}

/// Formats a server-recorded civil datetime as `DD/MM/YYYY HH:MM`.
///
/// Stamps are already converted to local time when they are parsed.
pub struct LocalDateTime<'a>(pub &'a DateTime);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%d/%m/%Y %H:%M"))
    }
}

/// Long month heading such as `September 2025`.
pub struct MonthHeading<'a>(pub &'a Date);

impl fmt::Display for MonthHeading<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%B %Y"))
    }
}
