//! Month grid for the admin calendar.

use std::collections::HashMap;

use jiff::{civil::Date, ToSpan};

use crate::models::Appointment;

/// Cells in a month grid: six weeks of seven days.
pub const GRID_CELLS: usize = 42;

/// One day cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    /// The day this cell stands for
    pub date: Date,
    /// Whether the day belongs to the displayed month
    pub in_month: bool,
    /// Appointments booked on the day; always 0 outside the month
    pub appointments: usize,
    /// Whether the day is the selected one
    pub selected: bool,
    /// Whether the day is today
    pub today: bool,
}

/// A month laid out as weeks starting on Sunday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    /// First day of the displayed month
    pub month: Date,
    /// Exactly [`GRID_CELLS`] cells, row by row
    pub cells: Vec<CalendarDay>,
}

impl CalendarMonth {
    /// Builds the grid for the month containing `month`.
    ///
    /// Leading cells are the tail of the previous month, trailing cells the
    /// start of the next one.
    ///
    /// ```rust
    /// use barberia_core::admin::CalendarMonth;
    /// use jiff::civil::date;
    ///
    /// // September 2025 starts on a Monday.
    /// let grid = CalendarMonth::build(date(2025, 9, 14), &[], None, date(2025, 9, 20));
    /// assert_eq!(grid.cells.len(), 42);
    /// assert_eq!(grid.cells[0].date, date(2025, 8, 31));
    /// assert_eq!(grid.cells[1].date, date(2025, 9, 1));
    /// ```
    pub fn build(
        month: Date,
        appointments: &[Appointment],
        selected: Option<Date>,
        today: Date,
    ) -> Self {
        let first = month.first_of_month();
        let lead = i64::from(first.weekday().to_sunday_zero_offset());
        let start = first.saturating_sub(lead.days());

        let mut counts: HashMap<Date, usize> = HashMap::new();
        for appointment in appointments {
            if same_month(appointment.date, first) {
                *counts.entry(appointment.date).or_default() += 1;
            }
        }

        let cells = start
            .series(1.day())
            .take(GRID_CELLS)
            .map(|date| {
                let in_month = same_month(date, first);
                CalendarDay {
                    date,
                    in_month,
                    appointments: if in_month {
                        counts.get(&date).copied().unwrap_or(0)
                    } else {
                        0
                    },
                    selected: selected == Some(date),
                    today: date == today,
                }
            })
            .collect();

        Self {
            month: first,
            cells,
        }
    }

    /// Cells grouped in rows of seven.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
        self.cells.chunks(7)
    }

    /// Appointments booked in the displayed month.
    pub fn total(&self) -> usize {
        self.cells.iter().map(|cell| cell.appointments).sum()
    }
}

fn same_month(date: Date, first: Date) -> bool {
    date.year() == first.year() && date.month() == first.month()
}
