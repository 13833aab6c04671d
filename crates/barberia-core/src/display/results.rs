//! Display for workflow results and admin views.

use std::fmt;

use super::datetime::MonthHeading;
use crate::{
    admin::{CalendarMonth, Stats},
    booking::Confirmation,
};

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Appointment confirmed")?;
        writeln!(f)?;
        writeln!(f, "{}", self.message)?;
        writeln!(f)?;
        write!(f, "{}", self.appointment)
    }
}

/// Sunday-first weekday headings.
const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", MonthHeading(&self.month))?;
        writeln!(f)?;
        writeln!(f, "|{}|", WEEKDAYS.join("|"))?;
        writeln!(f, "|{}|", ["---"; 7].join("|"))?;

        for week in self.weeks() {
            let cells: Vec<String> = week
                .iter()
                .map(|cell| {
                    let day = cell.date.day();
                    let mut text = if cell.in_month {
                        day.to_string()
                    } else {
                        format!("*{day}*")
                    };
                    if cell.appointments > 0 {
                        text.push_str(&format!(" ({})", cell.appointments));
                    }
                    if cell.selected {
                        text = format!("**[{text}]**");
                    } else if cell.today {
                        text = format!("**{text}**");
                    }
                    text
                })
                .collect();
            writeln!(f, "|{}|", cells.join("|"))?;
        }

        writeln!(f)?;
        writeln!(f, "{} appointments this month.", self.total())
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Statistics")?;
        writeln!(f)?;
        writeln!(f, "- **Appointments**: {}", self.total_appointments)?;
        writeln!(f, "- **Today**: {}", self.today_appointments)?;
        writeln!(f, "- **Users**: {}", self.total_users)?;

        writeln!(f, "\n## By service")?;
        writeln!(f)?;
        if self.by_service.is_empty() {
            writeln!(f, "No appointments yet.")?;
        }
        for share in &self.by_service {
            writeln!(f, "- {}: {} ({}%)", share.label, share.count, share.percent())?;
        }

        writeln!(f, "\n## By hour")?;
        writeln!(f)?;
        if self.by_hour.is_empty() {
            writeln!(f, "No appointments yet.")?;
        }
        for share in &self.by_hour {
            writeln!(f, "- {}: {} ({}%)", share.label, share.count, share.percent())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::{Appointment, SlotTime};

    #[test]
    fn test_confirmation_display() {
        let confirmation = Confirmation {
            appointment: Appointment {
                id: 41,
                user_id: 7,
                date: date(2025, 9, 25),
                time: SlotTime::new(10, 30).expect("valid time"),
                service_type: "Corte de pelo".to_string(),
                notes: None,
                created_at: None,
            },
            message: "Your appointment is booked for 25/09/2025 at 10:30.".to_string(),
        };

        let output = confirmation.to_string();
        assert!(output.starts_with("# Appointment confirmed"));
        assert!(output.contains("25/09/2025 at 10:30 (ID: 41)"));
    }

    #[test]
    fn test_calendar_display_marks_selection() {
        let grid = CalendarMonth::build(date(2025, 9, 1), &[], Some(date(2025, 9, 25)), date(2025, 9, 20));
        let output = grid.to_string();

        assert!(output.starts_with("# September 2025"));
        assert!(output.contains("|Sun|Mon|Tue|Wed|Thu|Fri|Sat|"));
        assert!(output.contains("**[25]**"));
        assert!(output.contains("**20**"));
        assert!(output.contains("*31*"));
        // Header, separator and six weeks.
        assert_eq!(output.lines().filter(|l| l.starts_with('|')).count(), 8);
    }

    #[test]
    fn test_empty_stats_display() {
        let stats = Stats::compute(&[], &[], date(2025, 9, 20));
        let output = stats.to_string();
        assert!(output.contains("- **Appointments**: 0"));
        assert!(output.contains("No appointments yet."));
    }
}
