//! Command-line argument wrappers using clap
//!
//! Each wrapper owns the clap attributes for one command and converts into
//! the matching framework-free structure in `barberia_core::params`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Handlers
//! ```
//!
//! Dates are accepted as `YYYY-MM-DD` or `DD/MM/YYYY`, months as `YYYY-MM`.

use barberia_core::{models::SlotTime, params::*};
use clap::{Args, Subcommand};
use jiff::civil::Date;

/// Parses a date given as `YYYY-MM-DD` or `DD/MM/YYYY`.
pub fn parse_date(raw: &str) -> Result<Date, String> {
    let raw = raw.trim();
    raw.parse::<Date>()
        .or_else(|_| Date::strptime("%d/%m/%Y", raw))
        .map_err(|_| format!("'{raw}' is not a date (use YYYY-MM-DD or DD/MM/YYYY)"))
}

/// Parses a month given as `YYYY-MM` into its first day.
pub fn parse_month(raw: &str) -> Result<Date, String> {
    let raw = raw.trim();
    format!("{raw}-01")
        .parse::<Date>()
        .map_err(|_| format!("'{raw}' is not a month (use YYYY-MM)"))
}

/// Log in to the appointment API
///
/// The password is read from `--password`, `BARBERIA_PASSWORD`, or prompted
/// for on standard input.
#[derive(Args)]
pub struct LoginArgs {
    /// Username or email address
    pub username: String,
    #[arg(
        long,
        env = "BARBERIA_PASSWORD",
        hide_env_values = true,
        help = "Password; prompted for when omitted"
    )]
    pub password: Option<String>,
}

impl LoginArgs {
    /// Converts into core parameters once the password is known.
    pub fn into_params(self, password: String) -> Login {
        Login {
            username: self.username,
            password,
        }
    }
}

/// Create an account
#[derive(Args)]
pub struct SignupArgs {
    /// Username to register
    pub username: String,
    /// Email address
    pub email: String,
    #[arg(
        long,
        env = "BARBERIA_PASSWORD",
        hide_env_values = true,
        help = "Password; prompted for when omitted"
    )]
    pub password: Option<String>,
}

impl SignupArgs {
    /// Converts into core parameters once the password is known.
    pub fn into_params(self, password: String) -> Signup {
        Signup {
            username: self.username,
            email: self.email,
            password,
        }
    }
}

/// Show free slots on a date
#[derive(Args)]
pub struct SlotsArgs {
    /// Day to look up
    #[arg(value_parser = parse_date, help = "Day to look up (YYYY-MM-DD or DD/MM/YYYY)")]
    pub date: Date,
}

impl From<SlotsArgs> for Availability {
    fn from(val: SlotsArgs) -> Self {
        Availability { date: val.date }
    }
}

/// Book an appointment
///
/// Without `--time` the command stops after showing the free slots for the
/// date, so you can pick one and run it again.
#[derive(Args)]
pub struct BookArgs {
    /// Service id, as listed by `barberia services`
    #[arg(short, long)]
    pub service: String,
    #[arg(
        short,
        long,
        value_parser = parse_date,
        help = "Day of the appointment (YYYY-MM-DD or DD/MM/YYYY)"
    )]
    pub date: Date,
    #[arg(short, long, help = "Start time as HH:MM, on the half hour between 09:00 and 17:30")]
    pub time: Option<SlotTime>,
    #[arg(short, long, help = "Optional notes for the barber")]
    pub notes: Option<String>,
}

impl From<BookArgs> for BookAppointment {
    fn from(val: BookArgs) -> Self {
        BookAppointment {
            service_id: val.service,
            date: val.date,
            time: val.time,
            notes: val.notes,
        }
    }
}

/// Cancel one of your appointments
#[derive(Args)]
pub struct CancelArgs {
    #[arg(help = "Id of the appointment, as listed by `barberia appointments`")]
    pub id: u64,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl From<&CancelArgs> for Id {
    fn from(val: &CancelArgs) -> Self {
        Id { id: val.id }
    }
}

/// List appointments across all users
///
/// Shows today's appointments unless `--date` or `--all` says otherwise.
#[derive(Args)]
pub struct AdminAppointmentsArgs {
    #[arg(
        short,
        long,
        value_parser = parse_date,
        conflicts_with = "all",
        help = "Only appointments on this day (YYYY-MM-DD or DD/MM/YYYY)"
    )]
    pub date: Option<Date>,
    /// Every appointment regardless of date
    #[arg(long)]
    pub all: bool,
}

impl AdminAppointmentsArgs {
    /// Resolves the default day against `today`.
    pub fn into_params(self, today: Date) -> ListAppointments {
        let date = match (self.all, self.date) {
            (true, _) => None,
            (false, Some(date)) => Some(date),
            (false, None) => Some(today),
        };
        ListAppointments { date }
    }
}

/// Browse registered users
#[derive(Args)]
pub struct AdminUsersArgs {
    #[arg(short, long, help = "Only users whose name or email contains this text")]
    pub search: Option<String>,
}

impl From<AdminUsersArgs> for SearchUsers {
    fn from(val: AdminUsersArgs) -> Self {
        SearchUsers { query: val.search }
    }
}

/// Month calendar with appointment counts
#[derive(Args)]
pub struct AdminCalendarArgs {
    #[arg(short, long, value_parser = parse_month, help = "Month to show (YYYY-MM)")]
    pub month: Option<Date>,
    #[arg(
        short,
        long,
        value_parser = parse_date,
        help = "Day whose appointments are listed under the grid"
    )]
    pub day: Option<Date>,
}

impl From<AdminCalendarArgs> for ShowCalendar {
    fn from(val: AdminCalendarArgs) -> Self {
        ShowCalendar {
            month: val.month,
            day: val.day,
        }
    }
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// List appointments across all users
    #[command(aliases = ["a", "ls"])]
    Appointments(AdminAppointmentsArgs),
    /// Browse registered users
    #[command(alias = "u")]
    Users(AdminUsersArgs),
    /// Month calendar with appointment counts
    #[command(alias = "c")]
    Calendar(AdminCalendarArgs),
    /// Totals and breakdowns by service and hour
    Stats,
}
