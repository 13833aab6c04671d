//! Admin surface: every appointment and every user, browsed by list,
//! calendar and statistics.
//!
//! [`AdminSession`] owns what the admin is looking at (the calendar month
//! and the selected day) and the last data loaded from the
//! [`AdminService`]. Views are computed from that cache on demand.

mod calendar;
mod stats;


use std::collections::HashMap;

use jiff::{civil::Date, ToSpan, Zoned};
use log::{debug, warn};

pub use calendar::{CalendarDay, CalendarMonth, GRID_CELLS};
pub use stats::{Share, Stats};

use crate::{
    api::AdminService,
    error::Result,
    models::{Appointment, User},
    params::{ListAppointments, SearchUsers, ShowCalendar},
};

/// An appointment together with the user who booked it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListingEntry<'a> {
    pub appointment: &'a Appointment,
    /// `None` when the owner is not among the loaded users
    pub user: Option<&'a User>,
}

impl ListingEntry<'_> {
    /// Username of the owner, or `User #<id>` when unknown.
    pub fn client_name(&self) -> String {
        match self.user {
            Some(user) => user.username.clone(),
            None => format!("User #{}", self.appointment.user_id),
        }
    }
}

/// A user with the number of appointments they hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectoryEntry<'a> {
    pub user: &'a User,
    pub appointments: usize,
}

/// State of one admin session.
#[derive(Debug, Clone)]
pub struct AdminSession {
    today: Date,
    month: Date,
    selected: Option<Date>,
    appointments: Vec<Appointment>,
    users: Vec<User>,
    loaded: bool,
}

impl AdminSession {
    /// Starts on the month containing `today` with no day selected.
    pub fn new(today: Date) -> Self {
        Self {
            today,
            month: today.first_of_month(),
            selected: None,
            appointments: Vec::new(),
            users: Vec::new(),
            loaded: false,
        }
    }

    /// Starts on the current month in the system time zone.
    pub fn starting_today() -> Self {
        Self::new(Zoned::now().date())
    }

    /// First day of the displayed month.
    pub fn month(&self) -> Date {
        self.month
    }

    /// Selected day, if any.
    pub fn selected_date(&self) -> Option<Date> {
        self.selected
    }

    /// The date treated as today.
    pub fn today(&self) -> Date {
        self.today
    }

    /// Cached appointments.
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Cached users.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Whether data has been loaded at least once.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Fetches every appointment and user. On failure the previous cache is
    /// kept.
    pub async fn load<S>(&mut self, service: &S) -> Result<()>
    where
        S: AdminService + ?Sized,
    {
        let appointments = service.all_appointments().await.map_err(|e| {
            warn!("Loading appointments failed: {e}");
            e
        })?;
        let users = service.all_users().await.map_err(|e| {
            warn!("Loading users failed: {e}");
            e
        })?;

        self.replace(appointments, users);
        Ok(())
    }

    /// Replaces the cache.
    pub fn replace(&mut self, appointments: Vec<Appointment>, users: Vec<User>) {
        debug!(
            "Admin cache: {} appointments, {} users",
            appointments.len(),
            users.len()
        );
        self.appointments = appointments;
        self.users = users;
        self.loaded = true;
    }

    /// Shows the month containing `date`.
    pub fn show_month(&mut self, date: Date) {
        self.month = date.first_of_month();
    }

    /// Moves the calendar one month back.
    pub fn previous_month(&mut self) -> Date {
        self.month = self.month.saturating_sub(1.month());
        self.month
    }

    /// Moves the calendar one month forward.
    pub fn next_month(&mut self) -> Date {
        self.month = self.month.saturating_add(1.month());
        self.month
    }

    /// Selects a day and shows its month.
    pub fn select_day(&mut self, date: Date) {
        self.selected = Some(date);
        self.show_month(date);
    }

    /// Clears the day selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Applies calendar parameters: the day wins over the month when both
    /// are given.
    pub fn apply(&mut self, params: &ShowCalendar) {
        if let Some(month) = params.month {
            self.show_month(month);
        }
        if let Some(day) = params.day {
            self.select_day(day);
        }
    }

    /// Appointments joined with their owners, ordered by date then time.
    pub fn listing(&self, params: &ListAppointments) -> Vec<ListingEntry<'_>> {
        let users: HashMap<u64, &User> = self.users.iter().map(|user| (user.id, user)).collect();

        let mut entries: Vec<_> = self
            .appointments
            .iter()
            .filter(|appointment| params.date.map_or(true, |date| appointment.date == date))
            .map(|appointment| ListingEntry {
                appointment,
                user: users.get(&appointment.user_id).copied(),
            })
            .collect();
        entries.sort_by_key(|entry| (entry.appointment.date, entry.appointment.time));
        entries
    }

    /// Listing for the selected day; empty when no day is selected.
    pub fn selected_day_listing(&self) -> Vec<ListingEntry<'_>> {
        match self.selected {
            Some(date) => self.listing(&ListAppointments { date: Some(date) }),
            None => Vec::new(),
        }
    }

    /// Users with their appointment counts, filtered by a case-insensitive
    /// match on username or email. A blank query matches everyone.
    pub fn directory(&self, params: &SearchUsers) -> Vec<DirectoryEntry<'_>> {
        let mut counts: HashMap<u64, usize> = HashMap::new();
        for appointment in &self.appointments {
            *counts.entry(appointment.user_id).or_default() += 1;
        }

        let needle = params
            .query
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());

        self.users
            .iter()
            .filter(|user| match &needle {
                Some(needle) => {
                    user.username.to_lowercase().contains(needle.as_str())
                        || user.email.to_lowercase().contains(needle.as_str())
                }
                None => true,
            })
            .map(|user| DirectoryEntry {
                user,
                appointments: counts.get(&user.id).copied().unwrap_or(0),
            })
            .collect()
    }

    /// Month grid for the displayed month.
    pub fn calendar(&self) -> CalendarMonth {
        CalendarMonth::build(self.month, &self.appointments, self.selected, self.today)
    }

    /// Dashboard figures.
    pub fn stats(&self) -> Stats {
        Stats::compute(&self.appointments, &self.users, self.today)
    }
}
