//! View-model for the current user's appointment list.

use jiff::civil::DateTime;
use log::{debug, info, warn};

use crate::{
    api::AppointmentService,
    error::{BookingError, Result},
    models::{Appointment, AppointmentStatus},
};

/// Message shown when a refresh fails without a server explanation.
pub const GENERIC_REFRESH_ERROR: &str = "Could not load your appointments";

/// Message shown when a cancellation fails without a server explanation.
pub const GENERIC_CANCEL_ERROR: &str = "Could not cancel the appointment";

/// The signed-in user's appointments, kept ordered by date then time.
///
/// A refresh replaces the whole list. A failed refresh keeps the previous
/// items and records an error until the next attempt. Cancellation is two
/// steps: [`request_cancel`](Self::request_cancel) marks an appointment, and
/// [`confirm_cancel`](Self::confirm_cancel) sends it.
#[derive(Debug, Clone, Default)]
pub struct AppointmentList {
    items: Vec<Appointment>,
    loading: bool,
    loaded: bool,
    error: Option<String>,
    pending_cancel: Option<u64>,
}

impl AppointmentList {
    /// Creates an empty, never-loaded list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appointments in date and time order.
    pub fn items(&self) -> &[Appointment] {
        &self.items
    }

    /// Looks an appointment up by id.
    pub fn get(&self, id: u64) -> Option<&Appointment> {
        self.items.iter().find(|appointment| appointment.id == id)
    }

    /// Appointments that have not started at `now`.
    pub fn upcoming(&self, now: DateTime) -> impl Iterator<Item = &Appointment> {
        self.items
            .iter()
            .filter(move |appointment| appointment.status(now) == AppointmentStatus::Upcoming)
    }

    /// Whether a refresh is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether at least one refresh has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Error from the last refresh or cancellation, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Appointment awaiting cancel confirmation.
    pub fn pending_cancel(&self) -> Option<u64> {
        self.pending_cancel
    }

    /// Marks the list as loading.
    pub fn begin_refresh(&mut self) {
        self.loading = true;
    }

    /// Applies a refresh result.
    pub fn apply_refresh(&mut self, outcome: Result<Vec<Appointment>>) -> Result<()> {
        self.loading = false;

        match outcome {
            Ok(mut items) => {
                items.sort_by_key(|appointment| (appointment.date, appointment.time));
                debug!("Loaded {} appointments", items.len());
                self.items = items;
                self.loaded = true;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                warn!("Refresh failed, keeping {} appointments: {e}", self.items.len());
                self.error = Some(e.user_message(GENERIC_REFRESH_ERROR));
                Err(e)
            }
        }
    }

    /// Reloads the list from the service.
    pub async fn refresh<S>(&mut self, service: &S) -> Result<()>
    where
        S: AppointmentService + ?Sized,
    {
        self.begin_refresh();
        let outcome = service.my_appointments().await;
        self.apply_refresh(outcome)
    }

    /// Marks an appointment for cancellation.
    ///
    /// Ids missing from the list are accepted, since the server decides
    /// whether they still exist. Appointments that already started cannot be
    /// cancelled.
    pub fn request_cancel(&mut self, id: u64, now: DateTime) -> Result<()> {
        if let Some(appointment) = self.get(id) {
            if appointment.status(now) == AppointmentStatus::Past {
                return Err(BookingError::validation("appointment")
                    .with_reason(format!("appointment {id} has already taken place")));
            }
        }

        self.pending_cancel = Some(id);
        Ok(())
    }

    /// Drops the pending cancellation.
    pub fn dismiss_cancel(&mut self) {
        self.pending_cancel = None;
    }

    /// Cancels the pending appointment, removes it and refreshes the list.
    ///
    /// A failed follow-up refresh is recorded in [`error`](Self::error) but
    /// does not fail the cancellation.
    pub async fn confirm_cancel<S>(&mut self, service: &S) -> Result<u64>
    where
        S: AppointmentService + ?Sized,
    {
        let id = self.pending_cancel.take().ok_or_else(|| {
            BookingError::validation("appointment").with_reason("no cancellation pending")
        })?;

        if let Err(e) = service.cancel_appointment(id).await {
            warn!("Cancelling appointment {id} failed: {e}");
            self.error = Some(e.user_message(GENERIC_CANCEL_ERROR));
            return Err(e);
        }

        self.items.retain(|appointment| appointment.id != id);
        info!("Appointment {id} cancelled");

        if let Err(e) = self.refresh(service).await {
            debug!("Refresh after cancel failed: {e}");
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use jiff::civil::{date, Date};

    use super::*;
    use crate::models::{NewAppointment, SlotTime, TimeSlot};

    fn appointment(id: u64, day: Date, hour: u8) -> Appointment {
        Appointment {
            id,
            user_id: 1,
            date: day,
            time: SlotTime::new(hour, 0).expect("valid time"),
            service_type: "Afeitado".to_string(),
            notes: None,
            created_at: None,
        }
    }

    /// Service double backed by an in-memory list.
    #[derive(Default)]
    struct InMemoryService {
        stored: Mutex<Vec<Appointment>>,
        offline: Mutex<bool>,
        cancel_calls: Mutex<u32>,
    }

    impl InMemoryService {
        fn with(items: Vec<Appointment>) -> Self {
            Self {
                stored: Mutex::new(items),
                ..Self::default()
            }
        }

        fn go_offline(&self) {
            *self.offline.lock().expect("lock") = true;
        }
    }

    #[async_trait]
    impl AppointmentService for InMemoryService {
        async fn availability(&self, _date: Date) -> Result<Vec<TimeSlot>> {
            Ok(Vec::new())
        }

        async fn create_appointment(&self, _appointment: &NewAppointment) -> Result<Appointment> {
            Err(BookingError::server(405, None))
        }

        async fn my_appointments(&self) -> Result<Vec<Appointment>> {
            if *self.offline.lock().expect("lock") {
                return Err(BookingError::network("connection refused"));
            }
            Ok(self.stored.lock().expect("lock").clone())
        }

        async fn cancel_appointment(&self, id: u64) -> Result<()> {
            *self.cancel_calls.lock().expect("lock") += 1;
            // Unknown ids succeed, like the HTTP client's 404 handling.
            self.stored.lock().expect("lock").retain(|a| a.id != id);
            Ok(())
        }
    }

    fn noon(day: Date) -> DateTime {
        day.at(12, 0, 0, 0)
    }

    #[tokio::test]
    async fn test_refresh_sorts_by_date_then_time() {
        let service = InMemoryService::with(vec![
            appointment(3, date(2025, 9, 26), 9),
            appointment(1, date(2025, 9, 25), 16),
            appointment(2, date(2025, 9, 25), 10),
        ]);
        let mut list = AppointmentList::new();

        list.refresh(&service).await.expect("refresh");

        let ids: Vec<_> = list.items().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert!(list.is_loaded());
        assert!(!list.is_loading());
    }

    #[tokio::test]
    async fn test_upcoming_skips_started_appointments() {
        let service = InMemoryService::with(vec![
            appointment(1, date(2025, 9, 25), 10),
            appointment(2, date(2025, 9, 25), 16),
            appointment(3, date(2025, 9, 26), 9),
        ]);
        let mut list = AppointmentList::new();
        list.refresh(&service).await.expect("refresh");

        let ids: Vec<_> = list.upcoming(noon(date(2025, 9, 25))).map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(list.upcoming(noon(date(2025, 9, 27))).count(), 0);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_items() {
        let service = InMemoryService::with(vec![appointment(1, date(2025, 9, 25), 10)]);
        let mut list = AppointmentList::new();
        list.refresh(&service).await.expect("first refresh");

        service.go_offline();
        assert!(list.refresh(&service).await.is_err());

        assert_eq!(list.items().len(), 1);
        assert_eq!(list.error(), Some(GENERIC_REFRESH_ERROR));
        assert!(!list.is_loading());
    }

    #[tokio::test]
    async fn test_confirm_cancel_removes_item() {
        let service = InMemoryService::with(vec![
            appointment(1, date(2025, 9, 25), 10),
            appointment(2, date(2025, 9, 26), 11),
        ]);
        let mut list = AppointmentList::new();
        list.refresh(&service).await.expect("refresh");

        list.request_cancel(1, noon(date(2025, 9, 20)))
            .expect("request");
        assert_eq!(list.pending_cancel(), Some(1));
        assert_eq!(list.confirm_cancel(&service).await.expect("cancel"), 1);

        assert!(list.get(1).is_none());
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.pending_cancel(), None);
    }

    #[tokio::test]
    async fn test_cancelling_twice_is_not_an_error() {
        let service = InMemoryService::with(vec![appointment(1, date(2025, 9, 25), 10)]);
        let mut list = AppointmentList::new();
        list.refresh(&service).await.expect("refresh");
        let now = noon(date(2025, 9, 20));

        list.request_cancel(1, now).expect("first request");
        list.confirm_cancel(&service).await.expect("first cancel");
        list.request_cancel(1, now).expect("second request");
        list.confirm_cancel(&service).await.expect("second cancel");

        assert!(list.error().is_none());
        assert_eq!(*service.cancel_calls.lock().expect("lock"), 2);
    }

    #[tokio::test]
    async fn test_cancel_survives_failed_follow_up_refresh() {
        let service = InMemoryService::with(vec![appointment(1, date(2025, 9, 25), 10)]);
        let mut list = AppointmentList::new();
        list.refresh(&service).await.expect("refresh");

        service.go_offline();
        list.request_cancel(1, noon(date(2025, 9, 20))).expect("request");
        list.confirm_cancel(&service).await.expect("cancel still succeeds");

        assert!(list.items().is_empty());
        assert_eq!(list.error(), Some(GENERIC_REFRESH_ERROR));
    }

    #[tokio::test]
    async fn test_past_appointments_cannot_be_cancelled() {
        let service = InMemoryService::with(vec![appointment(1, date(2025, 9, 25), 10)]);
        let mut list = AppointmentList::new();
        list.refresh(&service).await.expect("refresh");

        let err = list
            .request_cancel(1, noon(date(2025, 9, 25)))
            .expect_err("already started");
        assert!(matches!(err, BookingError::Validation { .. }));
        assert_eq!(list.pending_cancel(), None);
    }

    #[test]
    fn test_dismiss_and_confirm_without_pending() {
        let mut list = AppointmentList::new();
        list.request_cancel(9, noon(date(2025, 9, 20))).expect("request");
        list.dismiss_cancel();
        assert_eq!(list.pending_cancel(), None);
    }

    #[tokio::test]
    async fn test_confirm_without_pending_is_rejected() {
        let service = InMemoryService::default();
        let mut list = AppointmentList::new();

        assert!(list.confirm_cancel(&service).await.is_err());
        assert_eq!(*service.cancel_calls.lock().expect("lock"), 0);
    }
}
