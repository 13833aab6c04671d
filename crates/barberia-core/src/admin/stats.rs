//! Aggregates for the admin dashboard.

use std::collections::{BTreeMap, HashMap};

use jiff::civil::Date;

use crate::models::{Appointment, User};

/// One bar of a breakdown chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    /// What is counted (a service name, or an hour as `HH:00`)
    pub label: String,
    /// How many appointments fall under the label
    pub count: usize,
    /// `count` over all appointments, between 0 and 1
    pub fraction: f64,
}

impl Share {
    fn new(label: String, count: usize, total: usize) -> Self {
        let fraction = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        };
        Self {
            label,
            count,
            fraction,
        }
    }

    /// Fraction as a whole percentage.
    pub fn percent(&self) -> u32 {
        (self.fraction * 100.0).round() as u32
    }
}

/// Dashboard figures computed from the cached appointments and users.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    /// Every appointment on record
    pub total_appointments: usize,
    /// Appointments booked for today
    pub today_appointments: usize,
    /// Registered users
    pub total_users: usize,
    /// Appointments per service, most requested first
    pub by_service: Vec<Share>,
    /// Appointments per starting hour, earliest first
    pub by_hour: Vec<Share>,
}

impl Stats {
    /// Computes the dashboard figures.
    pub fn compute(appointments: &[Appointment], users: &[User], today: Date) -> Self {
        let total = appointments.len();

        let mut services: HashMap<&str, usize> = HashMap::new();
        let mut hours: BTreeMap<u8, usize> = BTreeMap::new();
        for appointment in appointments {
            *services.entry(appointment.service_type.as_str()).or_default() += 1;
            *hours.entry(appointment.time.hour()).or_default() += 1;
        }

        let mut by_service: Vec<Share> = services
            .into_iter()
            .map(|(service, count)| Share::new(service.to_string(), count, total))
            .collect();
        by_service.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));

        let by_hour = hours
            .into_iter()
            .map(|(hour, count)| Share::new(format!("{hour:02}:00"), count, total))
            .collect();

        Self {
            total_appointments: total,
            today_appointments: appointments.iter().filter(|a| a.date == today).count(),
            total_users: users.len(),
            by_service,
            by_hour,
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::SlotTime;

    fn booked(id: u64, service: &str, day: Date, hour: u8, minute: u8) -> Appointment {
        Appointment {
            id,
            user_id: 1,
            date: day,
            time: SlotTime::new(hour, minute).expect("valid time"),
            service_type: service.to_string(),
            notes: None,
            created_at: None,
        }
    }

    #[test]
    fn test_breakdowns_are_ordered() {
        let today = date(2025, 9, 20);
        let appointments = vec![
            booked(1, "Afeitado", today, 16, 0),
            booked(2, "Corte de pelo", today, 9, 30),
            booked(3, "Corte de pelo", date(2025, 9, 21), 9, 0),
            booked(4, "Tinte", date(2025, 9, 22), 12, 0),
        ];

        let stats = Stats::compute(&appointments, &[], today);

        assert_eq!(stats.total_appointments, 4);
        assert_eq!(stats.today_appointments, 2);
        assert_eq!(stats.total_users, 0);

        let services: Vec<_> = stats.by_service.iter().map(|s| (s.label.as_str(), s.count)).collect();
        assert_eq!(
            services,
            vec![("Corte de pelo", 2), ("Afeitado", 1), ("Tinte", 1)]
        );
        assert_eq!(stats.by_service[0].percent(), 50);

        let hours: Vec<_> = stats.by_hour.iter().map(|s| (s.label.as_str(), s.count)).collect();
        assert_eq!(hours, vec![("09:00", 2), ("12:00", 1), ("16:00", 1)]);
    }

    #[test]
    fn test_empty_stats() {
        let stats = Stats::compute(&[], &[], date(2025, 9, 20));

        assert_eq!(stats.total_appointments, 0);
        assert!(stats.by_service.is_empty());
        assert!(stats.by_hour.is_empty());
    }
}
