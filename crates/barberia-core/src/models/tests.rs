//! Tests for wire models.

use jiff::civil::date;
use serde_json::json;

use super::*;

#[test]
fn test_slot_time_parsing() {
    assert_eq!("09:30".parse::<SlotTime>(), SlotTime::new(9, 30));
    assert_eq!("9:30".parse::<SlotTime>(), SlotTime::new(9, 30));
    assert_eq!("10:30:00".parse::<SlotTime>(), SlotTime::new(10, 30));

    assert!("24:00".parse::<SlotTime>().is_err());
    assert!("10:3".parse::<SlotTime>().is_err());
    assert!("10:30:xx".parse::<SlotTime>().is_err());
    assert!("10".parse::<SlotTime>().is_err());
    assert!("".parse::<SlotTime>().is_err());
}

#[test]
fn test_slot_time_bookable_window() {
    assert!(SlotTime::new(9, 0).expect("valid").is_bookable());
    assert!(SlotTime::new(17, 30).expect("valid").is_bookable());
    assert!(!SlotTime::new(18, 0).expect("valid").is_bookable());
    assert!(!SlotTime::new(8, 30).expect("valid").is_bookable());
    assert!(!SlotTime::new(10, 15).expect("valid").is_bookable());
}

#[test]
fn test_appointment_accepts_server_shapes() {
    let body = json!({
        "id": 4,
        "user_id": 2,
        "date": "2025-09-25",
        "time": "10:30:00",
        "service_type": "Corte de pelo",
        "notes": null,
        "created_at": "2025-09-20T08:15:00.123456"
    });

    let appointment: Appointment = serde_json::from_value(body).expect("deserialize");
    assert_eq!(appointment.date, date(2025, 9, 25));
    assert_eq!(appointment.time.to_string(), "10:30");
    assert_eq!(appointment.notes(), None);
    assert_eq!(
        appointment.created_at.map(|c| c.date()),
        Some(date(2025, 9, 20))
    );
}

#[test]
fn test_unparseable_created_at_is_dropped() {
    let body = json!({
        "id": 1,
        "user_id": 1,
        "date": "2025-09-25",
        "time": "10:30",
        "service_type": "Afeitado",
        "created_at": "yesterday"
    });

    let appointment: Appointment = serde_json::from_value(body).expect("deserialize");
    assert_eq!(appointment.created_at, None);
    assert_eq!(appointment.notes, None);
}

#[test]
fn test_new_appointment_sends_null_notes() {
    let request = NewAppointment {
        date: date(2025, 9, 25),
        time: SlotTime::new(10, 30).expect("valid"),
        service_type: "Corte de pelo".to_string(),
        notes: None,
    };

    assert_eq!(
        serde_json::to_value(&request).expect("serialize"),
        json!({
            "date": "2025-09-25",
            "time": "10:30",
            "service_type": "Corte de pelo",
            "notes": null
        })
    );
}

#[test]
fn test_availability_response() {
    let body = json!({
        "date": "2025-09-25",
        "available_slots": [
            {"time": "09:00", "available": true},
            {"time": "09:30", "available": false}
        ]
    });

    let response: AvailabilityResponse = serde_json::from_value(body).expect("deserialize");
    assert_eq!(response.available_slots.len(), 2);
    assert!(!response.available_slots[1].available);

    let empty: AvailabilityResponse = serde_json::from_value(json!({})).expect("deserialize");
    assert!(empty.available_slots.is_empty());
}

#[test]
fn test_appointment_status_relative_to_now() {
    let appointment: Appointment = serde_json::from_value(json!({
        "id": 1,
        "user_id": 1,
        "date": "2025-09-25",
        "time": "10:30",
        "service_type": "Tinte"
    }))
    .expect("deserialize");

    assert_eq!(
        appointment.status(date(2025, 9, 25).at(10, 29, 0, 0)),
        AppointmentStatus::Upcoming
    );
    assert_eq!(
        appointment.status(date(2025, 9, 25).at(10, 31, 0, 0)),
        AppointmentStatus::Past
    );
    assert_eq!(AppointmentStatus::Past.to_string(), "past");
}

#[test]
fn test_catalog_lookup() {
    let catalog = Catalog::default();

    assert_eq!(catalog.services().len(), 5);
    assert_eq!(catalog.find("haircut_shave").map(|s| s.name), Some("Corte y afeitado"));
    assert!(catalog.find("Corte de pelo").is_none());
}

#[test]
fn test_user_with_timezone_stamp() {
    let user: User = serde_json::from_value(json!({
        "id": 3,
        "username": "lucia",
        "email": "lucia@example.com",
        "created_at": "2025-09-20T08:15:00Z"
    }))
    .expect("deserialize");

    assert!(user.created_at.is_some());
}
