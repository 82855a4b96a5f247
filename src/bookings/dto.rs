use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::places::repo::Place;

time::serde::format_description!(pub(crate) booking_date, Date, "[year]-[month]-[day]");

/// Request body for booking creation. Any `user` field a client sends is
/// ignored; the booking is bound to the authenticated principal.
#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub place: Uuid,
    #[serde(with = "booking_date")]
    pub check_in: Date,
    #[serde(with = "booking_date")]
    pub check_out: Date,
    pub number_of_guests: i32,
    pub name: String,
    pub phone: String,
    pub price: f64,
}

/// Stored reservation. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub place_id: Uuid,
    pub user_id: Uuid,
    #[serde(with = "booking_date")]
    pub check_in: Date,
    #[serde(with = "booking_date")]
    pub check_out: Date,
    pub number_of_guests: i32,
    pub name: String,
    pub phone: String,
    pub price: f64,
    pub created_at: OffsetDateTime,
}

/// Booking with its referenced listing resolved inline, as returned by the
/// list endpoint.
#[derive(Debug, Serialize)]
pub struct BookingWithPlace {
    #[serde(flatten)]
    pub booking: Booking,
    pub place: Place,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    #[test]
    fn booking_request_parses_iso_dates() {
        let req: BookingRequest = serde_json::from_str(
            r#"{
                "place": "7f1f9df2-91a4-4a37-8ff6-0f7a118f2d0b",
                "check_in": "2024-01-01",
                "check_out": "2024-01-03",
                "number_of_guests": 2,
                "name": "Bob",
                "phone": "555-0100",
                "price": 100.0
            }"#,
        )
        .expect("parse");
        assert_eq!(req.check_in.year(), 2024);
        assert_eq!(req.check_in.month(), Month::January);
        assert_eq!(req.check_in.day(), 1);
        assert_eq!(req.check_out.day(), 3);
    }

    #[test]
    fn client_supplied_user_field_is_ignored() {
        let req: BookingRequest = serde_json::from_str(
            r#"{
                "place": "7f1f9df2-91a4-4a37-8ff6-0f7a118f2d0b",
                "user": "00000000-0000-0000-0000-000000000001",
                "check_in": "2024-01-01",
                "check_out": "2024-01-03",
                "number_of_guests": 2,
                "name": "Bob",
                "phone": "555-0100",
                "price": 100.0
            }"#,
        )
        .expect("unknown fields are dropped");
        assert_eq!(req.name, "Bob");
    }

    #[test]
    fn booking_serializes_dates_as_iso() {
        let booking = Booking {
            id: Uuid::new_v4(),
            place_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            check_in: Date::from_calendar_date(2024, Month::January, 1).unwrap(),
            check_out: Date::from_calendar_date(2024, Month::January, 3).unwrap(),
            number_of_guests: 2,
            name: "Bob".into(),
            phone: "555-0100".into(),
            price: 100.0,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&booking).unwrap();
        assert!(json.contains("\"2024-01-01\""));
        assert!(json.contains("\"2024-01-03\""));
    }
}
