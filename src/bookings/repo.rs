use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::bookings::dto::{Booking, BookingRequest, BookingWithPlace};
use crate::error::ApiResult;
use crate::places::repo::Place;

pub async fn create(db: &PgPool, user_id: Uuid, req: &BookingRequest) -> ApiResult<Booking> {
    let booking = sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO bookings
            (place_id, user_id, check_in, check_out, number_of_guests, name, phone, price)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, place_id, user_id, check_in, check_out,
                  number_of_guests, name, phone, price, created_at
        "#,
    )
    .bind(req.place)
    .bind(user_id)
    .bind(req.check_in)
    .bind(req.check_out)
    .bind(req.number_of_guests)
    .bind(&req.name)
    .bind(&req.phone)
    .bind(req.price)
    .fetch_one(db)
    .await?;
    Ok(booking)
}

/// Flat row for the booking/place join; split back apart in `list_for_user`.
#[derive(Debug, FromRow)]
struct BookingPlaceRow {
    id: Uuid,
    place_id: Uuid,
    user_id: Uuid,
    check_in: Date,
    check_out: Date,
    number_of_guests: i32,
    name: String,
    phone: String,
    price: f64,
    created_at: OffsetDateTime,
    p_owner_id: Uuid,
    p_title: String,
    p_address: String,
    p_photos: Vec<String>,
    p_description: String,
    p_perks: Vec<String>,
    p_extra_info: String,
    p_check_in: String,
    p_check_out: String,
    p_max_guests: i32,
    p_price: f64,
    p_created_at: OffsetDateTime,
}

/// Caller's bookings in insertion order, each with its place resolved.
pub async fn list_for_user(db: &PgPool, user_id: Uuid) -> ApiResult<Vec<BookingWithPlace>> {
    let rows = sqlx::query_as::<_, BookingPlaceRow>(
        r#"
        SELECT b.id, b.place_id, b.user_id, b.check_in, b.check_out,
               b.number_of_guests, b.name, b.phone, b.price, b.created_at,
               p.owner_id   AS p_owner_id,
               p.title      AS p_title,
               p.address    AS p_address,
               p.photos     AS p_photos,
               p.description AS p_description,
               p.perks      AS p_perks,
               p.extra_info AS p_extra_info,
               p.check_in   AS p_check_in,
               p.check_out  AS p_check_out,
               p.max_guests AS p_max_guests,
               p.price      AS p_price,
               p.created_at AS p_created_at
        FROM bookings b
        JOIN places p ON p.id = b.place_id
        WHERE b.user_id = $1
        ORDER BY b.created_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(BookingWithPlace::from).collect())
}

impl From<BookingPlaceRow> for BookingWithPlace {
    fn from(r: BookingPlaceRow) -> Self {
        Self {
            place: Place {
                id: r.place_id,
                owner_id: r.p_owner_id,
                title: r.p_title,
                address: r.p_address,
                photos: r.p_photos,
                description: r.p_description,
                perks: r.p_perks,
                extra_info: r.p_extra_info,
                check_in: r.p_check_in,
                check_out: r.p_check_out,
                max_guests: r.p_max_guests,
                price: r.p_price,
                created_at: r.p_created_at,
            },
            booking: Booking {
                id: r.id,
                place_id: r.place_id,
                user_id: r.user_id,
                check_in: r.check_in,
                check_out: r.check_out,
                number_of_guests: r.number_of_guests,
                name: r.name,
                phone: r.phone,
                price: r.price,
                created_at: r.created_at,
            },
        }
    }
}
