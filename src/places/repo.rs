use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::ownership::Owned;
use crate::places::dto::PlaceFields;

/// Rentable listing. `owner_id` is set on insert and never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Place {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub address: String,
    pub photos: Vec<String>,
    pub description: String,
    pub perks: Vec<String>,
    pub extra_info: String,
    pub check_in: String,
    pub check_out: String,
    pub max_guests: i32,
    pub price: f64,
    pub created_at: OffsetDateTime,
}

impl Owned for Place {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}

const PLACE_COLUMNS: &str = "id, owner_id, title, address, photos, description, perks, \
                             extra_info, check_in, check_out, max_guests, price, created_at";

pub async fn create(db: &PgPool, owner_id: Uuid, f: &PlaceFields) -> ApiResult<Place> {
    let place = sqlx::query_as::<_, Place>(&format!(
        r#"
        INSERT INTO places
            (owner_id, title, address, photos, description, perks,
             extra_info, check_in, check_out, max_guests, price)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {PLACE_COLUMNS}
        "#
    ))
    .bind(owner_id)
    .bind(&f.title)
    .bind(&f.address)
    .bind(&f.photos)
    .bind(&f.description)
    .bind(&f.perks)
    .bind(&f.extra_info)
    .bind(&f.check_in)
    .bind(&f.check_out)
    .bind(f.max_guests)
    .bind(f.price)
    .fetch_one(db)
    .await?;
    Ok(place)
}

pub async fn get(db: &PgPool, id: Uuid) -> ApiResult<Option<Place>> {
    let place = sqlx::query_as::<_, Place>(&format!(
        "SELECT {PLACE_COLUMNS} FROM places WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(place)
}

pub async fn list_all(db: &PgPool) -> ApiResult<Vec<Place>> {
    let places = sqlx::query_as::<_, Place>(&format!(
        "SELECT {PLACE_COLUMNS} FROM places ORDER BY created_at DESC"
    ))
    .fetch_all(db)
    .await?;
    Ok(places)
}

pub async fn list_by_owner(db: &PgPool, owner_id: Uuid) -> ApiResult<Vec<Place>> {
    let places = sqlx::query_as::<_, Place>(&format!(
        "SELECT {PLACE_COLUMNS} FROM places WHERE owner_id = $1 ORDER BY created_at DESC"
    ))
    .bind(owner_id)
    .fetch_all(db)
    .await?;
    Ok(places)
}

/// Writes every mutable field in one statement. Last write wins; concurrent
/// updates against the same listing are not serialized here.
pub async fn update(db: &PgPool, id: Uuid, f: &PlaceFields) -> ApiResult<Place> {
    let place = sqlx::query_as::<_, Place>(&format!(
        r#"
        UPDATE places
        SET title = $2, address = $3, photos = $4, description = $5, perks = $6,
            extra_info = $7, check_in = $8, check_out = $9, max_guests = $10, price = $11
        WHERE id = $1
        RETURNING {PLACE_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&f.title)
    .bind(&f.address)
    .bind(&f.photos)
    .bind(&f.description)
    .bind(&f.perks)
    .bind(&f.extra_info)
    .bind(&f.check_in)
    .bind(&f.check_out)
    .bind(f.max_guests)
    .bind(f.price)
    .fetch_one(db)
    .await?;
    Ok(place)
}
