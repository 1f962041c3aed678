//! Hotel and room reads on the `hotels` and `rooms` tables.

use chrono::{DateTime, Utc};
use drivent_core::{Hotel, HotelId, HotelWithRooms, Room, RoomId};
use sqlx::PgPool;

use super::decode_id;

/// List every hotel ordered by id.
pub async fn list(pool: &PgPool) -> Result<Vec<Hotel>, sqlx::Error> {
    let rows = sqlx::query_as::<_, HotelRow>(
        "SELECT id, name, image, created_at, updated_at FROM hotels ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(HotelRow::into_record).collect()
}

/// Fetch a hotel together with its rooms.
pub async fn get_with_rooms(
    pool: &PgPool,
    hotel_id: HotelId,
) -> Result<Option<HotelWithRooms>, sqlx::Error> {
    let Some(row) = sqlx::query_as::<_, HotelRow>(
        "SELECT id, name, image, created_at, updated_at FROM hotels WHERE id = $1",
    )
    .bind(hotel_id.get())
    .fetch_optional(pool)
    .await?
    else {
        return Ok(None);
    };
    let hotel = row.into_record()?;

    let rooms = sqlx::query_as::<_, RoomRow>(
        "SELECT id, name, capacity, hotel_id, created_at, updated_at
         FROM rooms WHERE hotel_id = $1 ORDER BY id",
    )
    .bind(hotel_id.get())
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(RoomRow::into_record)
    .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(HotelWithRooms::new(hotel, rooms)))
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct HotelRow {
    id: i32,
    name: String,
    image: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl HotelRow {
    fn into_record(self) -> Result<Hotel, sqlx::Error> {
        Ok(Hotel {
            id: decode_id(self.id, HotelId::new)?,
            name: self.name,
            image: self.image,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct RoomRow {
    id: i32,
    name: String,
    capacity: i32,
    hotel_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RoomRow {
    fn into_record(self) -> Result<Room, sqlx::Error> {
        Ok(Room {
            id: decode_id(self.id, RoomId::new)?,
            name: self.name,
            capacity: self.capacity,
            hotel_id: decode_id(self.hotel_id, HotelId::new)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
