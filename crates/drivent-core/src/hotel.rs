//! # Hotels and Rooms
//!
//! Plain records. Hotel data carries no decision logic; access to it is
//! gated by [`EligibilityChecker`](crate::EligibilityChecker).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::{HotelId, RoomId};

/// A partner hotel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    /// Primary key.
    pub id: HotelId,
    /// Display name.
    pub name: String,
    /// Image URL.
    pub image: String,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// A room inside a hotel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Primary key.
    pub id: RoomId,
    /// Room label, e.g. "101".
    pub name: String,
    /// Number of beds.
    pub capacity: i32,
    /// Owning hotel.
    pub hotel_id: HotelId,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// A hotel together with its rooms, ordered by room id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelWithRooms {
    /// The hotel.
    #[serde(flatten)]
    pub hotel: Hotel,
    /// Its rooms.
    pub rooms: Vec<Room>,
}

impl HotelWithRooms {
    /// Attach rooms to a hotel, dropping any that belong elsewhere and
    /// sorting the rest by id.
    pub fn new(hotel: Hotel, rooms: impl IntoIterator<Item = Room>) -> Self {
        let mut rooms: Vec<Room> = rooms
            .into_iter()
            .filter(|r| r.hotel_id == hotel.id)
            .collect();
        rooms.sort_by_key(|r| r.id);
        Self { hotel, rooms }
    }
}
