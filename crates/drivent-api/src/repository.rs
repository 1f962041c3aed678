//! # Record Lookups
//!
//! Backs [`AttendeeDirectory`] and the hotel catalog with Postgres when a
//! pool is configured, and with the in-memory stores otherwise.

use drivent_core::{
    AttendeeDirectory, Enrollment, EnrollmentId, Hotel, HotelId, HotelWithRooms, Ticket, UserId,
};

use crate::db;
use crate::state::AppState;

impl AttendeeDirectory for AppState {
    type Error = sqlx::Error;

    async fn find_enrollment_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        if let Some(pool) = &self.db_pool {
            return db::enrollments::find_by_user(pool, user_id).await;
        }
        Ok(self.enrollments.find(|e| e.user_id == user_id))
    }

    async fn find_ticket_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        if let Some(pool) = &self.db_pool {
            return db::tickets::find_by_enrollment(pool, enrollment_id).await;
        }
        Ok(self.tickets.find(|t| t.enrollment_id == enrollment_id))
    }
}

impl AppState {
    /// All hotels, ordered by id.
    pub async fn list_hotels(&self) -> Result<Vec<Hotel>, sqlx::Error> {
        if let Some(pool) = &self.db_pool {
            return db::hotels::list(pool).await;
        }
        Ok(self.hotels.list())
    }

    /// A hotel with its rooms, or `None` if the hotel does not exist.
    pub async fn find_hotel_with_rooms(
        &self,
        hotel_id: HotelId,
    ) -> Result<Option<HotelWithRooms>, sqlx::Error> {
        if let Some(pool) = &self.db_pool {
            return db::hotels::get_with_rooms(pool, hotel_id).await;
        }
        Ok(self
            .hotels
            .get(&hotel_id)
            .map(|hotel| HotelWithRooms::new(hotel, self.rooms.filter(|r| r.hotel_id == hotel_id))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use drivent_core::{Room, RoomId, TicketId, TicketStatus, TicketType, TicketTypeId};

    fn seeded() -> AppState {
        let state = AppState::new();
        let now = Utc::now();
        let enrollment = Enrollment {
            id: EnrollmentId::new(5).unwrap(),
            user_id: UserId::new(1).unwrap(),
            name: "Grace Hopper".to_string(),
            created_at: now,
            updated_at: now,
        };
        state.enrollments.insert(enrollment.id, enrollment);
        let ticket = Ticket {
            id: TicketId::new(9).unwrap(),
            enrollment_id: EnrollmentId::new(5).unwrap(),
            status: TicketStatus::Paid,
            ticket_type: TicketType {
                id: TicketTypeId::new(1).unwrap(),
                name: "Presencial + Hotel".to_string(),
                price: 60_000,
                is_remote: false,
                includes_hotel: true,
            },
            created_at: now,
            updated_at: now,
        };
        state.tickets.insert(ticket.id, ticket);
        for id in [2, 1] {
            let hotel = Hotel {
                id: HotelId::new(id).unwrap(),
                name: format!("Hotel {id}"),
                image: "https://example.com/h.png".to_string(),
                created_at: now,
                updated_at: now,
            };
            state.hotels.insert(hotel.id, hotel);
        }
        for (id, hotel) in [(1, 1), (2, 2), (3, 1)] {
            let room = Room {
                id: RoomId::new(id).unwrap(),
                name: format!("{id}0{id}"),
                capacity: 2,
                hotel_id: HotelId::new(hotel).unwrap(),
                created_at: now,
                updated_at: now,
            };
            state.rooms.insert(room.id, room);
        }
        state
    }

    #[tokio::test]
    async fn enrollment_found_by_user() {
        let state = seeded();
        let found = state
            .find_enrollment_by_user(UserId::new(1).unwrap())
            .await
            .unwrap();
        assert_eq!(found.map(|e| e.id.get()), Some(5));

        let missing = state
            .find_enrollment_by_user(UserId::new(2).unwrap())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn ticket_found_by_enrollment() {
        let state = seeded();
        let found = state
            .find_ticket_by_enrollment(EnrollmentId::new(5).unwrap())
            .await
            .unwrap();
        assert_eq!(found.map(|t| t.id.get()), Some(9));
    }

    #[tokio::test]
    async fn hotels_listed_in_id_order() {
        let state = seeded();
        let ids: Vec<i32> = state
            .list_hotels()
            .await
            .unwrap()
            .iter()
            .map(|h| h.id.get())
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn hotel_carries_only_its_rooms() {
        let state = seeded();
        let hotel = state
            .find_hotel_with_rooms(HotelId::new(1).unwrap())
            .await
            .unwrap()
            .expect("hotel 1 exists");
        let room_ids: Vec<i32> = hotel.rooms.iter().map(|r| r.id.get()).collect();
        assert_eq!(room_ids, vec![1, 3]);

        let missing = state
            .find_hotel_with_rooms(HotelId::new(99).unwrap())
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
