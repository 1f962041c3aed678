//! # Hotels API
//!
//! Hotel and room listings for attendees whose ticket covers a hotel stay.
//! Every handler runs the eligibility check before touching hotel data, so
//! a payment failure wins over a missing hotel or a malformed id.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use drivent_core::{EligibilityChecker, FailureKind, Hotel, HotelWithRooms, Room};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::AuthenticatedUser;
use crate::error::{AppError, ErrorBody};
use crate::extractors::extract_hotel_id;
use crate::state::AppState;

/// Hotel summary.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Hotel> for HotelResponse {
    fn from(hotel: Hotel) -> Self {
        Self {
            id: hotel.id.get(),
            name: hotel.name,
            image: hotel.image,
            created_at: hotel.created_at,
            updated_at: hotel.updated_at,
        }
    }
}

/// A room inside a hotel.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub hotel_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id.get(),
            name: room.name,
            capacity: room.capacity,
            hotel_id: room.hotel_id.get(),
            created_at: room.created_at,
            updated_at: room.updated_at,
        }
    }
}

/// Hotel detail with its rooms ordered by id.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelWithRoomsResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub rooms: Vec<RoomResponse>,
}

impl From<HotelWithRooms> for HotelWithRoomsResponse {
    fn from(detail: HotelWithRooms) -> Self {
        let HotelWithRooms { hotel, rooms } = detail;
        Self {
            id: hotel.id.get(),
            name: hotel.name,
            image: hotel.image,
            created_at: hotel.created_at,
            updated_at: hotel.updated_at,
            rooms: rooms.into_iter().map(RoomResponse::from).collect(),
        }
    }
}

/// Build the hotels router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/hotels", get(list_hotels))
        .route("/hotels/:hotel_id", get(get_hotel))
}

/// Run the eligibility check for the caller, recording the outcome.
async fn ensure_hotel_access(state: &AppState, user: AuthenticatedUser) -> Result<(), AppError> {
    match EligibilityChecker::new(state).verify(user.user_id).await {
        Ok(()) => {
            state.metrics.record_access_check("granted");
            Ok(())
        }
        Err(err) => {
            let kind = err.kind();
            state.metrics.record_access_check(kind.as_str());
            // Unclassified failures are logged when the response is built.
            if kind != FailureKind::Unclassified {
                tracing::info!(
                    user_id = %user.user_id,
                    outcome = kind.as_str(),
                    reason = %err,
                    "hotel access denied"
                );
            }
            Err(err.into())
        }
    }
}

/// GET /hotels: list hotels.
#[utoipa::path(
    get,
    path = "/hotels",
    responses(
        (status = 200, description = "All hotels ordered by id", body = Vec<HotelResponse>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorBody),
        (status = 402, description = "Ticket unpaid, remote, or without hotel", body = ErrorBody),
        (status = 404, description = "No enrollment or no ticket", body = ErrorBody),
    ),
    tag = "hotels"
)]
pub(crate) async fn list_hotels(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<HotelResponse>>, AppError> {
    ensure_hotel_access(&state, user).await?;
    let hotels = state.list_hotels().await.map_err(AppError::store)?;
    Ok(Json(hotels.into_iter().map(HotelResponse::from).collect()))
}

/// GET /hotels/{hotel_id}: hotel with its rooms.
#[utoipa::path(
    get,
    path = "/hotels/{hotel_id}",
    params(("hotel_id" = i32, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Hotel with rooms", body = HotelWithRoomsResponse),
        (status = 400, description = "Hotel id is not a positive integer", body = ErrorBody),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorBody),
        (status = 402, description = "Ticket unpaid, remote, or without hotel", body = ErrorBody),
        (status = 404, description = "No enrollment, no ticket, or no such hotel", body = ErrorBody),
    ),
    tag = "hotels"
)]
pub(crate) async fn get_hotel(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<HotelWithRoomsResponse>, AppError> {
    ensure_hotel_access(&state, user).await?;
    let hotel_id = extract_hotel_id(path)?;
    let hotel = state
        .find_hotel_with_rooms(hotel_id)
        .await
        .map_err(AppError::store)?
        .ok_or_else(|| AppError::NotFound(format!("hotel {hotel_id}")))?;
    Ok(Json(hotel.into()))
}
