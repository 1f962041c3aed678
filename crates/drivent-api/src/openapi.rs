//! # OpenAPI Specification Assembly
//!
//! Collects the utoipa-documented hotel routes into one OpenAPI document
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the hotels API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Drivent Hotels API",
        version = "0.1.0",
        description = "Hotel and room listings for event attendees whose paid, in-person ticket includes lodging.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::hotels::list_hotels,
        crate::routes::hotels::get_hotel,
    ),
    components(schemas(
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        // Hotel DTOs
        crate::routes::hotels::HotelResponse,
        crate::routes::hotels::RoomResponse,
        crate::routes::hotels::HotelWithRoomsResponse,
    )),
    tags(
        (name = "hotels", description = "Hotel listings gated by ticket eligibility"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_lists_both_hotel_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/hotels"));
        assert!(doc.paths.paths.contains_key("/hotels/{hotel_id}"));
    }

    #[test]
    fn spec_registers_response_schemas() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.expect("components present").schemas;
        for name in ["ErrorBody", "HotelResponse", "RoomResponse", "HotelWithRoomsResponse"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
    }
}
