//! # Custom Extractors
//!
//! Helpers that map Axum extractor rejections onto [`AppError`] so every
//! failure leaves the API with the same JSON error body.

use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use drivent_core::HotelId;

use crate::error::AppError;

/// Extract a path parameter, mapping rejections to [`AppError::BadRequest`].
///
/// ```ignore
/// async fn handler(path: Result<Path<i32>, PathRejection>) -> Result<..., AppError> {
///     let raw = extract_path(path)?;
/// }
/// ```
pub fn extract_path<T>(result: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
    result
        .map(|Path(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a `{hotel_id}` path parameter as a validated [`HotelId`].
pub fn extract_hotel_id(result: Result<Path<i32>, PathRejection>) -> Result<HotelId, AppError> {
    let raw = extract_path(result)?;
    HotelId::new(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}
