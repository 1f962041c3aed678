//! # Hotel Eligibility
//!
//! Decides whether a user may see hotel data, and if not, why.
//!
//! ```text
//! enrollment by user ──none──▶ NotFound
//!        │
//! ticket by enrollment ──none──▶ NotFound
//!        │
//! status PAID ∧ includesHotel ∧ ¬isRemote ──no──▶ PaymentRequired
//!        │
//!        ▼
//!       Ok
//! ```
//!
//! Lookups go through [`AttendeeDirectory`]. Every failure is terminal; the
//! checker never retries.

use std::future::Future;

use crate::enrollment::Enrollment;
use crate::error::EligibilityError;
use crate::identity::{EnrollmentId, UserId};
use crate::ticket::Ticket;

/// Classification of an eligibility failure, mapped to a response status
/// by the delivery layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Enrollment or ticket is missing.
    NotFound,
    /// A ticket exists but does not cover a hotel stay.
    PaymentRequired,
    /// Anything else, e.g. the backing store failed.
    Unclassified,
}

impl FailureKind {
    /// Stable snake_case label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::PaymentRequired => "payment_required",
            Self::Unclassified => "unclassified",
        }
    }
}

/// Read access to enrollments and tickets.
///
/// Implementations must be `Send + Sync` and return `Send` futures so the
/// checker can run inside Axum handlers.
pub trait AttendeeDirectory: Send + Sync {
    /// Failure of the backing store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Find the enrollment owned by `user_id`, if any.
    fn find_enrollment_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Enrollment>, Self::Error>> + Send;

    /// Find the ticket (joined with its type) for `enrollment_id`, if any.
    fn find_ticket_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> impl Future<Output = Result<Option<Ticket>, Self::Error>> + Send;
}

/// Request-scoped hotel eligibility check over an [`AttendeeDirectory`].
#[derive(Debug)]
pub struct EligibilityChecker<'a, D> {
    directory: &'a D,
}

impl<'a, D: AttendeeDirectory> EligibilityChecker<'a, D> {
    /// Borrow a directory for the duration of a request.
    pub fn new(directory: &'a D) -> Self {
        Self { directory }
    }

    /// Verify that `user_id` holds a paid, in-person ticket with hotel.
    ///
    /// The ticket lookup only runs once an enrollment has been found.
    pub async fn verify(&self, user_id: UserId) -> Result<(), EligibilityError<D::Error>> {
        let Some(enrollment) = self
            .directory
            .find_enrollment_by_user(user_id)
            .await
            .map_err(EligibilityError::Lookup)?
        else {
            return Err(EligibilityError::EnrollmentNotFound { user_id });
        };

        let Some(ticket) = self
            .directory
            .find_ticket_by_enrollment(enrollment.id)
            .await
            .map_err(EligibilityError::Lookup)?
        else {
            return Err(EligibilityError::TicketNotFound {
                enrollment_id: enrollment.id,
            });
        };

        ticket
            .check_hotel_access()
            .map_err(EligibilityError::PaymentRequired)
    }
}
