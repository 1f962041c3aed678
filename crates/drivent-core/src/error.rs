//! # Error Hierarchy
//!
//! Structured error types for the hotels service, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.

use thiserror::Error;

use crate::eligibility::FailureKind;
use crate::identity::{EnrollmentId, UserId};

/// Why an existing ticket does not grant hotel access.
///
/// Conditions are checked in declaration order and only the first failing
/// one is reported.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentShortfall {
    /// The ticket is reserved but has not been paid.
    #[error("ticket has not been paid")]
    Unpaid,

    /// The ticket type does not include a hotel stay.
    #[error("ticket type does not include hotel")]
    HotelNotIncluded,

    /// The ticket type is for remote attendance.
    #[error("ticket type is remote")]
    RemoteTicket,
}

impl PaymentShortfall {
    /// Stable snake_case label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::HotelNotIncluded => "hotel_not_included",
            Self::RemoteTicket => "remote_ticket",
        }
    }
}

/// Failure of [`EligibilityChecker::verify`](crate::EligibilityChecker::verify).
///
/// `E` is the error type of the [`AttendeeDirectory`](crate::AttendeeDirectory)
/// backing the check.
#[derive(Error, Debug)]
pub enum EligibilityError<E> {
    /// The user has no enrollment.
    #[error("no enrollment for user {user_id}")]
    EnrollmentNotFound {
        /// The user that was looked up.
        user_id: UserId,
    },

    /// The enrollment has no ticket.
    #[error("no ticket for enrollment {enrollment_id}")]
    TicketNotFound {
        /// The enrollment that was looked up.
        enrollment_id: EnrollmentId,
    },

    /// A ticket exists but does not cover a hotel stay.
    #[error("payment required: {0}")]
    PaymentRequired(PaymentShortfall),

    /// The directory itself failed.
    #[error("attendee lookup failed: {0}")]
    Lookup(#[source] E),
}

impl<E> EligibilityError<E> {
    /// Classify this failure for the delivery layer.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::EnrollmentNotFound { .. } | Self::TicketNotFound { .. } => FailureKind::NotFound,
            Self::PaymentRequired(_) => FailureKind::PaymentRequired,
            Self::Lookup(_) => FailureKind::Unclassified,
        }
    }
}

/// Validation errors for domain values arriving from storage or the wire.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Serial identifiers start at 1.
    #[error("invalid {kind} id: {value} (expected a positive integer)")]
    NonPositiveId {
        /// Which identifier was being built.
        kind: &'static str,
        /// The rejected value.
        value: i32,
    },

    /// Ticket status is neither `RESERVED` nor `PAID`.
    #[error("invalid ticket status: \"{0}\" (expected RESERVED or PAID)")]
    InvalidTicketStatus(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct StoreDown;

    impl std::fmt::Display for StoreDown {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("store down")
        }
    }

    #[test]
    fn missing_records_classify_as_not_found() {
        let user_id = UserId::new(1).unwrap();
        let enrollment_id = EnrollmentId::new(2).unwrap();
        assert_eq!(
            EligibilityError::<StoreDown>::EnrollmentNotFound { user_id }.kind(),
            FailureKind::NotFound
        );
        assert_eq!(
            EligibilityError::<StoreDown>::TicketNotFound { enrollment_id }.kind(),
            FailureKind::NotFound
        );
    }

    #[test]
    fn shortfalls_classify_as_payment_required() {
        for shortfall in [
            PaymentShortfall::Unpaid,
            PaymentShortfall::HotelNotIncluded,
            PaymentShortfall::RemoteTicket,
        ] {
            let err = EligibilityError::<StoreDown>::PaymentRequired(shortfall);
            assert_eq!(err.kind(), FailureKind::PaymentRequired);
        }
    }

    #[test]
    fn lookup_failures_are_unclassified() {
        let err = EligibilityError::Lookup(StoreDown);
        assert_eq!(err.kind(), FailureKind::Unclassified);
        assert!(err.to_string().contains("store down"));
    }

    #[test]
    fn display_messages_carry_context() {
        let err = EligibilityError::<StoreDown>::EnrollmentNotFound {
            user_id: UserId::new(9).unwrap(),
        };
        assert_eq!(err.to_string(), "no enrollment for user 9");

        let err = EligibilityError::<StoreDown>::PaymentRequired(PaymentShortfall::RemoteTicket);
        assert_eq!(err.to_string(), "payment required: ticket type is remote");
    }

    #[test]
    fn shortfall_labels() {
        assert_eq!(PaymentShortfall::Unpaid.as_str(), "unpaid");
        assert_eq!(PaymentShortfall::HotelNotIncluded.as_str(), "hotel_not_included");
        assert_eq!(PaymentShortfall::RemoteTicket.as_str(), "remote_ticket");
    }
}
