//! # Identifier Newtypes
//!
//! Every record in the hotels service is keyed by a positive serial integer.
//! Each key gets its own type so a [`RoomId`] can never be handed to a
//! function that wants a [`HotelId`].
//!
//! Identifiers are validated at construction: zero and negative values are
//! rejected with [`ValidationError::NonPositiveId`]. Deserialization goes
//! through the same check.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! serial_id {
    ($(#[$meta:meta])* $ty:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $ty(i32);

        impl $ty {
            /// Wrap a raw key, rejecting zero and negative values.
            pub fn new(raw: i32) -> Result<Self, ValidationError> {
                if raw > 0 {
                    Ok(Self(raw))
                } else {
                    Err(ValidationError::NonPositiveId { kind: $kind, value: raw })
                }
            }

            /// The raw key, as stored in the database.
            pub fn get(self) -> i32 {
                self.0
            }
        }

        impl TryFrom<i32> for $ty {
            type Error = ValidationError;

            fn try_from(raw: i32) -> Result<Self, Self::Error> {
                Self::new(raw)
            }
        }

        impl From<$ty> for i32 {
            fn from(id: $ty) -> i32 {
                id.0
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

serial_id!(
    /// The account that owns an enrollment. Issued by the auth layer.
    UserId,
    "user"
);

serial_id!(
    /// A user's event registration.
    EnrollmentId,
    "enrollment"
);

serial_id!(
    /// A purchased (or reserved) ticket.
    TicketId,
    "ticket"
);

serial_id!(
    /// A ticket category.
    TicketTypeId,
    "ticket type"
);

serial_id!(
    /// A partner hotel.
    HotelId,
    "hotel"
);

serial_id!(
    /// A room inside a hotel.
    RoomId,
    "room"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_ids_are_accepted() {
        let id = UserId::new(7).expect("positive id");
        assert_eq!(id.get(), 7);
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn zero_is_rejected() {
        let err = HotelId::new(0).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NonPositiveId { kind: "hotel", value: 0 }
        ));
    }

    #[test]
    fn negative_is_rejected() {
        assert!(EnrollmentId::new(-3).is_err());
    }

    #[test]
    fn serializes_as_bare_integer() {
        let id = RoomId::new(42).expect("positive id");
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
    }

    #[test]
    fn deserialization_validates() {
        let ok: TicketId = serde_json::from_str("5").unwrap();
        assert_eq!(ok.get(), 5);
        assert!(serde_json::from_str::<TicketId>("0").is_err());
        assert!(serde_json::from_str::<TicketId>("-1").is_err());
    }

    #[test]
    fn ids_order_by_raw_value() {
        let a = HotelId::new(1).unwrap();
        let b = HotelId::new(2).unwrap();
        assert!(a < b);
    }
}
