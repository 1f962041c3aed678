#![deny(missing_docs)]

//! # drivent-core: Domain Types for the Drivent Hotels Service
//!
//! This crate holds everything the hotels service decides, and nothing it
//! does over the network. It depends only on `serde`, `thiserror` and
//! `chrono` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** A [`HotelId`] cannot be passed
//!    where an [`EnrollmentId`] is expected.
//!
//! 2. **One hotel-access rule.** A ticket grants hotel access iff it is
//!    [`TicketStatus::Paid`], its [`TicketType`] includes a hotel, and the
//!    ticket type is not remote. [`Ticket::check_hotel_access`] is the only
//!    place that rule is written down.
//!
//! 3. **Lookups behind a trait.** [`EligibilityChecker`] consumes an
//!    [`AttendeeDirectory`]; the API crate backs it with Postgres or
//!    in-memory stores, tests back it with fixtures.
//!
//! 4. **Classified failures.** [`EligibilityError::kind`] collapses every
//!    failure into a [`FailureKind`] the delivery layer maps to a status code.

pub mod eligibility;
pub mod enrollment;
pub mod error;
pub mod hotel;
pub mod identity;
pub mod ticket;

pub use eligibility::{AttendeeDirectory, EligibilityChecker, FailureKind};
pub use enrollment::Enrollment;
pub use error::{EligibilityError, PaymentShortfall, ValidationError};
pub use hotel::{Hotel, HotelWithRooms, Room};
pub use identity::{EnrollmentId, HotelId, RoomId, TicketId, TicketTypeId, UserId};
pub use ticket::{Ticket, TicketStatus, TicketType};
