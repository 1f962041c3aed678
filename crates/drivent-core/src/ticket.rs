//! # Tickets and Ticket Types
//!
//! A [`Ticket`] belongs to exactly one enrollment and always travels with
//! its [`TicketType`], which carries the hotel and remote entitlements.
//!
//! ## Hotel access
//!
//! A ticket grants hotel access iff all of:
//!
//! - its status is [`TicketStatus::Paid`]
//! - its ticket type includes a hotel
//! - its ticket type is not remote

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PaymentShortfall, ValidationError};
use crate::identity::{EnrollmentId, TicketId, TicketTypeId};

/// Payment state of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Held for the attendee, not yet paid.
    Reserved,
    /// Paid in full.
    Paid,
}

impl TicketStatus {
    /// Return the wire / database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "RESERVED",
            Self::Paid => "PAID",
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RESERVED" => Ok(Self::Reserved),
            "PAID" => Ok(Self::Paid),
            other => Err(ValidationError::InvalidTicketStatus(other.to_string())),
        }
    }
}

/// Ticket category and its entitlements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    /// Primary key.
    pub id: TicketTypeId,
    /// Display name, e.g. "Presencial + Hotel".
    pub name: String,
    /// Price in minor currency units.
    pub price: i32,
    /// Remote attendance only.
    pub is_remote: bool,
    /// A hotel stay is part of the package.
    pub includes_hotel: bool,
}

impl TicketType {
    /// Whether this category entitles its holder to a hotel stay,
    /// independent of payment state.
    pub fn covers_hotel_stay(&self) -> bool {
        self.includes_hotel && !self.is_remote
    }
}

/// A ticket joined with its ticket type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Primary key.
    pub id: TicketId,
    /// Owning enrollment. At most one ticket per enrollment.
    pub enrollment_id: EnrollmentId,
    /// Payment state.
    pub status: TicketStatus,
    /// Category and entitlements.
    pub ticket_type: TicketType,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Check the hotel-access rule, reporting the first condition that fails.
    pub fn check_hotel_access(&self) -> Result<(), PaymentShortfall> {
        if self.status != TicketStatus::Paid {
            return Err(PaymentShortfall::Unpaid);
        }
        if !self.ticket_type.includes_hotel {
            return Err(PaymentShortfall::HotelNotIncluded);
        }
        if self.ticket_type.is_remote {
            return Err(PaymentShortfall::RemoteTicket);
        }
        Ok(())
    }

    /// Whether this ticket grants hotel access.
    pub fn grants_hotel_access(&self) -> bool {
        self.check_hotel_access().is_ok()
    }
}
