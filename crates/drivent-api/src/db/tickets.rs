//! Ticket lookups on `tickets` joined with `ticket_types`.
//!
//! The `CHECK` constraint on `tickets.status` keeps unknown values out, but
//! a row that slips through is read as `RESERVED`: an unreadable status never
//! grants hotel access.

use chrono::{DateTime, Utc};
use drivent_core::{EnrollmentId, Ticket, TicketId, TicketStatus, TicketType, TicketTypeId};
use sqlx::PgPool;

use super::decode_id;

/// Fetch the ticket (with its ticket type) for an enrollment.
pub async fn find_by_enrollment(
    pool: &PgPool,
    enrollment_id: EnrollmentId,
) -> Result<Option<Ticket>, sqlx::Error> {
    let row = sqlx::query_as::<_, TicketRow>(
        "SELECT t.id, t.enrollment_id, t.status, t.created_at, t.updated_at,
                tt.id AS ticket_type_id, tt.name AS ticket_type_name, tt.price,
                tt.is_remote, tt.includes_hotel
         FROM tickets t
         JOIN ticket_types tt ON tt.id = t.ticket_type_id
         WHERE t.enrollment_id = $1",
    )
    .bind(enrollment_id.get())
    .fetch_optional(pool)
    .await?;

    row.map(TicketRow::into_record).transpose()
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct TicketRow {
    id: i32,
    enrollment_id: i32,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    ticket_type_id: i32,
    ticket_type_name: String,
    price: i32,
    is_remote: bool,
    includes_hotel: bool,
}

impl TicketRow {
    fn into_record(self) -> Result<Ticket, sqlx::Error> {
        let status = self.status.parse::<TicketStatus>().unwrap_or_else(|e| {
            tracing::warn!(
                id = self.id,
                status = %self.status,
                error = %e,
                "unknown ticket status in database, treating as RESERVED"
            );
            TicketStatus::Reserved
        });

        Ok(Ticket {
            id: decode_id(self.id, TicketId::new)?,
            enrollment_id: decode_id(self.enrollment_id, EnrollmentId::new)?,
            status,
            ticket_type: TicketType {
                id: decode_id(self.ticket_type_id, TicketTypeId::new)?,
                name: self.ticket_type_name,
                price: self.price,
                is_remote: self.is_remote,
                includes_hotel: self.includes_hotel,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
