//! Enrollment lookups on the `enrollments` table.

use chrono::{DateTime, Utc};
use drivent_core::{Enrollment, EnrollmentId, UserId};
use sqlx::PgPool;

use super::decode_id;

/// Fetch the enrollment owned by a user.
pub async fn find_by_user(
    pool: &PgPool,
    user_id: UserId,
) -> Result<Option<Enrollment>, sqlx::Error> {
    let row = sqlx::query_as::<_, EnrollmentRow>(
        "SELECT id, user_id, name, created_at, updated_at
         FROM enrollments WHERE user_id = $1",
    )
    .bind(user_id.get())
    .fetch_optional(pool)
    .await?;

    row.map(EnrollmentRow::into_record).transpose()
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct EnrollmentRow {
    id: i32,
    user_id: i32,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl EnrollmentRow {
    fn into_record(self) -> Result<Enrollment, sqlx::Error> {
        Ok(Enrollment {
            id: decode_id(self.id, EnrollmentId::new)?,
            user_id: decode_id(self.user_id, UserId::new)?,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
