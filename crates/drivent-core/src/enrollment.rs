//! Event registration records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::{EnrollmentId, UserId};

/// A user's registration for the event. At most one per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    /// Primary key.
    pub id: EnrollmentId,
    /// Owning user.
    pub user_id: UserId,
    /// Attendee's full name.
    pub name: String,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}
