use diesel::{pg::Pg, prelude::*};

use crate::db::enums::{ParticipantRole, ParticipantStatus};
use crate::db::schema;

/// Join row granting a user access to one schedule item.
///
/// `event_id` and `task_id` are mutually exclusive; exactly one is set.
/// Every schedule item has exactly one participant with the OWNER role.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, AsChangeset)]
#[diesel(table_name = schema::participants)]
#[diesel(check_for_backend(Pg))]
#[diesel(treat_none_as_null = true)]
pub struct Participant {
    pub id: i64,
    pub user_id: i64,
    pub event_id: Option<i64>,
    pub task_id: Option<i64>,
    pub category_id: i64,
    pub role: ParticipantRole,
    pub status: ParticipantStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Participant {
    /// True when this participant owns its schedule item.
    #[must_use]
    pub fn is_owner(&self) -> bool {
        self.role == ParticipantRole::Owner
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::participants)]
pub struct NewParticipant {
    pub user_id: i64,
    pub event_id: Option<i64>,
    pub task_id: Option<i64>,
    pub category_id: i64,
    pub role: ParticipantRole,
    pub status: ParticipantStatus,
}
