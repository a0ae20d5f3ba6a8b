use diesel::{pg::Pg, prelude::*};

use crate::db::enums::AlertKind;
use crate::db::schema;

/// Reminder rule read by the external minute-granularity poller.
///
/// Belongs to exactly one of a participant or a routine. The engine only
/// maintains these rows; dispatching notifications is the poller's job.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::alerts)]
#[diesel(check_for_backend(Pg))]
pub struct Alert {
    pub id: i64,
    pub participant_id: Option<i64>,
    pub routine_id: Option<i64>,
    pub kind: AlertKind,
    pub minutes_before: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::alerts)]
pub struct NewAlert {
    pub participant_id: Option<i64>,
    pub routine_id: Option<i64>,
    pub kind: AlertKind,
    pub minutes_before: i32,
}

impl NewAlert {
    /// Alert attached to a participant of an event or task.
    #[must_use]
    pub fn for_participant(participant_id: i64, kind: AlertKind, minutes_before: i32) -> Self {
        Self {
            participant_id: Some(participant_id),
            routine_id: None,
            kind,
            minutes_before,
        }
    }

    /// Alert attached to a routine.
    #[must_use]
    pub fn for_routine(routine_id: i64, kind: AlertKind, minutes_before: i32) -> Self {
        Self {
            participant_id: None,
            routine_id: Some(routine_id),
            kind,
            minutes_before,
        }
    }
}
