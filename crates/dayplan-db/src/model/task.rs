use diesel::{pg::Pg, prelude::*};

use crate::db::enums::Visibility;
use crate::db::schema;

/// Timestamp-based schedule item with completion state.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, AsChangeset)]
#[diesel(table_name = schema::tasks)]
#[diesel(check_for_backend(Pg))]
#[diesel(treat_none_as_null = true)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: Option<chrono::NaiveDateTime>,
    pub end_time: Option<chrono::NaiveDateTime>,
    pub scheduled_time: Option<chrono::NaiveDateTime>,
    pub is_completed: bool,
    pub completed_at: Option<chrono::NaiveDate>,
    pub source_text: Option<String>,
    pub visibility: Visibility,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::tasks)]
pub struct NewTask {
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: Option<chrono::NaiveDateTime>,
    pub end_time: Option<chrono::NaiveDateTime>,
    pub scheduled_time: Option<chrono::NaiveDateTime>,
    pub is_completed: bool,
    pub source_text: Option<String>,
    pub visibility: Visibility,
}
