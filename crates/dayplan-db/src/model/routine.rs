use diesel::{pg::Pg, prelude::*};

use crate::db::schema;

/// Weekly recurring routine, e.g. "Gym MON,WED,FRI 07:00-08:00".
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, AsChangeset)]
#[diesel(table_name = schema::routines)]
#[diesel(check_for_backend(Pg))]
pub struct Routine {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub days_of_week: String,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub icon: String,
    pub color: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::routines)]
pub struct NewRoutine {
    pub user_id: i64,
    pub name: String,
    pub days_of_week: String,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub icon: String,
    pub color: String,
}
