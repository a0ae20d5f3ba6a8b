use diesel::{pg::Pg, prelude::*};

use crate::db::schema;

/// User-owned category used to tag participants.
///
/// Exactly one category per user carries `is_default = true`; it is seeded
/// at signup and can never be deleted directly.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, AsChangeset)]
#[diesel(table_name = schema::categories)]
#[diesel(check_for_backend(Pg))]
pub struct Category {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub color: String,
    pub is_default: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::categories)]
pub struct NewCategory {
    pub user_id: i64,
    pub name: String,
    pub color: String,
    pub is_default: bool,
}
