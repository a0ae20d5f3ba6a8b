//! Database enum types with Diesel serialization.
//!
//! Enum columns are stored as TEXT with CHECK constraints; each wrapper
//! implements `ToSql` and `FromSql` for automatic conversion between Rust
//! and `PostgreSQL`.

use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use std::fmt;
use std::io::Write;

/// Who may see a schedule item.
///
/// Maps to the `visibility` CHECK constraint on `events` and `tasks`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Private,
    Friends,
    Public,
}

impl ToSql<Text, Pg> for Visibility {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for Visibility {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"PRIVATE" => Ok(Self::Private),
            b"FRIENDS" => Ok(Self::Friends),
            b"PUBLIC" => Ok(Self::Public),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl Visibility {
    /// Returns the database string representation of this visibility.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Private => "PRIVATE",
            Self::Friends => "FRIENDS",
            Self::Public => "PUBLIC",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role a participant holds on a schedule item.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantRole {
    Owner,
    Member,
}

impl ToSql<Text, Pg> for ParticipantRole {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for ParticipantRole {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"OWNER" => Ok(Self::Owner),
            b"MEMBER" => Ok(Self::Member),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ParticipantRole {
    /// Returns the database string representation of this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Member => "MEMBER",
        }
    }
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invitation status of a participant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantStatus {
    Accepted,
    Pending,
    Declined,
}

impl ToSql<Text, Pg> for ParticipantStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for ParticipantStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"ACCEPTED" => Ok(Self::Accepted),
            b"PENDING" => Ok(Self::Pending),
            b"DECLINED" => Ok(Self::Declined),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ParticipantStatus {
    /// Returns the database string representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "ACCEPTED",
            Self::Pending => "PENDING",
            Self::Declined => "DECLINED",
        }
    }
}

impl fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trigger kind of a reminder rule.
///
/// Event kinds attach to participants of events, task kinds to participants
/// of tasks, routine kinds to routines. The reference instant the poller
/// subtracts `minutes_before` from is implied by the kind.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    EventStart,
    EventEnd,
    TaskSchedule,
    TaskStart,
    TaskEnd,
    RoutineStart,
    RoutineEnd,
}

impl ToSql<Text, Pg> for AlertKind {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for AlertKind {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"event_start" => Ok(Self::EventStart),
            b"event_end" => Ok(Self::EventEnd),
            b"task_schedule" => Ok(Self::TaskSchedule),
            b"task_start" => Ok(Self::TaskStart),
            b"task_end" => Ok(Self::TaskEnd),
            b"routine_start" => Ok(Self::RoutineStart),
            b"routine_end" => Ok(Self::RoutineEnd),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl AlertKind {
    /// Returns the database string representation of this alert kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EventStart => "event_start",
            Self::EventEnd => "event_end",
            Self::TaskSchedule => "task_schedule",
            Self::TaskStart => "task_start",
            Self::TaskEnd => "task_end",
            Self::RoutineStart => "routine_start",
            Self::RoutineEnd => "routine_end",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
