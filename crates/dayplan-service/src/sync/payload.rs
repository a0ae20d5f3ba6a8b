//! Wire types for the batch endpoint and their decoded, typed form.
//!
//! Raw operations arrive with a loosely-typed JSON payload. The whole batch
//! is decoded into `DecodedOperation` values before any side effects begin,
//! so a malformed payload anywhere in the batch fails it up front instead
//! of after a partial commit.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use dayplan_core::types::TableName;
use dayplan_db::db::enums::Visibility;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{ServiceError, ServiceResult};
use crate::schedule::alert::{EventAlerts, RoutineAlerts, TaskAlerts};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    Create,
    Update,
    Delete,
}

/// One raw batch operation as received from the client.
///
/// `row_id` is a real server id, or a client-chosen (typically negative)
/// temporary id for a row created earlier in the same batch. `timestamp`
/// is the client wall clock in Unix millis; it is carried for diagnostics
/// but never used to reorder operations or resolve conflicts.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub table_name: TableName,
    pub row_id: i64,
    pub operation: OpKind,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Event create/update payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub source_text: Option<String>,
    pub visibility: Option<Visibility>,
    pub category_id: i64,
    pub alert: Option<EventAlerts>,
}

/// Task create/update payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub scheduled_time: Option<NaiveDateTime>,
    pub source_text: Option<String>,
    pub visibility: Option<Visibility>,
    pub category_id: i64,
    pub alert: Option<TaskAlerts>,
}

/// Routine create/update payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutinePayload {
    pub name: String,
    pub days_of_week: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub icon: String,
    pub color: String,
    pub alert: Option<RoutineAlerts>,
}

/// Category create/update payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub name: String,
    pub color: String,
}

/// A batch operation with its payload decoded against the schema implied
/// by `table_name` x `operation`.
#[derive(Debug, Clone)]
pub enum DecodedOperation {
    EventCreate { temp_id: i64, payload: EventPayload },
    EventUpdate { row_id: i64, payload: EventPayload },
    EventDelete { row_id: i64 },
    TaskCreate { temp_id: i64, payload: TaskPayload },
    TaskUpdate { row_id: i64, payload: TaskPayload },
    TaskDelete { row_id: i64 },
    RoutineCreate { temp_id: i64, payload: RoutinePayload },
    RoutineUpdate { row_id: i64, payload: RoutinePayload },
    RoutineDelete { row_id: i64 },
    CategoryCreate { temp_id: i64, payload: CategoryPayload },
    CategoryUpdate { row_id: i64, payload: CategoryPayload },
    CategoryDelete { row_id: i64 },
}

/// ## Summary
/// Decodes and validates every operation in the batch, in order, before
/// anything is applied.
///
/// ## Errors
/// Returns a validation error naming the offending operation if a payload
/// is missing or does not match its table's schema.
pub fn decode_operations(operations: &[Operation]) -> ServiceResult<Vec<DecodedOperation>> {
    operations.iter().map(decode_operation).collect()
}

fn decode_operation(op: &Operation) -> ServiceResult<DecodedOperation> {
    Ok(match (op.table_name, op.operation) {
        (TableName::Events, OpKind::Create) => DecodedOperation::EventCreate {
            temp_id: op.row_id,
            payload: required_payload(op)?,
        },
        (TableName::Events, OpKind::Update) => DecodedOperation::EventUpdate {
            row_id: op.row_id,
            payload: required_payload(op)?,
        },
        (TableName::Events, OpKind::Delete) => DecodedOperation::EventDelete { row_id: op.row_id },
        (TableName::Tasks, OpKind::Create) => DecodedOperation::TaskCreate {
            temp_id: op.row_id,
            payload: required_payload(op)?,
        },
        (TableName::Tasks, OpKind::Update) => DecodedOperation::TaskUpdate {
            row_id: op.row_id,
            payload: required_payload(op)?,
        },
        (TableName::Tasks, OpKind::Delete) => DecodedOperation::TaskDelete { row_id: op.row_id },
        (TableName::Routines, OpKind::Create) => DecodedOperation::RoutineCreate {
            temp_id: op.row_id,
            payload: required_payload(op)?,
        },
        (TableName::Routines, OpKind::Update) => DecodedOperation::RoutineUpdate {
            row_id: op.row_id,
            payload: required_payload(op)?,
        },
        (TableName::Routines, OpKind::Delete) => {
            DecodedOperation::RoutineDelete { row_id: op.row_id }
        }
        (TableName::Categories, OpKind::Create) => DecodedOperation::CategoryCreate {
            temp_id: op.row_id,
            payload: required_payload(op)?,
        },
        (TableName::Categories, OpKind::Update) => DecodedOperation::CategoryUpdate {
            row_id: op.row_id,
            payload: required_payload(op)?,
        },
        (TableName::Categories, OpKind::Delete) => {
            DecodedOperation::CategoryDelete { row_id: op.row_id }
        }
    })
}

fn required_payload<T: DeserializeOwned>(op: &Operation) -> ServiceResult<T> {
    let value = op.payload.as_ref().ok_or_else(|| {
        ServiceError::ValidationError(format!(
            "{} operation on {} requires a payload",
            kind_str(op.operation),
            op.table_name
        ))
    })?;
    serde_json::from_value(value.clone()).map_err(|e| {
        ServiceError::ValidationError(format!("invalid {} payload: {e}", op.table_name))
    })
}

fn kind_str(kind: OpKind) -> &'static str {
    match kind {
        OpKind::Create => "create",
        OpKind::Update => "update",
        OpKind::Delete => "delete",
    }
}
