//! Alert reconciliation.
//!
//! Every edit carries the complete desired alert set for its owner; the
//! reconciler deletes all existing alert rows and inserts one row per
//! non-null requested offset. Submitting a request with only one kind set
//! still clears the others. This is a full replace, never a merge.

use dayplan_db::db::enums::AlertKind;
use dayplan_db::model::alert::NewAlert;
use dayplan_db::store::ScheduleStore;
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// Alert offsets for an event participant, in minutes before the trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAlerts {
    pub event_start: Option<i32>,
    pub event_end: Option<i32>,
}

/// Alert offsets for a task participant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAlerts {
    pub task_schedule: Option<i32>,
    pub task_start: Option<i32>,
    pub task_end: Option<i32>,
}

/// Alert offsets for a routine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineAlerts {
    pub routine_start: Option<i32>,
    pub routine_end: Option<i32>,
}

fn check_offset(minutes_before: Option<i32>) -> ServiceResult<()> {
    match minutes_before {
        Some(m) if m < 0 => Err(ServiceError::ValidationError(format!(
            "alert offset must be non-negative, got {m}"
        ))),
        _ => Ok(()),
    }
}

/// ## Summary
/// Replaces the full alert set of an event participant.
///
/// ## Errors
/// Returns a validation error for negative offsets before any row is
/// touched; otherwise propagates store failures.
pub async fn replace_for_event_participant(
    store: &dyn ScheduleStore,
    participant_id: i64,
    requested: Option<&EventAlerts>,
) -> ServiceResult<()> {
    let requested = requested.copied().unwrap_or_default();
    check_offset(requested.event_start)?;
    check_offset(requested.event_end)?;

    store.delete_alerts_for_participant(participant_id).await?;

    if let Some(minutes) = requested.event_start {
        store
            .create_alert(NewAlert::for_participant(
                participant_id,
                AlertKind::EventStart,
                minutes,
            ))
            .await?;
    }
    if let Some(minutes) = requested.event_end {
        store
            .create_alert(NewAlert::for_participant(
                participant_id,
                AlertKind::EventEnd,
                minutes,
            ))
            .await?;
    }
    Ok(())
}

/// ## Summary
/// Replaces the full alert set of a task participant.
///
/// ## Errors
/// Returns a validation error for negative offsets before any row is
/// touched; otherwise propagates store failures.
pub async fn replace_for_task_participant(
    store: &dyn ScheduleStore,
    participant_id: i64,
    requested: Option<&TaskAlerts>,
) -> ServiceResult<()> {
    let requested = requested.copied().unwrap_or_default();
    check_offset(requested.task_schedule)?;
    check_offset(requested.task_start)?;
    check_offset(requested.task_end)?;

    store.delete_alerts_for_participant(participant_id).await?;

    for (kind, minutes) in [
        (AlertKind::TaskSchedule, requested.task_schedule),
        (AlertKind::TaskStart, requested.task_start),
        (AlertKind::TaskEnd, requested.task_end),
    ] {
        if let Some(minutes) = minutes {
            store
                .create_alert(NewAlert::for_participant(participant_id, kind, minutes))
                .await?;
        }
    }
    Ok(())
}

/// ## Summary
/// Replaces the full alert set of a routine.
///
/// ## Errors
/// Returns a validation error for negative offsets before any row is
/// touched; otherwise propagates store failures.
pub async fn replace_for_routine(
    store: &dyn ScheduleStore,
    routine_id: i64,
    requested: Option<&RoutineAlerts>,
) -> ServiceResult<()> {
    let requested = requested.copied().unwrap_or_default();
    check_offset(requested.routine_start)?;
    check_offset(requested.routine_end)?;

    store.delete_alerts_for_routine(routine_id).await?;

    for (kind, minutes) in [
        (AlertKind::RoutineStart, requested.routine_start),
        (AlertKind::RoutineEnd, requested.routine_end),
    ] {
        if let Some(minutes) = minutes {
            store
                .create_alert(NewAlert::for_routine(routine_id, kind, minutes))
                .await?;
        }
    }
    Ok(())
}

/// Collects an event participant's alert rows back into offsets.
#[must_use]
pub fn event_alerts_from_rows(rows: &[dayplan_db::model::alert::Alert]) -> EventAlerts {
    EventAlerts {
        event_start: find_offset(rows, AlertKind::EventStart),
        event_end: find_offset(rows, AlertKind::EventEnd),
    }
}

/// Collects a task participant's alert rows back into offsets.
#[must_use]
pub fn task_alerts_from_rows(rows: &[dayplan_db::model::alert::Alert]) -> TaskAlerts {
    TaskAlerts {
        task_schedule: find_offset(rows, AlertKind::TaskSchedule),
        task_start: find_offset(rows, AlertKind::TaskStart),
        task_end: find_offset(rows, AlertKind::TaskEnd),
    }
}

/// Collects a routine's alert rows back into offsets.
#[must_use]
pub fn routine_alerts_from_rows(rows: &[dayplan_db::model::alert::Alert]) -> RoutineAlerts {
    RoutineAlerts {
        routine_start: find_offset(rows, AlertKind::RoutineStart),
        routine_end: find_offset(rows, AlertKind::RoutineEnd),
    }
}

fn find_offset(rows: &[dayplan_db::model::alert::Alert], kind: AlertKind) -> Option<i32> {
    rows.iter()
        .find(|alert| alert.kind == kind)
        .map(|alert| alert.minutes_before)
}
