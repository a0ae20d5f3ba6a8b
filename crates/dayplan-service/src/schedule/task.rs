//! Task create/update/delete, detail lookup, scheduling, and completion.

use chrono::{NaiveDate, NaiveDateTime};
use dayplan_db::db::enums::{ParticipantRole, ParticipantStatus, Visibility};
use dayplan_db::model::category::Category;
use dayplan_db::model::participant::NewParticipant;
use dayplan_db::model::task::{NewTask, Task};
use dayplan_db::store::ScheduleStore;

use crate::error::{ServiceError, ServiceResult};
use crate::schedule::alert::{self, TaskAlerts};
use crate::schedule::event::resolve_category;
use crate::sync::payload::TaskPayload;

/// A task joined with the requesting user's category and alert offsets.
#[derive(Debug, Clone)]
pub struct TaskDetail {
    pub task: Task,
    pub category: Category,
    pub alerts: TaskAlerts,
}

/// ## Summary
/// Creates a task plus its OWNER participant and requested alerts.
///
/// ## Errors
/// Returns a validation error when the category id does not resolve to a
/// category owned by `current_user_id`.
#[tracing::instrument(skip(store, payload), fields(name = %payload.name))]
pub async fn create_task(
    store: &dyn ScheduleStore,
    payload: &TaskPayload,
    current_user_id: i64,
) -> ServiceResult<Task> {
    let category = resolve_category(store, payload.category_id, current_user_id).await?;

    let task = store
        .create_task(NewTask {
            name: payload.name.clone(),
            description: payload.description.clone(),
            location: payload.location.clone(),
            start_time: payload.start_time,
            end_time: payload.end_time,
            scheduled_time: payload.scheduled_time,
            is_completed: false,
            source_text: payload.source_text.clone(),
            visibility: payload.visibility.unwrap_or(Visibility::Private),
        })
        .await?;

    let participant = store
        .create_participant(NewParticipant {
            user_id: current_user_id,
            event_id: None,
            task_id: Some(task.id),
            category_id: category.id,
            role: ParticipantRole::Owner,
            status: ParticipantStatus::Accepted,
        })
        .await?;

    alert::replace_for_task_participant(store, participant.id, payload.alert.as_ref()).await?;

    Ok(task)
}

/// ## Summary
/// Rewrites a task's fields, repoints the requesting user's participant to
/// the payload's category, and full-replaces its alerts.
///
/// ## Errors
/// NotFound when the task or the user's participant is missing; a
/// validation error when the category is not owned by the user.
#[tracing::instrument(skip(store, payload))]
pub async fn edit_task(
    store: &dyn ScheduleStore,
    task_id: i64,
    payload: &TaskPayload,
    current_user_id: i64,
) -> ServiceResult<()> {
    let mut task = store
        .task_by_id(task_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Task not found".to_string()))?;

    task.name = payload.name.clone();
    task.description = payload.description.clone();
    task.location = payload.location.clone();
    task.start_time = payload.start_time;
    task.end_time = payload.end_time;
    task.scheduled_time = payload.scheduled_time;
    if let Some(visibility) = payload.visibility {
        task.visibility = visibility;
    }
    store.update_task(&task).await?;

    let mut participant = store
        .participant_for_task(task_id, current_user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Participant not found".to_string()))?;

    let category = resolve_category(store, payload.category_id, current_user_id).await?;
    participant.category_id = category.id;
    store.update_participant(&participant).await?;

    alert::replace_for_task_participant(store, participant.id, payload.alert.as_ref()).await?;

    Ok(())
}

/// ## Summary
/// Deletes a task; only its OWNER participant may do so.
///
/// ## Errors
/// NotFound when the task is missing, Forbidden when the requesting user
/// is not the OWNER.
#[tracing::instrument(skip(store))]
pub async fn delete_task(
    store: &dyn ScheduleStore,
    task_id: i64,
    current_user_id: i64,
) -> ServiceResult<()> {
    let task = store
        .task_by_id(task_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Task not found".to_string()))?;

    let participants = store.participants_of_task(task.id).await?;
    let is_owner = participants
        .iter()
        .any(|p| p.user_id == current_user_id && p.is_owner());
    if !is_owner {
        return Err(ServiceError::Forbidden(
            "User is not the owner of the task".to_string(),
        ));
    }

    store.delete_task(task.id).await?;
    Ok(())
}

/// ## Summary
/// Loads a task with the requesting user's category and alert offsets.
///
/// ## Errors
/// NotFound when the task or the user's participant is missing.
pub async fn task_detail(
    store: &dyn ScheduleStore,
    task_id: i64,
    current_user_id: i64,
) -> ServiceResult<TaskDetail> {
    let task = store
        .task_by_id(task_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Task not found".to_string()))?;

    let participant = store
        .participant_for_task(task_id, current_user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Participant not found".to_string()))?;

    let category = store
        .category_by_id(participant.category_id)
        .await?
        .ok_or(ServiceError::InvariantViolation(
            "participant references a missing category",
        ))?;

    let rows = store.alerts_for_participant(participant.id).await?;

    Ok(TaskDetail {
        task,
        category,
        alerts: alert::task_alerts_from_rows(&rows),
    })
}

/// ## Summary
/// Sets or clears a task's `scheduled_time`.
///
/// ## Errors
/// NotFound when the task is missing.
pub async fn schedule_task(
    store: &dyn ScheduleStore,
    task_id: i64,
    scheduled_time: Option<NaiveDateTime>,
) -> ServiceResult<()> {
    let mut task = store
        .task_by_id(task_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Task not found".to_string()))?;

    task.scheduled_time = scheduled_time;
    store.update_task(&task).await?;
    Ok(())
}

/// ## Summary
/// Toggles a task's completion state. Completing stamps `completed_at`
/// with the given date; un-completing clears it.
///
/// ## Errors
/// NotFound when the task is missing.
pub async fn toggle_task_complete(
    store: &dyn ScheduleStore,
    task_id: i64,
    complete_date: NaiveDate,
) -> ServiceResult<()> {
    let mut task = store
        .task_by_id(task_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Task not found".to_string()))?;

    if task.is_completed {
        task.completed_at = None;
        task.is_completed = false;
    } else {
        task.completed_at = Some(complete_date);
        task.is_completed = true;
    }
    store.update_task(&task).await?;
    Ok(())
}
