//! Schedule type conversion (Event ↔ Task).
//!
//! Conversion always destroys the source row and creates a replacement
//! with a fresh identity; the old id is never reused. The OWNER
//! participant is repointed to the new row with its category untouched,
//! and every alert attached to the participant is dropped without being
//! recreated. Clients re-add reminders after converting.

use chrono::Local;
use dayplan_core::convert::{event_to_task_times, task_to_event_times};
use dayplan_core::types::ScheduleKind;
use dayplan_db::model::event::NewEvent;
use dayplan_db::model::participant::Participant;
use dayplan_db::model::task::NewTask;
use dayplan_db::store::ScheduleStore;

use crate::error::{ServiceError, ServiceResult};

/// Identity of the row a conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedSchedule {
    pub id: i64,
    pub kind: ScheduleKind,
    pub name: String,
    pub color: String,
}

/// ## Summary
/// Converts a schedule item to the other representation. `current_kind`
/// names the representation the item holds now.
///
/// ## Errors
/// NotFound when the item or the user's participant is missing; Forbidden
/// when the requesting user is not the OWNER.
#[tracing::instrument(skip(store))]
pub async fn change_schedule_type(
    store: &dyn ScheduleStore,
    schedule_id: i64,
    current_kind: ScheduleKind,
    current_user_id: i64,
) -> ServiceResult<ConvertedSchedule> {
    match current_kind {
        ScheduleKind::Event => event_to_task(store, schedule_id, current_user_id).await,
        ScheduleKind::Task => task_to_event(store, schedule_id, current_user_id).await,
    }
}

async fn event_to_task(
    store: &dyn ScheduleStore,
    event_id: i64,
    current_user_id: i64,
) -> ServiceResult<ConvertedSchedule> {
    let event = store
        .event_by_id(event_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Schedule not found".to_string()))?;

    let mut participant = owned_participant(
        store
            .participant_for_event(event.id, current_user_id)
            .await?,
    )?;

    let times = event_to_task_times(
        event.start_date,
        event.end_date,
        event.start_time,
        event.end_time,
    );

    let task = store
        .create_task(NewTask {
            name: event.name.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            start_time: times.start_time,
            end_time: times.end_time,
            scheduled_time: times.scheduled_time,
            is_completed: false,
            source_text: event.source_text.clone(),
            visibility: event.visibility,
        })
        .await?;

    // Repoint before deleting the event so the cascade cannot touch the
    // participant. Category stays as it was.
    participant.event_id = None;
    participant.task_id = Some(task.id);
    store.update_participant(&participant).await?;

    store.delete_alerts_for_participant(participant.id).await?;
    store.delete_event(event.id).await?;

    Ok(ConvertedSchedule {
        id: task.id,
        kind: ScheduleKind::Task,
        name: task.name,
        color: category_color(store, &participant).await?,
    })
}

async fn task_to_event(
    store: &dyn ScheduleStore,
    task_id: i64,
    current_user_id: i64,
) -> ServiceResult<ConvertedSchedule> {
    let task = store
        .task_by_id(task_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Schedule not found".to_string()))?;

    let mut participant =
        owned_participant(store.participant_for_task(task.id, current_user_id).await?)?;

    let times = task_to_event_times(
        task.scheduled_time,
        task.start_time,
        task.end_time,
        Local::now().date_naive(),
    );

    let event = store
        .create_event(NewEvent {
            name: task.name.clone(),
            description: task.description.clone(),
            location: task.location.clone(),
            start_date: times.start_date,
            end_date: times.end_date,
            start_time: times.start_time,
            end_time: times.end_time,
            source_text: task.source_text.clone(),
            visibility: task.visibility,
        })
        .await?;

    participant.task_id = None;
    participant.event_id = Some(event.id);
    store.update_participant(&participant).await?;

    store.delete_alerts_for_participant(participant.id).await?;
    store.delete_task(task.id).await?;

    Ok(ConvertedSchedule {
        id: event.id,
        kind: ScheduleKind::Event,
        name: event.name,
        color: category_color(store, &participant).await?,
    })
}

fn owned_participant(participant: Option<Participant>) -> ServiceResult<Participant> {
    let participant =
        participant.ok_or_else(|| ServiceError::NotFound("Participant not found".to_string()))?;
    if !participant.is_owner() {
        return Err(ServiceError::Forbidden(
            "User is not the owner of the schedule".to_string(),
        ));
    }
    Ok(participant)
}

async fn category_color(
    store: &dyn ScheduleStore,
    participant: &Participant,
) -> ServiceResult<String> {
    let category = store
        .category_by_id(participant.category_id)
        .await?
        .ok_or(ServiceError::InvariantViolation(
            "participant references a missing category",
        ))?;
    Ok(category.color)
}
