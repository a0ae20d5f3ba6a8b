//! Event create/update/delete and detail lookup.

use dayplan_db::db::enums::{ParticipantRole, ParticipantStatus, Visibility};
use dayplan_db::model::category::Category;
use dayplan_db::model::event::{Event, NewEvent};
use dayplan_db::model::participant::NewParticipant;
use dayplan_db::store::ScheduleStore;

use crate::error::{ServiceError, ServiceResult};
use crate::schedule::alert::{self, EventAlerts};
use crate::sync::payload::EventPayload;

/// An event joined with the requesting user's category and alert offsets.
#[derive(Debug, Clone)]
pub struct EventDetail {
    pub event: Event,
    pub category: Category,
    pub alerts: EventAlerts,
}

/// ## Summary
/// Creates an event plus its OWNER participant and requested alerts.
///
/// ## Errors
/// Returns a validation error when the category id does not resolve to a
/// category owned by `current_user_id`.
#[tracing::instrument(skip(store, payload), fields(name = %payload.name))]
pub async fn create_event(
    store: &dyn ScheduleStore,
    payload: &EventPayload,
    current_user_id: i64,
) -> ServiceResult<Event> {
    let category = resolve_category(store, payload.category_id, current_user_id).await?;

    let event = store
        .create_event(NewEvent {
            name: payload.name.clone(),
            description: payload.description.clone(),
            location: payload.location.clone(),
            start_date: payload.start_date,
            end_date: payload.end_date,
            start_time: payload.start_time,
            end_time: payload.end_time,
            source_text: payload.source_text.clone(),
            visibility: payload.visibility.unwrap_or(Visibility::Private),
        })
        .await?;

    let participant = store
        .create_participant(NewParticipant {
            user_id: current_user_id,
            event_id: Some(event.id),
            task_id: None,
            category_id: category.id,
            role: ParticipantRole::Owner,
            status: ParticipantStatus::Accepted,
        })
        .await?;

    alert::replace_for_event_participant(store, participant.id, payload.alert.as_ref()).await?;

    Ok(event)
}

/// ## Summary
/// Rewrites an event's fields, repoints the requesting user's participant
/// to the payload's category, and full-replaces its alerts.
///
/// ## Errors
/// NotFound when the event or the user's participant is missing; a
/// validation error when the category is not owned by the user.
#[tracing::instrument(skip(store, payload))]
pub async fn edit_event(
    store: &dyn ScheduleStore,
    event_id: i64,
    payload: &EventPayload,
    current_user_id: i64,
) -> ServiceResult<()> {
    let mut event = store
        .event_by_id(event_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Event not found".to_string()))?;

    event.name = payload.name.clone();
    event.description = payload.description.clone();
    event.location = payload.location.clone();
    event.start_date = payload.start_date;
    event.end_date = payload.end_date;
    event.start_time = payload.start_time;
    event.end_time = payload.end_time;
    if let Some(visibility) = payload.visibility {
        event.visibility = visibility;
    }
    store.update_event(&event).await?;

    let mut participant = store
        .participant_for_event(event_id, current_user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Participant not found".to_string()))?;

    let category = resolve_category(store, payload.category_id, current_user_id).await?;
    participant.category_id = category.id;
    store.update_participant(&participant).await?;

    alert::replace_for_event_participant(store, participant.id, payload.alert.as_ref()).await?;

    Ok(())
}

/// ## Summary
/// Deletes an event; only its OWNER participant may do so. Participants
/// and their alerts go with it.
///
/// ## Errors
/// NotFound when the event is missing, Forbidden when the requesting user
/// is not the OWNER.
#[tracing::instrument(skip(store))]
pub async fn delete_event(
    store: &dyn ScheduleStore,
    event_id: i64,
    current_user_id: i64,
) -> ServiceResult<()> {
    let event = store
        .event_by_id(event_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Event not found".to_string()))?;

    let participants = store.participants_of_event(event.id).await?;
    let is_owner = participants
        .iter()
        .any(|p| p.user_id == current_user_id && p.is_owner());
    if !is_owner {
        return Err(ServiceError::Forbidden(
            "User is not the owner of the event".to_string(),
        ));
    }

    store.delete_event(event.id).await?;
    Ok(())
}

/// ## Summary
/// Loads an event with the requesting user's category and alert offsets.
///
/// ## Errors
/// NotFound when the event or the user's participant is missing.
pub async fn event_detail(
    store: &dyn ScheduleStore,
    event_id: i64,
    current_user_id: i64,
) -> ServiceResult<EventDetail> {
    let event = store
        .event_by_id(event_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Event not found".to_string()))?;

    let participant = store
        .participant_for_event(event_id, current_user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Participant not found".to_string()))?;

    let category = store
        .category_by_id(participant.category_id)
        .await?
        .ok_or(ServiceError::InvariantViolation(
            "participant references a missing category",
        ))?;

    let rows = store.alerts_for_participant(participant.id).await?;

    Ok(EventDetail {
        event,
        category,
        alerts: alert::event_alerts_from_rows(&rows),
    })
}

pub(crate) async fn resolve_category(
    store: &dyn ScheduleStore,
    category_id: i64,
    current_user_id: i64,
) -> ServiceResult<Category> {
    store
        .category_by_id_for_user(category_id, current_user_id)
        .await?
        .ok_or_else(|| {
            ServiceError::ValidationError(format!(
                "category {category_id} does not resolve to a category owned by the user"
            ))
        })
}
