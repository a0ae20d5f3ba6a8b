//! Routine create/update/delete and listing.

use dayplan_core::days::parse_days_of_week;
use dayplan_db::model::routine::{NewRoutine, Routine};
use dayplan_db::store::ScheduleStore;

use crate::error::{ServiceError, ServiceResult};
use crate::schedule::alert::{self, RoutineAlerts};
use crate::sync::payload::RoutinePayload;

fn check_days_of_week(days: &str) -> ServiceResult<()> {
    parse_days_of_week(days)
        .map(|_| ())
        .map_err(|e| ServiceError::ValidationError(e.to_string()))
}

/// A routine with its alert offsets.
#[derive(Debug, Clone)]
pub struct RoutineDetail {
    pub routine: Routine,
    pub alerts: RoutineAlerts,
}

/// ## Summary
/// Creates a routine for the user, with requested alerts.
#[tracing::instrument(skip(store, payload), fields(name = %payload.name))]
pub async fn create_routine(
    store: &dyn ScheduleStore,
    payload: &RoutinePayload,
    current_user_id: i64,
) -> ServiceResult<Routine> {
    check_days_of_week(&payload.days_of_week)?;

    let routine = store
        .create_routine(NewRoutine {
            user_id: current_user_id,
            name: payload.name.clone(),
            days_of_week: payload.days_of_week.clone(),
            start_time: payload.start_time,
            end_time: payload.end_time,
            icon: payload.icon.clone(),
            color: payload.color.clone(),
        })
        .await?;

    alert::replace_for_routine(store, routine.id, payload.alert.as_ref()).await?;

    Ok(routine)
}

/// ## Summary
/// Rewrites a routine's fields and full-replaces its alerts.
///
/// ## Errors
/// NotFound when the routine is missing, Forbidden when it belongs to
/// another user.
#[tracing::instrument(skip(store, payload))]
pub async fn update_routine(
    store: &dyn ScheduleStore,
    routine_id: i64,
    payload: &RoutinePayload,
    current_user_id: i64,
) -> ServiceResult<()> {
    check_days_of_week(&payload.days_of_week)?;

    let mut routine = store
        .routine_by_id(routine_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Routine not found".to_string()))?;

    if routine.user_id != current_user_id {
        return Err(ServiceError::Forbidden(
            "User is not the owner of the routine".to_string(),
        ));
    }

    routine.name = payload.name.clone();
    routine.days_of_week = payload.days_of_week.clone();
    routine.start_time = payload.start_time;
    routine.end_time = payload.end_time;
    routine.icon = payload.icon.clone();
    routine.color = payload.color.clone();
    store.update_routine(&routine).await?;

    alert::replace_for_routine(store, routine.id, payload.alert.as_ref()).await?;

    Ok(())
}

/// ## Summary
/// Deletes a routine and its alerts.
///
/// ## Errors
/// NotFound when the routine is missing, Forbidden when it belongs to
/// another user.
#[tracing::instrument(skip(store))]
pub async fn delete_routine(
    store: &dyn ScheduleStore,
    routine_id: i64,
    current_user_id: i64,
) -> ServiceResult<()> {
    let routine = store
        .routine_by_id(routine_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Routine not found".to_string()))?;

    if routine.user_id != current_user_id {
        return Err(ServiceError::Forbidden(
            "User is not the owner of the routine".to_string(),
        ));
    }

    store.delete_routine(routine.id).await?;
    Ok(())
}

/// ## Summary
/// Lists the user's routines with their alert offsets.
pub async fn my_routines(
    store: &dyn ScheduleStore,
    current_user_id: i64,
) -> ServiceResult<Vec<RoutineDetail>> {
    let routines = store.routines_for_user(current_user_id).await?;

    let mut details = Vec::with_capacity(routines.len());
    for routine in routines {
        let rows = store.alerts_for_routine(routine.id).await?;
        details.push(RoutineDetail {
            alerts: alert::routine_alerts_from_rows(&rows),
            routine,
        });
    }
    Ok(details)
}
