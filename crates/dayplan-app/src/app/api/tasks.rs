use chrono::{NaiveDate, NaiveDateTime};
use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};
use serde::{Deserialize, Serialize};

use crate::db_handler::get_store_from_depot;
use crate::error::{AppError, AppResult};
use dayplan_service::error::ServiceError;
use dayplan_service::schedule::task::{schedule_task, toggle_task_complete};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTaskRequest {
    /// `null` clears the scheduled time.
    pub scheduled_time: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTaskRequest {
    pub complete_date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Tasks are only reachable through the requesting user's participant row.
async fn require_own_task(
    store: &dyn dayplan_db::store::ScheduleStore,
    task_id: i64,
    user_id: i64,
) -> AppResult<()> {
    store
        .participant_for_task(task_id, user_id)
        .await
        .map_err(ServiceError::from)?
        .ok_or_else(|| ServiceError::NotFound("Task not found".to_string()))?;
    Ok(())
}

/// ## Summary
/// PATCH /`tasks/:task_id/schedule` - Sets or clears a task's scheduled time.
///
/// ## Errors
/// Returns HTTP 404 when the task is not one of the user's.
#[handler]
async fn schedule_handler(
    req: &mut Request,
    depot: &mut Depot,
) -> AppResult<Json<MessageResponse>> {
    let task_id = req
        .param::<i64>("task_id")
        .ok_or_else(|| AppError::BadRequest("Task id required".to_string()))?;
    let body: ScheduleTaskRequest = req
        .parse_json()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?;

    let store = get_store_from_depot(depot)?;
    let user_id = crate::middleware::identity::current_user_id(depot)?;

    require_own_task(store.as_ref(), task_id, user_id).await?;
    schedule_task(store.as_ref(), task_id, body.scheduled_time).await?;

    Ok(Json(MessageResponse {
        message: "Task schedule updated".to_string(),
    }))
}

/// ## Summary
/// PATCH /`tasks/:task_id/complete` - Toggles completion. Completing stamps
/// the given date; toggling again clears it.
///
/// ## Errors
/// Returns HTTP 404 when the task is not one of the user's.
#[handler]
async fn complete_handler(
    req: &mut Request,
    depot: &mut Depot,
) -> AppResult<Json<MessageResponse>> {
    let task_id = req
        .param::<i64>("task_id")
        .ok_or_else(|| AppError::BadRequest("Task id required".to_string()))?;
    let body: CompleteTaskRequest = req
        .parse_json()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?;

    let store = get_store_from_depot(depot)?;
    let user_id = crate::middleware::identity::current_user_id(depot)?;

    require_own_task(store.as_ref(), task_id, user_id).await?;
    toggle_task_complete(store.as_ref(), task_id, body.complete_date).await?;

    Ok(Json(MessageResponse {
        message: "Task completion toggled".to_string(),
    }))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("tasks")
        .push(Router::with_path("<task_id>/schedule").patch(schedule_handler))
        .push(Router::with_path("<task_id>/complete").patch(complete_handler))
}
