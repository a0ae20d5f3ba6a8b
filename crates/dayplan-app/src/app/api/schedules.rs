use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};
use serde::{Deserialize, Serialize};

use crate::db_handler::get_store_from_depot;
use crate::error::{AppError, AppResult};
use dayplan_core::types::ScheduleKind;
use dayplan_db::db::enums::Visibility;
use dayplan_db::model::category::Category;
use dayplan_service::calendar::{CalendarItem, calendar_items_in_range};
use dayplan_service::schedule::alert::{EventAlerts, TaskAlerts};
use dayplan_service::schedule::convert::change_schedule_type;
use dayplan_service::schedule::{event, task};
use dayplan_service::sync::{BatchRequest, MappingEntry, apply_batch};

/// ## Summary
/// Batch response: the accumulated temp-to-server id mapping.
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub message: String,
    pub data: Vec<MappingEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedResponse {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ScheduleKind,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub is_default: bool,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            color: category.color,
            is_default: category.is_default,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailResponse {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ScheduleKind,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub visibility: Visibility,
    pub category: CategoryResponse,
    pub alert: EventAlerts,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetailResponse {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ScheduleKind,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub scheduled_time: Option<NaiveDateTime>,
    pub is_completed: bool,
    pub completed_at: Option<NaiveDate>,
    pub visibility: Visibility,
    pub category: CategoryResponse,
    pub alert: TaskAlerts,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleDetailsRequest {
    pub event_ids: Vec<i64>,
    pub task_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct ScheduleDetailsResponse {
    pub events: Vec<EventDetailResponse>,
    pub tasks: Vec<TaskDetailResponse>,
}

/// ## Summary
/// POST /schedules/batch - Applies an ordered operation batch.
///
/// ## Errors
/// Returns HTTP 400 for malformed payloads, 404/403 from the first failing
/// operation. Operations applied before the failure stay committed.
#[handler]
async fn batch_handler(req: &mut Request, depot: &mut Depot) -> AppResult<Json<BatchResponse>> {
    let request: BatchRequest = req
        .parse_json()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?;

    let store = get_store_from_depot(depot)?;
    let user_id = crate::middleware::identity::current_user_id(depot)?;

    let data = apply_batch(store.as_ref(), &request, user_id).await?;

    Ok(Json(BatchResponse {
        message: "Batch applied".to_string(),
        data,
    }))
}

/// ## Summary
/// POST /`schedules/:schedule_id/type`?currentType= - Converts an event to
/// a task or vice versa. `currentType` names what the item is now.
///
/// ## Errors
/// Returns HTTP 400 when `currentType` is missing, 404 when the item or
/// participant is missing, 403 when the requester is not the owner.
#[handler]
async fn change_type_handler(
    req: &mut Request,
    depot: &mut Depot,
) -> AppResult<Json<ConvertedResponse>> {
    let schedule_id = req
        .param::<i64>("schedule_id")
        .ok_or_else(|| AppError::BadRequest("Schedule id required".to_string()))?;
    let current_kind = req
        .query::<ScheduleKind>("currentType")
        .ok_or_else(|| AppError::BadRequest("currentType query parameter required".to_string()))?;

    let store = get_store_from_depot(depot)?;
    let user_id = crate::middleware::identity::current_user_id(depot)?;

    let converted = change_schedule_type(store.as_ref(), schedule_id, current_kind, user_id).await?;

    Ok(Json(ConvertedResponse {
        id: converted.id,
        kind: converted.kind,
        name: converted.name,
        color: converted.color,
    }))
}

/// ## Summary
/// GET /schedules/range?startDate=&endDate= - The merged calendar view.
///
/// ## Errors
/// Returns HTTP 400 when either date is missing or malformed.
#[handler]
async fn range_handler(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Vec<CalendarItem>>> {
    let start_date = req
        .query::<NaiveDate>("startDate")
        .ok_or_else(|| AppError::BadRequest("startDate query parameter required".to_string()))?;
    let end_date = req
        .query::<NaiveDate>("endDate")
        .ok_or_else(|| AppError::BadRequest("endDate query parameter required".to_string()))?;

    let store = get_store_from_depot(depot)?;
    let user_id = crate::middleware::identity::current_user_id(depot)?;

    let items = calendar_items_in_range(store.as_ref(), start_date, end_date, user_id).await?;
    Ok(Json(items))
}

/// ## Summary
/// POST /schedules/details - Looks up a set of events and tasks, each
/// joined with the requesting user's category and alert offsets.
///
/// ## Errors
/// Returns HTTP 404 when any requested item or the user's participant on
/// it is missing.
#[handler]
async fn details_handler(
    req: &mut Request,
    depot: &mut Depot,
) -> AppResult<Json<ScheduleDetailsResponse>> {
    let request: ScheduleDetailsRequest = req
        .parse_json()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?;

    let store = get_store_from_depot(depot)?;
    let user_id = crate::middleware::identity::current_user_id(depot)?;

    let mut events = Vec::with_capacity(request.event_ids.len());
    for event_id in request.event_ids {
        let detail = event::event_detail(store.as_ref(), event_id, user_id).await?;
        events.push(EventDetailResponse {
            id: detail.event.id,
            kind: ScheduleKind::Event,
            name: detail.event.name,
            description: detail.event.description,
            location: detail.event.location,
            start_date: detail.event.start_date,
            end_date: detail.event.end_date,
            start_time: detail.event.start_time,
            end_time: detail.event.end_time,
            visibility: detail.event.visibility,
            category: detail.category.into(),
            alert: detail.alerts,
        });
    }

    let mut tasks = Vec::with_capacity(request.task_ids.len());
    for task_id in request.task_ids {
        let detail = task::task_detail(store.as_ref(), task_id, user_id).await?;
        tasks.push(TaskDetailResponse {
            id: detail.task.id,
            kind: ScheduleKind::Task,
            name: detail.task.name,
            description: detail.task.description,
            location: detail.task.location,
            start_time: detail.task.start_time,
            end_time: detail.task.end_time,
            scheduled_time: detail.task.scheduled_time,
            is_completed: detail.task.is_completed,
            completed_at: detail.task.completed_at,
            visibility: detail.task.visibility,
            category: detail.category.into(),
            alert: detail.alerts,
        });
    }

    Ok(Json(ScheduleDetailsResponse { events, tasks }))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("schedules")
        .push(Router::with_path("batch").post(batch_handler))
        .push(Router::with_path("range").get(range_handler))
        .push(Router::with_path("details").post(details_handler))
        .push(Router::with_path("<schedule_id>/type").post(change_type_handler))
}
