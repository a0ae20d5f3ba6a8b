//! Merged calendar view over a date range.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use dayplan_core::types::ScheduleKind;
use dayplan_db::model::task::Task;
use dayplan_db::store::ScheduleStore;
use serde::Serialize;

use crate::error::ServiceResult;

const FALLBACK_COLOR: &str = "#CCCCCC";

/// One entry of the merged range view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarItem {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ScheduleKind,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub color: String,
    pub is_completed: bool,
    pub is_scheduled: bool,
}

/// ## Summary
/// Returns the user's events and tasks touching the given date range:
/// events by date overlap, uncompleted tasks by effective timestamp
/// overlap, completed tasks by completion date.
#[tracing::instrument(skip(store))]
pub async fn calendar_items_in_range(
    store: &dyn ScheduleStore,
    start_date: NaiveDate,
    end_date: NaiveDate,
    current_user_id: i64,
) -> ServiceResult<Vec<CalendarItem>> {
    let mut items = Vec::new();

    for event in store
        .events_overlapping(current_user_id, start_date, end_date)
        .await?
    {
        let color = event_color(store, event.id, current_user_id).await?;
        items.push(CalendarItem {
            id: event.id,
            kind: ScheduleKind::Event,
            name: event.name,
            start_date: Some(event.start_date),
            end_date: Some(event.end_date),
            start_time: event.start_time,
            end_time: event.end_time,
            color,
            is_completed: false,
            is_scheduled: event.start_time.is_some() || event.end_time.is_some(),
        });
    }

    for task in store.uncompleted_tasks_for_user(current_user_id).await? {
        if !task_overlaps_range(&task, start_date, end_date) {
            continue;
        }
        let color = task_color(store, task.id, current_user_id).await?;
        items.push(CalendarItem {
            id: task.id,
            kind: ScheduleKind::Task,
            name: task.name.clone(),
            start_date: task.start_time.map(|t| t.date()),
            end_date: task.end_time.map(|t| t.date()),
            start_time: task.start_time.map(|t| t.time()),
            end_time: task.end_time.map(|t| t.time()),
            color,
            is_completed: false,
            is_scheduled: task.scheduled_time.is_some(),
        });
    }

    for task in store
        .completed_tasks_in_range(current_user_id, start_date, end_date)
        .await?
    {
        let color = task_color(store, task.id, current_user_id).await?;
        items.push(CalendarItem {
            id: task.id,
            kind: ScheduleKind::Task,
            name: task.name.clone(),
            start_date: task.completed_at,
            end_date: task.completed_at,
            start_time: None,
            end_time: None,
            color,
            is_completed: true,
            is_scheduled: false,
        });
    }

    Ok(items)
}

/// A task without an explicit start falls back to its creation instant,
/// clamped to its end when creation postdates it; a task without an end
/// is open-ended.
fn task_overlaps_range(task: &Task, start_date: NaiveDate, end_date: NaiveDate) -> bool {
    let created: NaiveDateTime = task.created_at.naive_utc();
    let effective_start = task.start_time.unwrap_or(match task.end_time {
        Some(end) if created > end => end,
        _ => created,
    });

    effective_start.date() <= end_date
        && task.end_time.is_none_or(|end| end.date() >= start_date)
}

async fn event_color(
    store: &dyn ScheduleStore,
    event_id: i64,
    user_id: i64,
) -> ServiceResult<String> {
    let Some(participant) = store.participant_for_event(event_id, user_id).await? else {
        return Ok(FALLBACK_COLOR.to_string());
    };
    Ok(store
        .category_by_id(participant.category_id)
        .await?
        .map_or_else(|| FALLBACK_COLOR.to_string(), |c| c.color))
}

async fn task_color(store: &dyn ScheduleStore, task_id: i64, user_id: i64) -> ServiceResult<String> {
    let Some(participant) = store.participant_for_task(task_id, user_id).await? else {
        return Ok(FALLBACK_COLOR.to_string());
    };
    Ok(store
        .category_by_id(participant.category_id)
        .await?
        .map_or_else(|| FALLBACK_COLOR.to_string(), |c| c.color))
}
