//! Event/Task conversion: fresh identity, repointed participant, alerts
//! dropped, category carried over.

mod support;

use chrono::NaiveDate;
use dayplan_core::types::ScheduleKind;
use dayplan_db::db::enums::{ParticipantRole, ParticipantStatus};
use dayplan_db::model::participant::NewParticipant;
use dayplan_db::store::ScheduleStore;
use dayplan_service::error::ServiceError;
use dayplan_service::schedule::convert::change_schedule_type;
use dayplan_service::schedule::event::{create_event, delete_event, event_detail};
use dayplan_service::schedule::task::{create_task, task_detail};
use dayplan_service::sync::payload::{EventPayload, TaskPayload};
use dayplan_service::user::create_user_with_defaults;
use serde_json::json;

use support::{MemoryStore, seed_user};

fn event_payload(category_id: i64) -> EventPayload {
    serde_json::from_value(json!({
        "name": "Standup",
        "startDate": "2026-09-03",
        "endDate": "2026-09-03",
        "startTime": "09:30:00",
        "categoryId": category_id,
        "alert": { "eventStart": 15 }
    }))
    .unwrap()
}

fn task_payload(category_id: i64) -> TaskPayload {
    serde_json::from_value(json!({
        "name": "Write minutes",
        "scheduledTime": "2026-09-03T14:00:00",
        "categoryId": category_id,
        "alert": { "taskSchedule": 5 }
    }))
    .unwrap()
}

#[test_log::test(tokio::test)]
async fn event_to_task_creates_a_fresh_row_and_drops_the_old_one() {
    let store = MemoryStore::new();
    let (user_id, category_id) = seed_user(&store, "noel").await;

    let event = create_event(&store, &event_payload(category_id), user_id)
        .await
        .unwrap();

    let converted = change_schedule_type(&store, event.id, ScheduleKind::Event, user_id)
        .await
        .unwrap();

    assert_eq!(converted.kind, ScheduleKind::Task);
    assert_ne!(converted.id, event.id);
    assert_eq!(converted.name, "Standup");
    assert_eq!(store.event_count(), 0);
    assert_eq!(store.task_count(), 1);

    // Start-time-only event maps to a scheduled task at that instant.
    let detail = task_detail(&store, converted.id, user_id).await.unwrap();
    assert_eq!(
        detail.task.scheduled_time,
        Some(
            NaiveDate::from_ymd_opt(2026, 9, 3)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap()
        )
    );
    assert_eq!(detail.category.id, category_id);
}

#[test_log::test(tokio::test)]
async fn conversion_drops_the_participants_alerts() {
    let store = MemoryStore::new();
    let (user_id, category_id) = seed_user(&store, "noel").await;

    let event = create_event(&store, &event_payload(category_id), user_id)
        .await
        .unwrap();
    assert_eq!(store.alert_count(), 1);

    let converted = change_schedule_type(&store, event.id, ScheduleKind::Event, user_id)
        .await
        .unwrap();

    assert_eq!(store.alert_count(), 0);
    let detail = task_detail(&store, converted.id, user_id).await.unwrap();
    assert_eq!(detail.alerts.task_schedule, None);
    assert_eq!(detail.alerts.task_start, None);
}

#[test_log::test(tokio::test)]
async fn task_to_event_uses_the_scheduled_time_as_a_timed_single_day() {
    let store = MemoryStore::new();
    let (user_id, category_id) = seed_user(&store, "noel").await;

    let task = create_task(&store, &task_payload(category_id), user_id)
        .await
        .unwrap();

    let converted = change_schedule_type(&store, task.id, ScheduleKind::Task, user_id)
        .await
        .unwrap();

    assert_eq!(converted.kind, ScheduleKind::Event);
    assert_eq!(store.task_count(), 0);
    assert_eq!(store.event_count(), 1);

    let detail = event_detail(&store, converted.id, user_id).await.unwrap();
    let day = NaiveDate::from_ymd_opt(2026, 9, 3).unwrap();
    assert_eq!(detail.event.start_date, day);
    assert_eq!(detail.event.end_date, day);
    assert_eq!(
        detail.event.start_time,
        day.and_hms_opt(14, 0, 0).map(|dt| dt.time())
    );
    assert_eq!(detail.category.id, category_id);
}

#[test_log::test(tokio::test)]
async fn round_trip_keeps_name_and_category_but_not_identity() {
    let store = MemoryStore::new();
    let (user_id, category_id) = seed_user(&store, "noel").await;

    let event = create_event(&store, &event_payload(category_id), user_id)
        .await
        .unwrap();

    let as_task = change_schedule_type(&store, event.id, ScheduleKind::Event, user_id)
        .await
        .unwrap();
    let back = change_schedule_type(&store, as_task.id, ScheduleKind::Task, user_id)
        .await
        .unwrap();

    assert_eq!(back.kind, ScheduleKind::Event);
    assert_ne!(back.id, event.id);
    assert_eq!(back.name, "Standup");

    let detail = event_detail(&store, back.id, user_id).await.unwrap();
    assert_eq!(detail.category.id, category_id);
}

#[test_log::test(tokio::test)]
async fn only_the_owner_may_convert() {
    let store = MemoryStore::new();
    let (owner_id, category_id) = seed_user(&store, "noel").await;
    let other = create_user_with_defaults(&store, "rival", "rival@example.com")
        .await
        .unwrap();

    let event = create_event(&store, &event_payload(category_id), owner_id)
        .await
        .unwrap();

    // The other user has no participant row at all.
    let err = change_schedule_type(&store, event.id, ScheduleKind::Event, other.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[test_log::test(tokio::test)]
async fn a_member_participant_may_neither_convert_nor_delete() {
    let store = MemoryStore::new();
    let (owner_id, category_id) = seed_user(&store, "noel").await;
    let (member_id, member_category_id) = seed_user(&store, "guest").await;

    let event = create_event(&store, &event_payload(category_id), owner_id)
        .await
        .unwrap();

    // The member has a participant row, but not the OWNER role.
    store
        .create_participant(NewParticipant {
            user_id: member_id,
            event_id: Some(event.id),
            task_id: None,
            category_id: member_category_id,
            role: ParticipantRole::Member,
            status: ParticipantStatus::Accepted,
        })
        .await
        .unwrap();

    let err = change_schedule_type(&store, event.id, ScheduleKind::Event, member_id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    let err = delete_event(&store, event.id, member_id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    // The event survives both rejected attempts.
    assert_eq!(store.event_count(), 1);
}

#[test_log::test(tokio::test)]
async fn converting_a_missing_schedule_is_not_found() {
    let store = MemoryStore::new();
    let (user_id, _) = seed_user(&store, "noel").await;

    let err = change_schedule_type(&store, 777, ScheduleKind::Task, user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}
