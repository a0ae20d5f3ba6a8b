//! Routine lifecycle through the batch surface.

mod support;

use dayplan_service::error::ServiceError;
use dayplan_service::schedule::routine::{delete_routine, my_routines};
use dayplan_service::sync::{BatchRequest, apply_batch};
use serde_json::json;

use support::{MemoryStore, seed_user};

fn batch(operations: serde_json::Value) -> BatchRequest {
    serde_json::from_value(json!({ "operations": operations })).unwrap()
}

fn create_op(days_of_week: &str, alert: serde_json::Value) -> serde_json::Value {
    json!({
        "tableName": "routines",
        "rowId": -1,
        "operation": "create",
        "payload": {
            "name": "Morning run",
            "daysOfWeek": days_of_week,
            "startTime": "06:30:00",
            "endTime": "07:00:00",
            "icon": "shoe",
            "color": "#00AA55",
            "alert": alert
        }
    })
}

#[test_log::test(tokio::test)]
async fn created_routine_lists_with_its_alert_offsets() {
    let store = MemoryStore::new();
    let (user_id, _) = seed_user(&store, "pat").await;

    let request = batch(json!([create_op("1,2,3,4,5", json!({ "routineStart": 10 }))]));
    apply_batch(&store, &request, user_id).await.unwrap();

    let routines = my_routines(&store, user_id).await.unwrap();
    assert_eq!(routines.len(), 1);
    assert_eq!(routines[0].routine.days_of_week, "1,2,3,4,5");
    assert_eq!(routines[0].alerts.routine_start, Some(10));
    assert_eq!(routines[0].alerts.routine_end, None);
}

#[test_log::test(tokio::test)]
async fn update_replaces_the_alert_set_wholesale() {
    let store = MemoryStore::new();
    let (user_id, _) = seed_user(&store, "pat").await;

    let request = batch(json!([
        create_op("0,6", json!({ "routineStart": 10, "routineEnd": 5 })),
        {
            "tableName": "routines",
            "rowId": -1,
            "operation": "update",
            "payload": {
                "name": "Morning run",
                "daysOfWeek": "0,6",
                "startTime": "06:30:00",
                "endTime": "07:00:00",
                "icon": "shoe",
                "color": "#00AA55",
                "alert": { "routineEnd": 15 }
            }
        }
    ]));
    apply_batch(&store, &request, user_id).await.unwrap();

    let routines = my_routines(&store, user_id).await.unwrap();
    assert_eq!(routines[0].alerts.routine_start, None);
    assert_eq!(routines[0].alerts.routine_end, Some(15));
    assert_eq!(store.alert_count(), 1);
}

#[test_log::test(tokio::test)]
async fn malformed_days_of_week_is_a_validation_error() {
    let store = MemoryStore::new();
    let (user_id, _) = seed_user(&store, "pat").await;

    let request = batch(json!([create_op("1,2,9", json!({}))]));
    let err = apply_batch(&store, &request, user_id).await.unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));

    assert!(my_routines(&store, user_id).await.unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn only_the_owner_may_delete_a_routine() {
    let store = MemoryStore::new();
    let (owner_id, _) = seed_user(&store, "pat").await;
    let (other_id, _) = seed_user(&store, "kim").await;

    let request = batch(json!([create_op("3", json!({ "routineStart": 5 }))]));
    let mappings = apply_batch(&store, &request, owner_id).await.unwrap();
    let routine_id = mappings[0].server_id;

    let err = delete_routine(&store, routine_id, other_id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    // Deleting as the owner also drops the routine's alerts.
    delete_routine(&store, routine_id, owner_id).await.unwrap();
    assert_eq!(store.alert_count(), 0);
}
