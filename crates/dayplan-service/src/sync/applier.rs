//! Ordered application of one reconciliation batch.

use dayplan_core::types::TableName;
use dayplan_db::store::ScheduleStore;

use crate::error::ServiceResult;
use crate::schedule::{category, event, routine, task};
use crate::sync::payload::{self, BatchRequest, DecodedOperation};
use crate::sync::resolver::{IdMap, MappingEntry};

/// ## Summary
/// Applies a batch of client-originated operations strictly in array
/// order and returns the accumulated temp-to-server id mapping.
///
/// Each operation is fully applied, including its resolver side effects,
/// before the next begins. Every payload is decoded and validated before
/// the first side effect.
///
/// ## Errors
/// The first failing operation aborts the batch; operations already
/// applied stay committed. There is no batch-wide transaction and no
/// rollback.
#[tracing::instrument(skip(store, request), fields(operations = request.operations.len()))]
pub async fn apply_batch(
    store: &dyn ScheduleStore,
    request: &BatchRequest,
    current_user_id: i64,
) -> ServiceResult<Vec<MappingEntry>> {
    let decoded = payload::decode_operations(&request.operations)?;

    let mut map = IdMap::new();
    for operation in decoded {
        apply_operation(store, &mut map, operation, current_user_id).await?;
    }

    Ok(map.into_entries())
}

async fn apply_operation(
    store: &dyn ScheduleStore,
    map: &mut IdMap,
    operation: DecodedOperation,
    current_user_id: i64,
) -> ServiceResult<()> {
    match operation {
        DecodedOperation::EventCreate {
            temp_id,
            mut payload,
        } => {
            payload.category_id = map.resolve(TableName::Categories, payload.category_id);
            let created = event::create_event(store, &payload, current_user_id).await?;
            map.record(TableName::Events, temp_id, created.id);
        }
        DecodedOperation::EventUpdate {
            row_id,
            mut payload,
        } => {
            let event_id = map.resolve(TableName::Events, row_id);
            payload.category_id = map.resolve(TableName::Categories, payload.category_id);
            event::edit_event(store, event_id, &payload, current_user_id).await?;
        }
        DecodedOperation::EventDelete { row_id } => {
            let event_id = map.resolve(TableName::Events, row_id);
            event::delete_event(store, event_id, current_user_id).await?;
            map.forget(TableName::Events, event_id);
        }
        DecodedOperation::TaskCreate {
            temp_id,
            mut payload,
        } => {
            payload.category_id = map.resolve(TableName::Categories, payload.category_id);
            let created = task::create_task(store, &payload, current_user_id).await?;
            map.record(TableName::Tasks, temp_id, created.id);
        }
        DecodedOperation::TaskUpdate {
            row_id,
            mut payload,
        } => {
            let task_id = map.resolve(TableName::Tasks, row_id);
            payload.category_id = map.resolve(TableName::Categories, payload.category_id);
            task::edit_task(store, task_id, &payload, current_user_id).await?;
        }
        DecodedOperation::TaskDelete { row_id } => {
            let task_id = map.resolve(TableName::Tasks, row_id);
            task::delete_task(store, task_id, current_user_id).await?;
            map.forget(TableName::Tasks, task_id);
        }
        DecodedOperation::RoutineCreate { temp_id, payload } => {
            let created = routine::create_routine(store, &payload, current_user_id).await?;
            map.record(TableName::Routines, temp_id, created.id);
        }
        DecodedOperation::RoutineUpdate { row_id, payload } => {
            let routine_id = map.resolve(TableName::Routines, row_id);
            routine::update_routine(store, routine_id, &payload, current_user_id).await?;
        }
        DecodedOperation::RoutineDelete { row_id } => {
            let routine_id = map.resolve(TableName::Routines, row_id);
            routine::delete_routine(store, routine_id, current_user_id).await?;
            map.forget(TableName::Routines, routine_id);
        }
        DecodedOperation::CategoryCreate { temp_id, payload } => {
            let created = category::create_category(store, &payload, current_user_id).await?;
            map.record(TableName::Categories, temp_id, created.id);
        }
        DecodedOperation::CategoryUpdate { row_id, payload } => {
            let category_id = map.resolve(TableName::Categories, row_id);
            category::update_category(store, category_id, &payload, current_user_id).await?;
        }
        DecodedOperation::CategoryDelete { row_id } => {
            let category_id = map.resolve(TableName::Categories, row_id);
            category::delete_category(store, category_id, current_user_id).await?;
            map.forget(TableName::Categories, category_id);
        }
    }
    Ok(())
}
