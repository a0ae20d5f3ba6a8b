use chrono::NaiveTime;
use salvo::writing::Json;
use salvo::{Depot, Router, handler};
use serde::Serialize;

use crate::db_handler::get_store_from_depot;
use crate::error::AppResult;
use dayplan_service::schedule::alert::RoutineAlerts;
use dayplan_service::schedule::routine::my_routines;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineResponse {
    pub id: i64,
    pub name: String,
    pub days_of_week: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub icon: String,
    pub color: String,
    pub alert: RoutineAlerts,
}

/// ## Summary
/// GET /routines - The user's routines with their alert offsets.
#[handler]
async fn list_handler(depot: &mut Depot) -> AppResult<Json<Vec<RoutineResponse>>> {
    let store = get_store_from_depot(depot)?;
    let user_id = crate::middleware::identity::current_user_id(depot)?;

    let routines = my_routines(store.as_ref(), user_id).await?;
    Ok(Json(
        routines
            .into_iter()
            .map(|detail| RoutineResponse {
                id: detail.routine.id,
                name: detail.routine.name,
                days_of_week: detail.routine.days_of_week,
                start_time: detail.routine.start_time,
                end_time: detail.routine.end_time,
                icon: detail.routine.icon,
                color: detail.routine.color,
                alert: detail.alerts,
            })
            .collect(),
    ))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("routines").get(list_handler)
}
