use salvo::writing::Json;
use salvo::{Depot, Router, handler};

use crate::app::api::schedules::CategoryResponse;
use crate::db_handler::get_store_from_depot;
use crate::error::AppResult;
use dayplan_service::schedule::category::my_categories;

/// ## Summary
/// GET /categories - The user's categories, default first.
#[handler]
async fn list_handler(depot: &mut Depot) -> AppResult<Json<Vec<CategoryResponse>>> {
    let store = get_store_from_depot(depot)?;
    let user_id = crate::middleware::identity::current_user_id(depot)?;

    let categories = my_categories(store.as_ref(), user_id).await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("categories").get(list_handler)
}
