//! Category management.
//!
//! Every user has exactly one default category, seeded at signup. The
//! default can never be deleted; deleting any other category first moves
//! its participants onto the default so no participant is ever left
//! without a category.

use dayplan_db::model::category::{Category, NewCategory};
use dayplan_db::store::ScheduleStore;

use crate::error::{ServiceError, ServiceResult};
use crate::sync::payload::CategoryPayload;

/// ## Summary
/// Lists the user's categories, default first, then by id.
pub async fn my_categories(
    store: &dyn ScheduleStore,
    current_user_id: i64,
) -> ServiceResult<Vec<Category>> {
    let mut categories = store.categories_for_user(current_user_id).await?;
    categories.sort_by_key(|c| (!c.is_default, c.id));
    Ok(categories)
}

/// ## Summary
/// Creates a non-default category for the user.
#[tracing::instrument(skip(store, payload), fields(name = %payload.name))]
pub async fn create_category(
    store: &dyn ScheduleStore,
    payload: &CategoryPayload,
    current_user_id: i64,
) -> ServiceResult<Category> {
    let category = store
        .create_category(NewCategory {
            user_id: current_user_id,
            name: payload.name.clone(),
            color: payload.color.clone(),
            is_default: false,
        })
        .await?;
    Ok(category)
}

/// ## Summary
/// Renames or recolors one of the user's categories.
///
/// ## Errors
/// NotFound when the category is missing once scoped to the user.
#[tracing::instrument(skip(store, payload))]
pub async fn update_category(
    store: &dyn ScheduleStore,
    category_id: i64,
    payload: &CategoryPayload,
    current_user_id: i64,
) -> ServiceResult<Category> {
    let mut category = store
        .category_by_id_for_user(category_id, current_user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Category not found".to_string()))?;

    category.name = payload.name.clone();
    category.color = payload.color.clone();
    let updated = store.update_category(&category).await?;
    Ok(updated)
}

/// ## Summary
/// Deletes a non-default category, reassigning its participants to the
/// user's default category first.
///
/// ## Errors
/// NotFound when the category is missing once scoped to the user; a
/// validation error when it is the default; an invariant violation when
/// the user somehow has no default category.
#[tracing::instrument(skip(store))]
pub async fn delete_category(
    store: &dyn ScheduleStore,
    category_id: i64,
    current_user_id: i64,
) -> ServiceResult<()> {
    let category = store
        .category_by_id_for_user(category_id, current_user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Category not found".to_string()))?;

    if category.is_default {
        return Err(ServiceError::ValidationError(
            "the default category cannot be deleted".to_string(),
        ));
    }

    let default_category = store
        .default_category_for_user(current_user_id)
        .await?
        .ok_or(ServiceError::InvariantViolation(
            "user has no default category",
        ))?;

    let participants = store.participants_in_category(category.id).await?;
    for mut participant in participants {
        participant.category_id = default_category.id;
        store.update_participant(&participant).await?;
    }

    store.delete_category(category.id).await?;
    Ok(())
}
