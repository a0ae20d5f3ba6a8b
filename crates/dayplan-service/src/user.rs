//! User signup seed.
//!
//! Signup is the only path that creates a default category; category
//! deletion relies on exactly one existing per user.

use dayplan_db::model::category::NewCategory;
use dayplan_db::model::user::{NewUser, User};
use dayplan_db::store::ScheduleStore;

use crate::error::ServiceResult;

const SEED_CATEGORIES: [(&str, &str, bool); 3] = [
    ("Hobby", "#0090FF", false),
    ("Plans", "#32CC59", false),
    ("My schedule", "#FF4040", true),
];

/// ## Summary
/// Creates a user and seeds their category set, one of which is the
/// default.
#[tracing::instrument(skip(store, email))]
pub async fn create_user_with_defaults(
    store: &dyn ScheduleStore,
    name: &str,
    email: &str,
) -> ServiceResult<User> {
    let user = store
        .create_user(NewUser {
            name: name.to_string(),
            email: email.to_string(),
        })
        .await?;

    for (category_name, color, is_default) in SEED_CATEGORIES {
        store
            .create_category(NewCategory {
                user_id: user.id,
                name: category_name.to_string(),
                color: color.to_string(),
                is_default,
            })
            .await?;
    }

    Ok(user)
}
