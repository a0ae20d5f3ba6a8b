//! Category lifecycle: the seeded default, scoping, and delete-time
//! reassignment of participants.

mod support;

use dayplan_service::error::ServiceError;
use dayplan_service::schedule::category::{
    create_category, delete_category, my_categories, update_category,
};
use dayplan_service::schedule::task::{create_task, task_detail};
use dayplan_service::sync::payload::{CategoryPayload, TaskPayload};
use dayplan_service::user::create_user_with_defaults;
use serde_json::json;

use support::{MemoryStore, seed_user};

fn category_payload(name: &str) -> CategoryPayload {
    serde_json::from_value(json!({ "name": name, "color": "#ABCDEF" })).unwrap()
}

fn task_payload(category_id: i64) -> TaskPayload {
    serde_json::from_value(json!({ "name": "Filed task", "categoryId": category_id })).unwrap()
}

#[test_log::test(tokio::test)]
async fn signup_seeds_categories_with_exactly_one_default() {
    let store = MemoryStore::new();
    let (user_id, default_id) = seed_user(&store, "kei").await;

    let categories = my_categories(&store, user_id).await.unwrap();
    assert_eq!(categories.len(), 3);
    assert_eq!(
        categories.iter().filter(|c| c.is_default).count(),
        1
    );
    // Default first, then by id.
    assert_eq!(categories[0].id, default_id);
}

#[test_log::test(tokio::test)]
async fn listing_is_scoped_to_the_user() {
    let store = MemoryStore::new();
    let (user_id, _) = seed_user(&store, "kei").await;
    let other = create_user_with_defaults(&store, "sam", "sam@example.com")
        .await
        .unwrap();

    create_category(&store, &category_payload("Mine"), user_id)
        .await
        .unwrap();

    let theirs = my_categories(&store, other.id).await.unwrap();
    assert_eq!(theirs.len(), 3);
    assert!(theirs.iter().all(|c| c.user_id == other.id));
}

#[test_log::test(tokio::test)]
async fn updating_another_users_category_is_not_found() {
    let store = MemoryStore::new();
    let (user_id, _) = seed_user(&store, "kei").await;
    let other = create_user_with_defaults(&store, "sam", "sam@example.com")
        .await
        .unwrap();

    let mine = create_category(&store, &category_payload("Mine"), user_id)
        .await
        .unwrap();

    let err = update_category(&store, mine.id, &category_payload("Stolen"), other.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[test_log::test(tokio::test)]
async fn deleting_the_default_category_is_rejected() {
    let store = MemoryStore::new();
    let (user_id, default_id) = seed_user(&store, "kei").await;

    let err = delete_category(&store, default_id, user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));
    assert_eq!(store.category_count(), 3);
}

#[test_log::test(tokio::test)]
async fn delete_moves_participants_onto_the_default_category() {
    let store = MemoryStore::new();
    let (user_id, default_id) = seed_user(&store, "kei").await;

    let doomed = create_category(&store, &category_payload("Doomed"), user_id)
        .await
        .unwrap();
    let task = create_task(&store, &task_payload(doomed.id), user_id)
        .await
        .unwrap();

    delete_category(&store, doomed.id, user_id).await.unwrap();

    let detail = task_detail(&store, task.id, user_id).await.unwrap();
    assert_eq!(detail.category.id, default_id);
    assert_eq!(store.category_count(), 3);
}

#[test_log::test(tokio::test)]
async fn created_categories_are_never_default() {
    let store = MemoryStore::new();
    let (user_id, _) = seed_user(&store, "kei").await;

    let category = create_category(&store, &category_payload("Side"), user_id)
        .await
        .unwrap();
    assert!(!category.is_default);
}
