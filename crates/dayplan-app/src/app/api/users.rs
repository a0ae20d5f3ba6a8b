use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use serde::{Deserialize, Serialize};

use crate::db_handler::get_store_from_depot;
use crate::error::{AppError, AppResult};
use dayplan_service::user::create_user_with_defaults;

/// ## Summary
/// Create user request payload
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

/// ## Summary
/// User response payload
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// ## Summary
/// POST /users - Create a new user with the seeded category set.
///
/// ## Errors
/// Returns HTTP 400 if the body is malformed or a field is empty.
#[handler]
async fn create_user_handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<UserResponse>> {
    let create_req: CreateUserRequest = req
        .parse_json()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?;

    if create_req.name.is_empty() || create_req.email.is_empty() {
        return Err(AppError::BadRequest(
            "Name and email are required".to_string(),
        ));
    }

    let store = get_store_from_depot(depot)?;
    let user = create_user_with_defaults(store.as_ref(), &create_req.name, &create_req.email).await?;

    tracing::info!(user_id = user.id, "User created");

    res.status_code(StatusCode::CREATED);
    Ok(Json(UserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
    }))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("users").post(create_user_handler)
}
