use salvo::Depot;
use salvo::http::StatusCode;
use salvo::writing::Json;
use tracing::error;

use crate::db_handler::get_store_from_depot;
use crate::error::ErrorResponse;

pub const CURRENT_USER_ID: &str = "current_user_id";

pub struct IdentityMiddleware;

/// ## Summary
/// Resolves the requesting user from the `X-User-Id` header and stores the
/// id in the depot.
///
/// ## Errors
/// Returns HTTP 401 when the header is absent, malformed, or names a user
/// that does not exist.
#[salvo::async_trait]
impl salvo::Handler for IdentityMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        let Some(user_id) = req
            .header::<String>("x-user-id")
            .and_then(|raw| raw.parse::<i64>().ok())
        else {
            res.status_code(StatusCode::UNAUTHORIZED);
            res.render(Json(ErrorResponse {
                error: "Missing or malformed X-User-Id header".to_string(),
            }));
            ctrl.skip_rest();
            return;
        };

        let store = match get_store_from_depot(depot) {
            Ok(s) => s,
            Err(e) => {
                error!(error = ?e, "Failed to get store from depot");
                res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
                return;
            }
        };

        match store.user_by_id(user_id).await {
            Ok(Some(user)) => {
                tracing::debug!(user_id = user.id, "User identified");
                depot.insert(CURRENT_USER_ID, user.id);
            }
            Ok(None) => {
                res.status_code(StatusCode::UNAUTHORIZED);
                res.render(Json(ErrorResponse {
                    error: "Unknown user".to_string(),
                }));
                ctrl.skip_rest();
            }
            Err(e) => {
                error!(error = ?e, "Failed to look up user");
                res.status_code(StatusCode::SERVICE_UNAVAILABLE);
                ctrl.skip_rest();
            }
        }
    }
}

/// ## Summary
/// Reads the identified user id placed in the depot by the middleware.
///
/// ## Errors
/// Returns an error if the middleware did not run for this route.
pub fn current_user_id(depot: &Depot) -> crate::error::AppResult<i64> {
    depot.get::<i64>(CURRENT_USER_ID).copied().map_err(|_err| {
        dayplan_core::error::CoreError::InvariantViolation("User id not found in depot").into()
    })
}
