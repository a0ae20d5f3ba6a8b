mod categories;
mod healthcheck;
mod routines;
mod schedules;
mod tasks;
mod users;

use salvo::Router;

use crate::middleware::identity::IdentityMiddleware;

/// ## Summary
/// Constructs the main API router. Signup and the healthcheck are open;
/// everything else requires an identified user.
#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(healthcheck::routes())
        .push(users::routes())
        .push(
            Router::new()
                .hoop(IdentityMiddleware)
                .push(schedules::routes())
                .push(tasks::routes())
                .push(categories::routes())
                .push(routines::routes()),
        )
}
