use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;
use crate::app::AppState;
use crate::errors::{AppError, AppResult};
use crate::session::{resolve_principal, Flash};

/// Gate for routes that need a logged-in user.
///
/// The resolved [`User`](crate::models::User) is placed in the request
/// extensions; anonymous visitors are sent to the login page with a flash.
pub async fn require_login(
    State(state): State<AppState>,
    session: Session,
    mut req: Request,
    next: Next,
) -> AppResult<Response> {
    match resolve_principal(&session, &state.db).await? {
        Some(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        None => {
            tracing::debug!(path = %req.uri().path(), "Anonymous access to protected route");
            Flash::push(&session, "Please log in to access this page.").await?;
            Err(AppError::Auth("Not authenticated".into()))
        }
    }
}
