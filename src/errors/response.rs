use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use crate::errors::AppError;
use crate::views;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Authentication errors send the visitor back to the login form
            AppError::Auth(msg) => {
                tracing::debug!("Redirecting to login: {}", msg);
                Redirect::to("/login").into_response()
            }

            AppError::NotFound { what, principal } => (
                StatusCode::NOT_FOUND,
                Html(views::render_error(
                    "Not Found",
                    &format!("{} not found.", what),
                    principal.as_ref(),
                )),
            ).into_response(),

            // Everything else is logged in full and reported generically
            err @ (AppError::Database(_) | AppError::Session(_) | AppError::Credential(_)) => {
                tracing::error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::render_error(
                        "Server Error",
                        "Something went wrong, please try again.",
                        None,
                    )),
                ).into_response()
            }
        }
    }
}
