// Application error type and result alias, converted to HTTP responses in `response`.
use thiserror::Error;

pub mod response;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Credential error: {0}")]
    Credential(#[from] crate::services::CredentialError),

    /// Carries the signed-in user, if any, so the error page keeps their navigation.
    #[error("{what} not found")]
    NotFound {
        what: String,
        principal: Option<crate::models::User>,
    },
}

pub type AppResult<T> = Result<T, AppError>;
