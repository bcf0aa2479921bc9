use sqlx::SqlitePool;
use tower_sessions::Session;
use crate::errors::AppResult;
use crate::models::User;
use super::USER_ID_KEY;

/// Loads the user bound to this session, or `None` for an anonymous visitor.
/// A binding to a user that no longer exists is dropped.
pub async fn resolve_principal(session: &Session, pool: &SqlitePool) -> AppResult<Option<User>> {
    let Some(user_id) = session.get::<i64>(USER_ID_KEY).await? else {
        return Ok(None);
    };

    match User::find_by_id(pool, user_id).await? {
        Some(user) => Ok(Some(user)),
        None => {
            tracing::warn!(user_id, "Session bound to unknown user, clearing");
            session.remove::<i64>(USER_ID_KEY).await?;
            Ok(None)
        }
    }
}

/// Binds `user` to the session under a fresh session id.
pub async fn login(session: &Session, user: &User) -> AppResult<()> {
    session.cycle_id().await?;
    session.insert(USER_ID_KEY, user.id).await?;
    tracing::info!(user_id = user.id, "User logged in");
    Ok(())
}

/// Clears the user binding. Other session state, guest tasks included, is kept.
pub async fn logout(session: &Session) -> AppResult<()> {
    if let Some(user_id) = session.remove::<i64>(USER_ID_KEY).await? {
        tracing::info!(user_id, "User logged out");
    }
    Ok(())
}
