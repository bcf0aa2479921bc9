use tower_sessions::Session;
use crate::errors::AppResult;
use super::FLASH_KEY;

/// One-shot messages shown on the next rendered page.
pub struct Flash;

impl Flash {
    pub async fn push(session: &Session, message: impl Into<String>) -> AppResult<()> {
        let mut messages: Vec<String> = session.get(FLASH_KEY).await?.unwrap_or_default();
        messages.push(message.into());
        session.insert(FLASH_KEY, messages).await?;
        Ok(())
    }

    /// Returns pending messages in the order they were pushed and clears them.
    pub async fn take(session: &Session) -> AppResult<Vec<String>> {
        Ok(session.remove::<Vec<String>>(FLASH_KEY).await?.unwrap_or_default())
    }
}
