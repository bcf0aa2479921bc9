use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use crate::errors::AppResult;
use super::GUEST_TASKS_KEY;

/// Anonymous visitor's task list. Lives only in the session and is never
/// merged into persisted tasks.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestTasks(Vec<String>);

impl GuestTasks {
    pub async fn load(session: &Session) -> AppResult<Self> {
        Ok(session.get::<Self>(GUEST_TASKS_KEY).await?.unwrap_or_default())
    }

    /// Appends `task` and writes the list back. Blank input leaves the list untouched.
    pub async fn append(session: &Session, task: &str) -> AppResult<Self> {
        let mut tasks = Self::load(session).await?;
        let task = task.trim();
        if task.is_empty() {
            return Ok(tasks);
        }
        tasks.0.push(task.to_string());
        session.insert(GUEST_TASKS_KEY, &tasks).await?;
        Ok(tasks)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
