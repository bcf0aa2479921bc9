//! Typed access to per-visitor session state.
//!
//! The cookie only carries a signed session id; the values below live in the
//! server-side store under fixed keys.
mod flash;
mod guest;
mod principal;

pub use flash::Flash;
pub use guest::GuestTasks;
pub use principal::{login, logout, resolve_principal};

const USER_ID_KEY: &str = "_user_id";
const GUEST_TASKS_KEY: &str = "guest_tasks";
const FLASH_KEY: &str = "_flashes";

#[cfg(test)]
pub(crate) fn test_session() -> tower_sessions::Session {
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    tower_sessions::Session::new(None, Arc::new(MemoryStore::default()), None)
}
