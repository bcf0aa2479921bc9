mod auth;
mod dashboard;
mod home;
mod task;

pub use auth::{handle_login, handle_logout, handle_register, login_page, register_page};
pub use dashboard::{add_task, add_task_page, serve_dashboard};
pub use home::{add_guest_task, home};
pub use task::{delete_task, edit_task, edit_task_page};
