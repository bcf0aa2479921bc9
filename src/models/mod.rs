mod user;
mod forms;
mod task;

pub use user::{NewUser, User};
pub(crate) use user::is_unique_violation;
pub use forms::{EditForm, FieldErrors, LoginForm, RegisterForm, TaskForm};
pub use task::Task;
