use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
    Extension,
};
use tower_sessions::Session;
use crate::app::AppState;
use crate::errors::AppResult;
use crate::models::{Task, TaskForm, User};
use crate::session::Flash;
use crate::views::{self, TaskList};

pub async fn serve_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    session: Session,
) -> AppResult<Response> {
    let tasks = Task::list_for_owner(&state.db, user.id).await?;
    tracing::debug!(user_id = user.id, count = tasks.len(), "Rendering dashboard");

    let flashes = Flash::take(&session).await?;
    Ok(Html(views::render_index(TaskList::Owned(&tasks), Some(&user), &flashes)).into_response())
}

/// The add form lives on the dashboard.
pub async fn add_task_page() -> Redirect {
    Redirect::to("/dashboard")
}

pub async fn add_task(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    session: Session,
    Form(form): Form<TaskForm>,
) -> AppResult<Response> {
    match form.check() {
        Ok(()) => {
            let task = Task::create(&state.db, user.id, form.task.trim()).await?;
            tracing::info!(user_id = user.id, task_id = task.id, "Task added");
        }
        Err(errors) => {
            for message in errors.into_values().flatten() {
                Flash::push(&session, message).await?;
            }
        }
    }
    Ok(Redirect::to("/dashboard").into_response())
}
