use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Response},
};
use tower_sessions::Session;
use crate::app::AppState;
use crate::errors::AppResult;
use crate::models::TaskForm;
use crate::session::{resolve_principal, Flash, GuestTasks};
use crate::views::{self, TaskList};

/// Guest task list. Shown to everyone, logged in or not.
pub async fn home(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    let tasks = GuestTasks::load(&session).await?;
    render(&state, &session, &tasks).await
}

pub async fn add_guest_task(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<TaskForm>,
) -> AppResult<Response> {
    let tasks = GuestTasks::append(&session, &form.task).await?;
    tracing::debug!(count = tasks.len(), "Guest task list updated");
    render(&state, &session, &tasks).await
}

async fn render(state: &AppState, session: &Session, tasks: &GuestTasks) -> AppResult<Response> {
    let principal = resolve_principal(session, &state.db).await?;
    let flashes = Flash::take(session).await?;
    Ok(Html(views::render_index(TaskList::Guest(tasks), principal.as_ref(), &flashes)).into_response())
}
