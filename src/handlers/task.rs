use axum::{
    extract::{Form, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Extension,
};
use tower_sessions::Session;
use crate::app::AppState;
use crate::errors::{AppError, AppResult};
use crate::models::{EditForm, FieldErrors, Task, User};
use crate::session::Flash;
use crate::views;

fn not_found(task_id: i64, user: &User) -> AppError {
    AppError::NotFound {
        what: format!("Task {}", task_id),
        principal: Some(user.clone()),
    }
}

pub async fn edit_task_page(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    session: Session,
    Path(task_id): Path<i64>,
) -> AppResult<Response> {
    let task = Task::find_owned(&state.db, task_id, user.id)
        .await?
        .ok_or_else(|| not_found(task_id, &user))?;

    let form = EditForm { name: task.task_name };
    let flashes = Flash::take(&session).await?;
    Ok(Html(views::render_edit(task_id, &form, &FieldErrors::new(), &user, &flashes)).into_response())
}

pub async fn edit_task(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    session: Session,
    Path(task_id): Path<i64>,
    Form(form): Form<EditForm>,
) -> AppResult<Response> {
    if let Err(errors) = form.check() {
        // Still 404 for someone else's task, even with an invalid form
        Task::find_owned(&state.db, task_id, user.id)
            .await?
            .ok_or_else(|| not_found(task_id, &user))?;
        let flashes = Flash::take(&session).await?;
        return Ok(Html(views::render_edit(task_id, &form, &errors, &user, &flashes)).into_response());
    }

    if !Task::rename(&state.db, task_id, user.id, form.name.trim()).await? {
        return Err(not_found(task_id, &user));
    }
    tracing::info!(user_id = user.id, task_id, "Task edited");
    Ok(Redirect::to("/dashboard").into_response())
}

pub async fn delete_task(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(task_id): Path<i64>,
) -> AppResult<Response> {
    if !Task::delete(&state.db, task_id, user.id).await? {
        tracing::warn!(user_id = user.id, task_id, "Delete of missing task");
        return Err(not_found(task_id, &user));
    }
    tracing::info!(user_id = user.id, task_id, "Task deleted");
    Ok(Redirect::to("/dashboard").into_response())
}
