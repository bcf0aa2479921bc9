use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use crate::app::AppState;
use crate::errors::AppResult;
use crate::models::{is_unique_violation, FieldErrors, LoginForm, NewUser, RegisterForm, User};
use crate::session::{self, Flash};
use crate::views;

pub async fn login_page(session: Session) -> AppResult<Response> {
    let flashes = Flash::take(&session).await?;
    Ok(Html(views::render_login(&LoginForm::default(), &FieldErrors::new(), &flashes)).into_response())
}

pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(login_form): Form<LoginForm>,
) -> AppResult<Response> {
    if let Err(errors) = login_form.check() {
        let flashes = Flash::take(&session).await?;
        return Ok(Html(views::render_login(&login_form, &errors, &flashes)).into_response());
    }

    let email = login_form.email.trim();
    tracing::info!(email, "Login attempt");

    let Some(user) = User::find_by_email(&state.db, email).await? else {
        tracing::info!(email, "Login for unknown email");
        Flash::push(&session, "Email doesn't exist, please sign up").await?;
        return Ok(Redirect::to("/register").into_response());
    };

    let verified = state
        .credentials
        .verify_blocking(user.password_hash.clone(), login_form.password)
        .await?;
    if !verified {
        tracing::info!(user_id = user.id, "Invalid password");
        Flash::push(&session, "Incorrect password, please try again.").await?;
        return Ok(Redirect::to("/login").into_response());
    }

    session::login(&session, &user).await?;
    Ok(Redirect::to("/dashboard").into_response())
}

pub async fn register_page(session: Session) -> AppResult<Response> {
    let flashes = Flash::take(&session).await?;
    Ok(Html(views::render_register(&RegisterForm::default(), &FieldErrors::new(), &flashes)).into_response())
}

pub async fn handle_register(
    State(state): State<AppState>,
    session: Session,
    Form(register_form): Form<RegisterForm>,
) -> AppResult<Response> {
    if let Err(errors) = register_form.check() {
        let flashes = Flash::take(&session).await?;
        return Ok(Html(views::render_register(&register_form, &errors, &flashes)).into_response());
    }

    let email = register_form.email.trim().to_string();

    // Check if user exists
    if User::find_by_email(&state.db, &email).await?.is_some() {
        return already_registered(&session).await;
    }

    let password_hash = state.credentials.hash_blocking(register_form.password).await?;
    let new_user = NewUser {
        name: register_form.name.trim().to_string(),
        email,
        password_hash,
    };

    // A concurrent registration for the same email can still win the race
    let user = match User::create(&state.db, new_user).await {
        Ok(user) => user,
        Err(e) if is_unique_violation(&e) => return already_registered(&session).await,
        Err(e) => return Err(e.into()),
    };
    tracing::info!(user_id = user.id, "Registered new user");

    session::login(&session, &user).await?;
    Ok(Redirect::to("/dashboard").into_response())
}

async fn already_registered(session: &Session) -> AppResult<Response> {
    Flash::push(session, "You already signed up, login instead.").await?;
    Ok(Redirect::to("/login").into_response())
}

pub async fn handle_logout(session: Session) -> AppResult<Response> {
    session::logout(&session).await?;
    Ok(Redirect::to("/").into_response())
}
