use askama::Template;
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use session_login::{LoginOutcome, login_create, login_destroy, login_form};

use crate::config::{LOGIN_PATH, LOGIN_REDIRECT_PATH};
use crate::error::IntoResponseError;
use crate::session::{CurrentUser, RequestSession};
use crate::state::LoginState;

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate<'a> {
    user_email: Option<&'a str>,
    login_path: &'a str,
    error: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct LoginForm {
    email: String,
    password: String,
}

/// Login form, showing the error left by the last failed attempt once
pub(crate) async fn new(
    session: RequestSession,
    CurrentUser(user): CurrentUser,
) -> Result<Response, (StatusCode, String)> {
    let error = login_form(&mut *session.lock().await);

    let template = LoginTemplate {
        user_email: user.as_ref().map(|u| u.email.as_str()),
        login_path: LOGIN_PATH.as_str(),
        error,
    };
    Ok(Html(template.render().into_response_error()?).into_response())
}

pub(crate) async fn create(
    State(state): State<LoginState>,
    session: RequestSession,
    Form(form): Form<LoginForm>,
) -> Result<Response, (StatusCode, String)> {
    let mut session = session.lock().await;
    let outcome = login_create(
        &mut session,
        state.users.as_ref(),
        &form.email,
        &form.password,
    )
    .await
    .into_response_error()?;

    let target = match outcome {
        LoginOutcome::Authenticated(_) => LOGIN_REDIRECT_PATH.as_str(),
        LoginOutcome::InvalidCredentials => LOGIN_PATH.as_str(),
    };
    Ok(Redirect::to(target).into_response())
}

pub(crate) async fn destroy(session: RequestSession) -> Redirect {
    login_destroy(&mut *session.lock().await);
    Redirect::to(LOGIN_REDIRECT_PATH.as_str())
}
