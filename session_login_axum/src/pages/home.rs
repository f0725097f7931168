use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::config::LOGIN_PATH;
use crate::error::IntoResponseError;
use crate::session::{AuthUser, CurrentUser};

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate<'a> {
    user_email: Option<&'a str>,
    login_path: &'a str,
}

#[derive(Template)]
#[template(path = "about_me.html")]
struct AboutMeTemplate<'a> {
    user_email: Option<&'a str>,
    login_path: &'a str,
}

#[derive(Template)]
#[template(path = "account.html")]
struct AccountTemplate<'a> {
    user_email: Option<&'a str>,
    login_path: &'a str,
    email: &'a str,
    created_at: String,
}

pub(crate) async fn home(CurrentUser(user): CurrentUser) -> Result<Response, (StatusCode, String)> {
    let template = HomeTemplate {
        user_email: user.as_ref().map(|u| u.email.as_str()),
        login_path: LOGIN_PATH.as_str(),
    };
    Ok(Html(template.render().into_response_error()?).into_response())
}

pub(crate) async fn about_me(
    CurrentUser(user): CurrentUser,
) -> Result<Response, (StatusCode, String)> {
    let template = AboutMeTemplate {
        user_email: user.as_ref().map(|u| u.email.as_str()),
        login_path: LOGIN_PATH.as_str(),
    };
    Ok(Html(template.render().into_response_error()?).into_response())
}

// Anonymous clients are redirected by the AuthUser extractor
pub(crate) async fn account(AuthUser(user): AuthUser) -> Result<Response, (StatusCode, String)> {
    let template = AccountTemplate {
        user_email: Some(user.email.as_str()),
        login_path: LOGIN_PATH.as_str(),
        email: user.email.as_str(),
        created_at: user.created_at.format("%Y-%m-%d").to_string(),
    };
    Ok(Html(template.render().into_response_error()?).into_response())
}
