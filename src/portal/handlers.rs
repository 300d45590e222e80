use axum::{
    Form,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;

use super::{
    PortalState,
    client::PortalError,
    pages::{self, LoginView, RegisterView},
    session,
};

pub const LOGIN_PATH: &str = "/Account/Login";
pub const DASHBOARD_PATH: &str = "/ERP/Dashboard";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// First problem a user has to fix before the form is worth sending to the API.
    pub fn problem(&self) -> Option<&'static str> {
        if self.username.trim().is_empty() {
            return Some("Username is required.");
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Some("Email address is required.");
        }
        if !looks_like_email(email) {
            return Some("Please enter a valid email address.");
        }
        if self.password.chars().count() < 6 {
            return Some("Password must be at least 6 characters long.");
        }
        if self.password != self.confirm_password {
            return Some("Passwords do not match.");
        }
        None
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginNotice {
    pub registered: Option<String>,
}

pub async fn index() -> Redirect {
    Redirect::to(LOGIN_PATH)
}

pub async fn login_form(headers: HeaderMap, Query(notice): Query<LoginNotice>) -> Response {
    if session::session_token(&headers).is_some() {
        return Redirect::to(DASHBOARD_PATH).into_response();
    }
    let notice = notice
        .registered
        .is_some()
        .then_some("Registration successful. Please sign in.");
    Html(pages::login_page(&LoginView {
        notice,
        ..Default::default()
    }))
    .into_response()
}

pub async fn login_submit(State(state): State<PortalState>, Form(form): Form<LoginForm>) -> Response {
    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        return render_login(username, "Username and password are required.");
    }

    match state.client.login(username, &form.password).await {
        Ok(token) => {
            tracing::info!(username, "portal sign-in");
            let cookie = session::session_cookie(
                &token,
                state.config.session_ttl_minutes * 60,
                state.config.secure_cookie,
            );
            with_cookie(Redirect::to(DASHBOARD_PATH), &cookie)
        }
        Err(PortalError::Rejected(message)) => render_login(username, &message),
        Err(err) => unavailable(err),
    }
}

pub async fn register_form(headers: HeaderMap) -> Response {
    if session::session_token(&headers).is_some() {
        return Redirect::to(DASHBOARD_PATH).into_response();
    }
    Html(pages::register_page(&RegisterView::default())).into_response()
}

pub async fn register_submit(
    State(state): State<PortalState>,
    Form(form): Form<RegisterForm>,
) -> Response {
    if let Some(problem) = form.problem() {
        return render_register(&form, problem);
    }

    let username = form.username.trim();
    let email = form.email.trim();
    match state.client.register(username, email, &form.password).await {
        Ok(()) => {
            tracing::info!(username, "portal registration");
            Redirect::to("/Account/Login?registered=1").into_response()
        }
        Err(PortalError::Rejected(message)) => render_register(&form, &message),
        Err(err) => unavailable(err),
    }
}

pub async fn logout(State(state): State<PortalState>) -> Response {
    with_cookie(
        Redirect::to(LOGIN_PATH),
        &session::clear_session_cookie(state.config.secure_cookie),
    )
}

pub async fn dashboard(State(state): State<PortalState>, headers: HeaderMap) -> Response {
    let Some(token) = session::session_token(&headers) else {
        return Redirect::to(LOGIN_PATH).into_response();
    };

    match state.client.current_user(&token).await {
        Ok(user) => Html(pages::dashboard_page(&user.username, Utc::now())).into_response(),
        Err(PortalError::Unauthorized) => with_cookie(
            Redirect::to(LOGIN_PATH),
            &session::clear_session_cookie(state.config.secure_cookie),
        ),
        Err(err) => unavailable(err),
    }
}

fn render_login(username: &str, error: &str) -> Response {
    Html(pages::login_page(&LoginView {
        username,
        error: Some(error),
        notice: None,
    }))
    .into_response()
}

fn render_register(form: &RegisterForm, error: &str) -> Response {
    Html(pages::register_page(&RegisterView {
        username: form.username.trim(),
        email: form.email.trim(),
        error: Some(error),
    }))
    .into_response()
}

fn with_cookie(redirect: Redirect, cookie: &str) -> Response {
    let mut response = redirect.into_response();
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
            response
        }
        Err(err) => {
            tracing::error!(error = %err, "session cookie is not a valid header value");
            unavailable_message("Could not start a session.")
        }
    }
}

fn unavailable(err: PortalError) -> Response {
    tracing::error!(error = %err, "API call from portal failed");
    unavailable_message("The service is temporarily unavailable. Please try again later.")
}

fn unavailable_message(message: &str) -> Response {
    (StatusCode::BAD_GATEWAY, Html(pages::error_page(message))).into_response()
}
