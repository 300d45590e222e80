//! Server-rendered HTML for the customer portal.

use chrono::{DateTime, Utc};

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - SimpleERP</title>
</head>
<body>
<header><a href="/">SimpleERP</a></header>
<main>
{body}
</main>
</body>
</html>"#,
        title = escape_html(title),
    )
}

fn alert(kind: &str, message: Option<&str>) -> String {
    match message {
        Some(text) if !text.is_empty() => {
            format!(r#"<div class="alert alert-{kind}">{}</div>"#, escape_html(text))
        }
        _ => String::new(),
    }
}

#[derive(Debug, Default)]
pub struct LoginView<'a> {
    pub username: &'a str,
    pub error: Option<&'a str>,
    pub notice: Option<&'a str>,
}

pub fn login_page(view: &LoginView<'_>) -> String {
    let body = format!(
        r#"<h1>Sign in</h1>
{notice}{error}<form method="post" action="/Account/Login">
<label>Username <input name="username" value="{username}" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Sign in</button>
</form>
<p><a href="/Account/Register">Create an account</a></p>"#,
        notice = alert("success", view.notice),
        error = alert("danger", view.error),
        username = escape_html(view.username),
    );
    layout("Login", &body)
}

#[derive(Debug, Default)]
pub struct RegisterView<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub error: Option<&'a str>,
}

pub fn register_page(view: &RegisterView<'_>) -> String {
    let body = format!(
        r#"<h1>Register</h1>
{error}<form method="post" action="/Account/Register">
<label>Username <input name="username" value="{username}" maxlength="50" required></label>
<label>Email <input type="email" name="email" value="{email}" maxlength="255" required></label>
<label>Password <input type="password" name="password" minlength="6" required></label>
<label>Confirm password <input type="password" name="confirm_password" required></label>
<button type="submit">Register</button>
</form>
<p><a href="/Account/Login">Already registered? Sign in</a></p>"#,
        error = alert("danger", view.error),
        username = escape_html(view.username),
        email = escape_html(view.email),
    );
    layout("Register", &body)
}

pub fn dashboard_page(username: &str, now: DateTime<Utc>) -> String {
    let body = format!(
        r#"<h1>Welcome, {username}</h1>
<p>Current time: {time}</p>
<form method="post" action="/Account/Logout">
<button type="submit">Sign out</button>
</form>"#,
        username = escape_html(username),
        time = now.format("%Y-%m-%d %H:%M:%S UTC"),
    );
    layout("Dashboard", &body)
}

pub fn error_page(message: &str) -> String {
    layout(
        "Error",
        &format!(
            r#"<h1>Something went wrong</h1>
{}<p><a href="/Account/Login">Back to sign in</a></p>"#,
            alert("danger", Some(message))
        ),
    )
}
