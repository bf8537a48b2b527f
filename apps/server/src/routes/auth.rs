//! Account routes: register, login, logout.
//!
//! Login failures are deliberately uniform: unknown username and wrong
//! password return the byte-identical message, so the endpoint never leaks
//! which accounts exist.

use axum::extract::State;
use axum::response::Redirect;
use axum::{Form, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::info;

use mostrador_core::validation::{validate_password, validate_username};

use crate::auth::{self, CurrentUser, SESSION_COOKIE};
use crate::error::ApiError;
use crate::AppState;

/// Credentials form, shared by /login and /registro.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(rename = "usuario")]
    pub username: String,
    pub password: String,
}

/// GET /login — JSON stub standing in for the login template.
pub async fn login_page() -> Json<Value> {
    Json(json!({
        "form": "/login",
        "fields": ["usuario", "password"],
    }))
}

/// POST /login — verify credentials, establish a session.
///
/// Success: session cookie + 303 to the dashboard.
/// Failure: 401 with the generic message, whatever went wrong.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let user = state
        .db
        .users()
        .find_by_username(form.username.trim())
        .await?
        .ok_or_else(ApiError::bad_credentials)?;

    if !auth::verify_password(&form.password, &user.password_hash) {
        return Err(ApiError::bad_credentials());
    }

    let ttl = Duration::from_secs(state.config.session_ttl_secs);
    let token = state.sessions.create(user.id, &user.username, ttl);

    info!(username = %user.username, "Login successful");

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), Redirect::to("/")))
}

/// GET /registro — JSON stub standing in for the registration template.
pub async fn register_page() -> Json<Value> {
    Json(json!({
        "form": "/registro",
        "fields": ["usuario", "password"],
    }))
}

/// POST /registro — create an account.
///
/// A taken username returns 409; the caller registers again with another
/// name. Exactly one row per username can ever exist (UNIQUE column).
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect, ApiError> {
    let username = form.username.trim();
    validate_username(username)?;
    validate_password(&form.password)?;

    let password_hash = auth::hash_password(&form.password)?;

    let user = state.db.users().insert(username, &password_hash).await?;

    info!(username = %user.username, "Account registered");

    Ok(Redirect::to("/login"))
}

/// GET /logout — destroy the session and expire the cookie.
///
/// Removing the session also discards its low-stock alert flag, so the
/// next login sees the alerts again.
pub async fn logout(
    user: CurrentUser,
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    state.sessions.remove(&user.token);

    info!(username = %user.username, "Logged out");

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/").build());
    (jar, Redirect::to("/login"))
}
