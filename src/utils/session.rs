// src/utils/session.rs

use std::convert::Infallible;

use axum::{
    Json,
    body::Body,
    extract::{FromRef, FromRequestParts, State},
    http::{Method, Request, StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    config::{ADMIN_ROLE, Config},
    error::AppError,
    models::user::User,
    repository::users,
    state::AppState,
};

pub const SESSION_COOKIE: &str = "session";
pub const FLASH_COOKIE: &str = "flash";

/// How long an unread flash message survives.
const FLASH_TTL_SECS: i64 = 300;

/// The authenticated user as carried by the session cookie. Both the login
/// guard and the admin guard read this one structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub profile_img: String,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            profile_img: user.profile_img_or_default(),
        }
    }
}

/// JWT claims stored in the session cookie.
#[derive(Debug, Deserialize, Serialize)]
struct SessionClaims {
    /// Subject - the user id.
    sub: i64,
    name: String,
    email: String,
    role: String,
    profile_img: String,
    /// Expiration time as Unix timestamp.
    exp: i64,
}

#[derive(Debug, Deserialize, Serialize)]
struct FlashClaims {
    msgs: Vec<String>,
    exp: i64,
}

fn session_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}

/// Signs the session payload with the configured secret.
pub fn sign_session(user: &SessionUser, secret: &str, ttl_seconds: u64) -> Result<String, AppError> {
    let claims = SessionClaims {
        sub: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role.clone(),
        profile_img: user.profile_img.clone(),
        exp: Utc::now().timestamp() + ttl_seconds as i64,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Decodes a session token. Invalid or expired tokens yield `None`.
pub fn verify_session(token: &str, secret: &str) -> Option<SessionUser> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;

    let claims = data.claims;
    Some(SessionUser {
        id: claims.sub,
        name: claims.name,
        email: claims.email,
        role: claims.role,
        profile_img: claims.profile_img,
    })
}

/// Stores `user` in the session cookie, replacing any previous session.
pub fn start_session(
    jar: CookieJar,
    user: &SessionUser,
    config: &Config,
) -> Result<CookieJar, AppError> {
    let token = sign_session(user, &config.session_secret, config.session_ttl_seconds)?;
    Ok(jar.add(session_cookie(SESSION_COOKIE, token)))
}

pub fn end_session(jar: CookieJar) -> CookieJar {
    jar.remove(removal_cookie(SESSION_COOKIE))
        .remove(removal_cookie(FLASH_COOKIE))
}

pub fn current_user(jar: &CookieJar, config: &Config) -> Option<SessionUser> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| verify_session(cookie.value(), &config.session_secret))
}

fn read_flash(jar: &CookieJar, config: &Config) -> Vec<String> {
    jar.get(FLASH_COOKIE)
        .and_then(|cookie| {
            decode::<FlashClaims>(
                cookie.value(),
                &DecodingKey::from_secret(config.session_secret.as_bytes()),
                &Validation::default(),
            )
            .ok()
        })
        .map(|data| data.claims.msgs)
        .unwrap_or_default()
}

/// Queues a one-shot message for the next rendered page.
pub fn push_flash(jar: CookieJar, config: &Config, message: impl Into<String>) -> CookieJar {
    let mut msgs = read_flash(&jar, config);
    msgs.push(message.into());

    let claims = FlashClaims {
        msgs,
        exp: Utc::now().timestamp() + FLASH_TTL_SECS,
    };

    match encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.session_secret.as_bytes()),
    ) {
        Ok(token) => jar.add(session_cookie(FLASH_COOKIE, token)),
        Err(e) => {
            tracing::error!("Failed to sign flash message: {:?}", e);
            jar
        }
    }
}

/// Removes and returns the queued messages.
pub fn take_flash(jar: CookieJar, config: &Config) -> (CookieJar, Vec<String>) {
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, Vec::new());
    }
    let msgs = read_flash(&jar, config);
    (jar.remove(removal_cookie(FLASH_COOKIE)), msgs)
}

/// Per-request page context: who is logged in and which flash messages are
/// pending. Extracting it consumes the flash messages; the returned jar must
/// be sent back with the response.
pub struct Page {
    pub jar: CookieJar,
    pub user: Option<SessionUser>,
    pub flash: Vec<String>,
}

impl<S> FromRequestParts<S> for Page
where
    Config: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = Config::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let user = current_user(&jar, &config);
        let (jar, flash) = take_flash(jar, &config);

        Ok(Page { jar, user, flash })
    }
}

/// Resolves the session cookie against the users store. A session whose
/// account was deleted resolves to `None`; role and profile come from the
/// current row, not from the token.
async fn session_account(jar: &CookieJar, state: &AppState) -> Result<Option<SessionUser>, AppError> {
    let Some(session) = current_user(jar, &state.config) else {
        return Ok(None);
    };

    let account = users::find_by_id(&state.db.users, session.id).await?;
    Ok(account.as_ref().map(SessionUser::from))
}

/// Axum Middleware: login required.
///
/// Injects the `SessionUser` into the request extensions, or redirects to
/// `/login` when there is no valid session or the account no longer exists.
pub async fn require_login(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());

    match session_account(&jar, &state).await {
        Ok(Some(user)) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Ok(None) => (end_session(jar), Redirect::to("/login")).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Axum Middleware: admin role required.
///
/// The role is read from the users store on every request, so a demoted or
/// deleted admin loses access at once. Page requests (GET) without an admin
/// account are sent home with a flash message; any other method gets a 403
/// JSON body.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());

    let account = match session_account(&jar, &state).await {
        Ok(account) => account,
        Err(e) => return e.into_response(),
    };

    match account {
        Some(user) if user.is_admin() => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        _ => {
            tracing::warn!("Denied admin access to {} {}", req.method(), req.uri().path());
            if req.method() == Method::GET {
                let jar = push_flash(
                    jar,
                    &state.config,
                    "Acceso denegado. Se requiere ser administrador.",
                );
                (jar, Redirect::to("/")).into_response()
            } else {
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({
                        "success": false,
                        "status": "error",
                        "error": "forbidden",
                    })),
                )
                    .into_response()
            }
        }
    }
}
