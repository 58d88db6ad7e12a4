// src/handlers/password.rs

use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use url::Url;

use crate::{
    config::{Config, RESET_TOKEN_MAX_AGE_SECS},
    error::AppError,
    models::user::{RecoverForm, ResetForm},
    repository::users,
    state::Db,
    utils::{
        hash::hash_password,
        mail::Mailer,
        session::{Page, push_flash},
        token::{generate_reset_token, verify_reset_token},
    },
    views::{RecoverTemplate, ResetPasswordTemplate},
};

use super::flash_redirect;

const INVALID_TOKEN: &str = "Token inválido o expirado. Solicita otro enlace.";

/// Absolute `/reset/<token>` link under the public base URL.
pub fn reset_link(public_url: &str, token: &str) -> Result<String, AppError> {
    let base = format!("{}/", public_url.trim_end_matches('/'));

    let link = Url::parse(&base)
        .and_then(|base| base.join(&format!("reset/{}", token)))
        .map_err(|e| AppError::InternalServerError(format!("Invalid PUBLIC_URL: {}", e)))?;

    Ok(link.to_string())
}

pub async fn recover_page(page: Page) -> Result<Response, AppError> {
    let layout = page.layout();
    page.render(RecoverTemplate { layout })
}

/// Mails a reset link when the email belongs to an account.
///
/// The answer is the same whether or not the account exists.
pub async fn recover(
    State(db): State<Db>,
    State(config): State<Config>,
    jar: CookieJar,
    Form(payload): Form<RecoverForm>,
) -> Result<Response, AppError> {
    let email = payload.correo.trim();
    if email.is_empty() || !email.contains('@') {
        return Ok(flash_redirect(jar, &config, "Introduce un correo válido", "/recuperar"));
    }

    let jar = push_flash(
        jar,
        &config,
        "Si el correo existe, recibirás un email con instrucciones.",
    );

    let Some(user) = users::find_by_email(&db.users, email).await? else {
        tracing::info!("Password reset requested for an unknown email");
        return Ok((jar, Redirect::to("/login")).into_response());
    };

    let token = generate_reset_token(&user.email, &config.session_secret)?;
    let link = reset_link(&config.public_url, &token)?;

    let mailer = Mailer::new(config.mail.clone());
    if let Err(e) = mailer.send_password_reset(&user.email, &link).await {
        tracing::error!("Failed to send password reset email: {:?}", e);
        return Ok(flash_redirect(
            jar,
            &config,
            "Error al enviar el email. Intenta más tarde.",
            "/recuperar",
        ));
    }

    Ok((jar, Redirect::to("/login")).into_response())
}

pub async fn reset_page(
    State(db): State<Db>,
    State(config): State<Config>,
    Path(token): Path<String>,
    page: Page,
) -> Result<Response, AppError> {
    let Some(email) = verify_reset_token(&token, &config.session_secret, RESET_TOKEN_MAX_AGE_SECS)
    else {
        return Ok(flash_redirect(page.jar, &config, INVALID_TOKEN, "/recuperar"));
    };

    if users::find_by_email(&db.users, &email).await?.is_none() {
        return Ok(flash_redirect(page.jar, &config, "Usuario no encontrado.", "/recuperar"));
    }

    let layout = page.layout();
    page.render(ResetPasswordTemplate {
        layout,
        email,
        token,
    })
}

/// Stores a new password for the account named in the token.
pub async fn reset(
    State(db): State<Db>,
    State(config): State<Config>,
    Path(token): Path<String>,
    jar: CookieJar,
    Form(payload): Form<ResetForm>,
) -> Result<Response, AppError> {
    let Some(email) = verify_reset_token(&token, &config.session_secret, RESET_TOKEN_MAX_AGE_SECS)
    else {
        return Ok(flash_redirect(jar, &config, INVALID_TOKEN, "/recuperar"));
    };

    let Some(user) = users::find_by_email(&db.users, &email).await? else {
        return Ok(flash_redirect(jar, &config, "Usuario no encontrado.", "/recuperar"));
    };

    if payload.contrasena.is_empty() || payload.contrasena != payload.contrasena2 {
        return Ok(flash_redirect(
            jar,
            &config,
            "Las contraseñas no coinciden o están vacías.",
            &format!("/reset/{}", token),
        ));
    }

    let hashed_password = hash_password(&payload.contrasena)?;
    users::update_password(&db.users, user.id, &hashed_password).await?;
    tracing::info!("Password reset for user {}", user.id);

    Ok(flash_redirect(
        jar,
        &config,
        "Contraseña actualizada. Ya puedes iniciar sesión.",
        "/login",
    ))
}
