// src/handlers/auth.rs

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use validator::{Validate, ValidationErrors};

use crate::{
    config::{Config, DEFAULT_PROFILE_IMG, DEFAULT_ROLE},
    error::AppError,
    models::user::{LoginForm, RegisterForm},
    repository::users,
    state::Db,
    utils::{
        hash::{hash_password, verify_password},
        session::{Page, SessionUser, end_session, start_session},
    },
    views::{LoginTemplate, RegisterTemplate},
};

use super::flash_redirect;

/// First human-readable message of a failed validation.
fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Datos inválidos.".to_string())
}

pub async fn register_page(page: Page) -> Result<Response, AppError> {
    let layout = page.layout();
    page.render(RegisterTemplate {
        layout,
        name: String::new(),
        email: String::new(),
    })
}

/// Creates an `alumno` account.
///
/// Invalid input and an already registered email re-render the form with a
/// flash message; success redirects to `/login`.
pub async fn register(
    State(db): State<Db>,
    State(config): State<Config>,
    mut page: Page,
    Form(payload): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let payload = RegisterForm {
        nombre: payload.nombre.trim().to_string(),
        correo: payload.correo.trim().to_string(),
        contrasena: payload.contrasena,
    };

    if let Err(validation_errors) = payload.validate() {
        page.flash.push(first_message(&validation_errors));
        let layout = page.layout();
        return page.render(RegisterTemplate {
            layout,
            name: payload.nombre,
            email: payload.correo,
        });
    }

    let hashed_password = hash_password(&payload.contrasena)?;

    let created = users::create(
        &db.users,
        &payload.nombre,
        &payload.correo,
        &hashed_password,
        DEFAULT_ROLE,
        DEFAULT_PROFILE_IMG,
    )
    .await?;

    match created {
        Some(id) => {
            tracing::info!("Registered user {} ({})", id, payload.correo);
            Ok(flash_redirect(
                page.jar,
                &config,
                "Cuenta creada correctamente. Inicia sesión.",
                "/login",
            ))
        }
        None => {
            page.flash.push("El correo ya está registrado".to_string());
            let layout = page.layout();
            page.render(RegisterTemplate {
                layout,
                name: payload.nombre,
                email: payload.correo,
            })
        }
    }
}

pub async fn login_page(page: Page) -> Result<Response, AppError> {
    let layout = page.layout();
    page.render(LoginTemplate {
        layout,
        email: String::new(),
    })
}

/// Verifies the credentials and opens a session.
///
/// Unknown email and wrong password are answered identically and leave no
/// session cookie behind.
pub async fn login(
    State(db): State<Db>,
    State(config): State<Config>,
    mut page: Page,
    Form(payload): Form<LoginForm>,
) -> Result<Response, AppError> {
    let email = payload.correo.trim();

    let user = users::find_by_email(&db.users, email).await?;

    let authenticated = match &user {
        Some(user) => verify_password(&payload.contrasena, &user.password)?,
        None => false,
    };

    match user {
        Some(user) if authenticated => {
            tracing::info!("User {} logged in", user.id);
            let jar = start_session(page.jar, &SessionUser::from(&user), &config)?;
            Ok((jar, Redirect::to("/")).into_response())
        }
        _ => {
            tracing::info!("Failed login attempt for {}", email);
            page.flash.push("Correo o contraseña incorrectos".to_string());
            let layout = page.layout();
            page.render(LoginTemplate {
                layout,
                email: email.to_string(),
            })
        }
    }
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (end_session(jar), Redirect::to("/"))
}
