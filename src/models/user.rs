// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::config::DEFAULT_PROFILE_IMG;

/// Represents the 'usuarios' table in the users store.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Display name.
    #[sqlx(rename = "nombre")]
    pub name: String,

    /// Unique login email.
    #[sqlx(rename = "correo")]
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    #[sqlx(rename = "contrasena")]
    pub password: String,

    /// User role: 'alumno' or 'admin'. Stored verbatim, not validated.
    #[sqlx(rename = "rol")]
    pub role: String,

    /// File name under the profile image directory.
    pub profile_img: Option<String>,
}

impl User {
    pub fn profile_img_or_default(&self) -> String {
        self.profile_img
            .clone()
            .filter(|img| !img.is_empty())
            .unwrap_or_else(|| DEFAULT_PROFILE_IMG.to_string())
    }
}

/// Form for creating a new account (`/registro`).
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "El nombre es obligatorio."))]
    pub nombre: String,
    #[serde(default)]
    #[validate(email(message = "Introduce un correo válido."))]
    pub correo: String,
    #[serde(default)]
    #[validate(length(
        min = 4,
        max = 128,
        message = "La contraseña debe tener entre 4 y 128 caracteres."
    ))]
    pub contrasena: String,
}

/// Form for `/login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub correo: String,
    #[serde(default)]
    pub contrasena: String,
}

/// Form for requesting a reset link (`/recuperar`).
#[derive(Debug, Deserialize)]
pub struct RecoverForm {
    #[serde(default)]
    pub correo: String,
}

/// Form for choosing a new password (`/reset/{token}`).
#[derive(Debug, Deserialize)]
pub struct ResetForm {
    #[serde(default)]
    pub contrasena: String,
    #[serde(default)]
    pub contrasena2: String,
}
