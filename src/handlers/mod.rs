// src/handlers/mod.rs

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::{config::Config, utils::session::push_flash};

pub mod admin_content;
pub mod admin_courses;
pub mod admin_exams;
pub mod admin_users;
pub mod api;
pub mod auth;
pub mod catalog;
pub mod exam;
pub mod pages;
pub mod password;
pub mod profile;

/// Queues `message` and redirects to `to`.
pub(crate) fn flash_redirect(jar: CookieJar, config: &Config, message: &str, to: &str) -> Response {
    (push_flash(jar, config, message), Redirect::to(to)).into_response()
}
