// src/handlers/pages.rs

use axum::{extract::State, response::Response};

use crate::{
    error::AppError,
    repository::courses,
    state::Db,
    utils::session::Page,
    views::{AboutTemplate, HomeTemplate, LocationTemplate},
};

pub async fn home(State(db): State<Db>, page: Page) -> Result<Response, AppError> {
    let courses = courses::list(&db.courses).await.map_err(|e| {
        tracing::error!("Failed to list courses for home page: {:?}", e);
        AppError::from(e)
    })?;

    let layout = page.layout();
    page.render(HomeTemplate { layout, courses })
}

pub async fn about(page: Page) -> Result<Response, AppError> {
    let layout = page.layout();
    page.render(AboutTemplate { layout })
}

pub async fn location(page: Page) -> Result<Response, AppError> {
    let layout = page.layout();
    page.render(LocationTemplate { layout })
}
