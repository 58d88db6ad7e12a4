// src/handlers/admin_courses.rs

use axum::{
    extract::{Multipart, Path, State},
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    config::{Config, DEFAULT_COURSE_IMG},
    error::AppError,
    models::course::CourseInput,
    repository::courses,
    state::Db,
    utils::{
        session::Page,
        upload::{FormData, discard_on_error, save_upload},
    },
    views::{AdminCourseFormTemplate, AdminCoursesTemplate},
};

use super::flash_redirect;

/// Course fields of the add/edit form; `image` is left for [`store_image`].
fn course_input(form: &FormData) -> CourseInput {
    CourseInput {
        title: form.text("titulo").trim().to_string(),
        description: form.text("descripcion"),
        category: form.text("categoria"),
        duration: form.text("duracion"),
        image: None,
    }
}

/// Writes the uploaded image, if any, and returns its stored name.
async fn store_image(form: &FormData, config: &Config) -> Result<Option<String>, AppError> {
    match form.file("imagen") {
        Some(file) => Ok(Some(save_upload(&config.course_img_dir(), file).await?)),
        None => Ok(None),
    }
}

pub async fn list(State(db): State<Db>, page: Page) -> Result<Response, AppError> {
    let courses = courses::list(&db.courses).await?;

    let layout = page.layout();
    page.render(AdminCoursesTemplate { layout, courses })
}

pub async fn add_page(page: Page) -> Result<Response, AppError> {
    let layout = page.layout();
    page.render(AdminCourseFormTemplate {
        layout,
        heading: "Agregar curso".to_string(),
        action: "/admin/cursos/agregar".to_string(),
        title: String::new(),
        description: String::new(),
        category: String::new(),
        duration: String::new(),
        image: String::new(),
    })
}

/// Creates a course; without an uploaded image it gets the default one.
pub async fn add(
    State(db): State<Db>,
    State(config): State<Config>,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = FormData::read(multipart).await?;
    let mut input = course_input(&form);
    if input.title.is_empty() {
        return Ok(flash_redirect(
            jar,
            &config,
            "El título es obligatorio",
            "/admin/cursos/agregar",
        ));
    }

    let stored = store_image(&form, &config).await?;
    input.image = Some(stored.clone().unwrap_or_else(|| DEFAULT_COURSE_IMG.to_string()));

    let id = discard_on_error(
        courses::create(&db.courses, &input).await,
        &config.course_img_dir(),
        stored.as_deref(),
    )
    .await?;
    tracing::info!("Course {} created", id);

    Ok(flash_redirect(jar, &config, "Curso agregado correctamente", "/admin/cursos"))
}

pub async fn edit_page(
    State(db): State<Db>,
    Path(id): Path<i64>,
    page: Page,
) -> Result<Response, AppError> {
    let course = courses::find(&db.courses, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Curso no encontrado".to_string()))?;

    let layout = page.layout();
    page.render(AdminCourseFormTemplate {
        layout,
        heading: "Editar curso".to_string(),
        action: format!("/admin/cursos/editar/{}", id),
        image: course.image_or_default(),
        title: course.title,
        description: course.description,
        category: course.category,
        duration: course.duration,
    })
}

/// Updates a course, keeping the previous image unless a new one is sent.
pub async fn edit(
    State(db): State<Db>,
    State(config): State<Config>,
    Path(id): Path<i64>,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let existing = courses::find(&db.courses, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Curso no encontrado".to_string()))?;

    let form = FormData::read(multipart).await?;
    let mut input = course_input(&form);
    if input.title.is_empty() {
        return Ok(flash_redirect(
            jar,
            &config,
            "El título es obligatorio",
            &format!("/admin/cursos/editar/{}", id),
        ));
    }

    let stored = store_image(&form, &config).await?;
    input.image = Some(stored.clone().unwrap_or_else(|| existing.image_or_default()));

    discard_on_error(
        courses::update(&db.courses, id, &input).await,
        &config.course_img_dir(),
        stored.as_deref(),
    )
    .await?;
    tracing::info!("Course {} updated", id);

    Ok(flash_redirect(jar, &config, "Curso actualizado", "/admin/cursos"))
}

/// Deletes a course with all its levels, lessons, exams and questions.
pub async fn delete(
    State(db): State<Db>,
    State(config): State<Config>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    if courses::delete(&db.courses, id).await? {
        tracing::info!("Course {} deleted", id);
    }

    Ok(flash_redirect(jar, &config, "Curso eliminado", "/admin/cursos"))
}
