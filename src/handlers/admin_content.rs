// src/handlers/admin_content.rs

//! Admin screens for the levels of a course and the lessons of a level.

use axum::{
    Form,
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    config::Config,
    error::AppError,
    models::{
        lesson::LessonInput,
        level::{LevelForm, NewLevel},
    },
    repository::{courses, exams, lessons, levels},
    state::Db,
    utils::{
        session::Page,
        upload::{FormData, discard_on_error, save_upload},
        youtube::embed_url,
    },
    views::{AdminLessonFormTemplate, AdminLevelTemplate, AdminLevelsTemplate},
};

use super::flash_redirect;

fn level_not_found() -> AppError {
    AppError::NotFound("Nivel no encontrado".to_string())
}

fn lesson_not_found() -> AppError {
    AppError::NotFound("Lección no encontrada".to_string())
}

pub async fn list_levels(
    State(db): State<Db>,
    Path(course_id): Path<i64>,
    page: Page,
) -> Result<Response, AppError> {
    let course = courses::find(&db.courses, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Curso no encontrado".to_string()))?;
    let levels = levels::list_for_course(&db.courses, course_id).await?;

    let layout = page.layout();
    page.render(AdminLevelsTemplate {
        layout,
        course,
        levels,
    })
}

pub async fn add_level(
    State(db): State<Db>,
    State(config): State<Config>,
    Path(course_id): Path<i64>,
    jar: CookieJar,
    Form(form): Form<LevelForm>,
) -> Result<Response, AppError> {
    if courses::find(&db.courses, course_id).await?.is_none() {
        return Err(AppError::NotFound("Curso no encontrado".to_string()));
    }

    let back = format!("/admin/cursos/{}/niveles", course_id);
    let title = form.titulo.trim();
    if title.is_empty() {
        return Ok(flash_redirect(jar, &config, "El título es obligatorio", &back));
    }

    let level = NewLevel {
        title: title.to_string(),
        description: form.descripcion,
    };
    let id = levels::create(&db.courses, course_id, &level).await?;
    tracing::info!("Level {} added to course {}", id, course_id);

    Ok(flash_redirect(jar, &config, "Nivel agregado correctamente", &back))
}

/// Level screen: its lessons and exams plus the forms to add more.
pub async fn level_detail(
    State(db): State<Db>,
    Path(id): Path<i64>,
    page: Page,
) -> Result<Response, AppError> {
    let level = levels::find(&db.courses, id).await?.ok_or_else(level_not_found)?;
    let course = courses::find(&db.courses, level.course_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Curso no encontrado".to_string()))?;
    let lessons = lessons::list_for_level(&db.courses, id).await?;
    let exams = exams::list_for_level(&db.courses, id).await?;

    let layout = page.layout();
    page.render(AdminLevelTemplate {
        layout,
        course,
        level,
        lessons,
        exams,
    })
}

pub async fn edit_level_page(Path(id): Path<i64>) -> impl IntoResponse {
    Redirect::to(&format!("/admin/niveles/{}", id))
}

pub async fn edit_level(
    State(db): State<Db>,
    State(config): State<Config>,
    Path(id): Path<i64>,
    jar: CookieJar,
    Form(form): Form<LevelForm>,
) -> Result<Response, AppError> {
    let back = format!("/admin/niveles/{}", id);
    let title = form.titulo.trim();
    if title.is_empty() {
        return Ok(flash_redirect(jar, &config, "El título es obligatorio", &back));
    }

    let level = NewLevel {
        title: title.to_string(),
        description: form.descripcion,
    };
    if !levels::update(&db.courses, id, &level).await? {
        return Err(level_not_found());
    }

    Ok(flash_redirect(jar, &config, "Nivel actualizado", &back))
}

/// Deletes a level with its lessons and exams. The course stays.
pub async fn delete_level(
    State(db): State<Db>,
    State(config): State<Config>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let level = levels::find(&db.courses, id).await?.ok_or_else(level_not_found)?;

    levels::delete(&db.courses, id).await?;
    tracing::info!("Level {} deleted from course {}", id, level.course_id);

    Ok(flash_redirect(
        jar,
        &config,
        "Nivel eliminado",
        &format!("/admin/cursos/{}/niveles", level.course_id),
    ))
}

/// Lesson fields of the add/edit form with the video URL normalised. The
/// PDF is stored separately by [`store_pdf`] once the fields are valid.
pub(crate) fn lesson_input(form: &FormData) -> LessonInput {
    LessonInput {
        title: form.text("titulo").trim().to_string(),
        content: form.text("contenido"),
        video_url: embed_url(&form.text("video_url")),
        pdf_file: None,
    }
}

pub(crate) async fn store_pdf(form: &FormData, config: &Config) -> Result<Option<String>, AppError> {
    match form.file("pdf") {
        Some(file) => Ok(Some(save_upload(&config.pdf_dir(), file).await?)),
        None => Ok(None),
    }
}

pub async fn add_lesson(
    State(db): State<Db>,
    State(config): State<Config>,
    Path(level_id): Path<i64>,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<Response, AppError> {
    if levels::find(&db.courses, level_id).await?.is_none() {
        return Err(level_not_found());
    }

    let back = format!("/admin/niveles/{}", level_id);
    let form = FormData::read(multipart).await?;
    let mut input = lesson_input(&form);
    if input.title.is_empty() {
        return Ok(flash_redirect(jar, &config, "El título es obligatorio", &back));
    }

    input.pdf_file = store_pdf(&form, &config).await?;
    let id = discard_on_error(
        lessons::create(&db.courses, level_id, &input).await,
        &config.pdf_dir(),
        input.pdf_file.as_deref(),
    )
    .await?;
    tracing::info!("Lesson {} added to level {}", id, level_id);

    Ok(flash_redirect(jar, &config, "Lección agregada correctamente", &back))
}

pub async fn edit_lesson_page(
    State(db): State<Db>,
    Path(id): Path<i64>,
    page: Page,
) -> Result<Response, AppError> {
    let lesson = lessons::find(&db.courses, id).await?.ok_or_else(lesson_not_found)?;

    let layout = page.layout();
    page.render(AdminLessonFormTemplate { layout, lesson })
}

/// Updates a lesson; the stored PDF is kept unless a new one is uploaded.
pub async fn edit_lesson(
    State(db): State<Db>,
    State(config): State<Config>,
    Path(id): Path<i64>,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let existing = lessons::find(&db.courses, id).await?.ok_or_else(lesson_not_found)?;

    let form = FormData::read(multipart).await?;
    let mut input = lesson_input(&form);
    if input.title.is_empty() {
        return Ok(flash_redirect(
            jar,
            &config,
            "El título es obligatorio",
            &format!("/admin/lecciones/editar/{}", id),
        ));
    }

    let stored = store_pdf(&form, &config).await?;
    input.pdf_file = stored.clone().or(existing.pdf_file);

    discard_on_error(
        lessons::update(&db.courses, id, &input).await,
        &config.pdf_dir(),
        stored.as_deref(),
    )
    .await?;

    Ok(flash_redirect(
        jar,
        &config,
        "Lección actualizada",
        &format!("/admin/niveles/{}", existing.level_id),
    ))
}

pub async fn delete_lesson(
    State(db): State<Db>,
    State(config): State<Config>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let lesson = lessons::find(&db.courses, id).await?.ok_or_else(lesson_not_found)?;

    lessons::delete(&db.courses, id).await?;
    tracing::info!("Lesson {} deleted", id);

    Ok(flash_redirect(
        jar,
        &config,
        "Lección eliminada",
        &format!("/admin/niveles/{}", lesson.level_id),
    ))
}
