// src/handlers/admin_exams.rs

use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    config::Config,
    error::AppError,
    models::{exam::ExamForm, question::QuestionForm},
    repository::{exams, levels, questions},
    state::Db,
    utils::session::Page,
    views::{AdminExamFormTemplate, AdminExamQuestionsTemplate, AdminQuestionFormTemplate},
};

use super::flash_redirect;

fn exam_not_found() -> AppError {
    AppError::NotFound("Examen no encontrado".to_string())
}

fn question_not_found() -> AppError {
    AppError::NotFound("Pregunta no encontrada".to_string())
}

pub async fn add_exam_page(
    State(db): State<Db>,
    Path(level_id): Path<i64>,
    page: Page,
) -> Result<Response, AppError> {
    if levels::find(&db.courses, level_id).await?.is_none() {
        return Err(AppError::NotFound("Nivel no encontrado".to_string()));
    }

    let layout = page.layout();
    page.render(AdminExamFormTemplate {
        layout,
        heading: "Agregar examen".to_string(),
        action: format!("/admin/examenes/agregar/{}", level_id),
        level_id,
        title: String::new(),
        description: String::new(),
    })
}

pub async fn add_exam(
    State(db): State<Db>,
    State(config): State<Config>,
    Path(level_id): Path<i64>,
    jar: CookieJar,
    Form(form): Form<ExamForm>,
) -> Result<Response, AppError> {
    if levels::find(&db.courses, level_id).await?.is_none() {
        return Err(AppError::NotFound("Nivel no encontrado".to_string()));
    }

    let title = form.titulo.trim();
    if title.is_empty() {
        return Ok(flash_redirect(
            jar,
            &config,
            "El título es obligatorio",
            &format!("/admin/examenes/agregar/{}", level_id),
        ));
    }

    let id = exams::create(&db.courses, level_id, title, &form.descripcion).await?;
    tracing::info!("Exam {} added to level {}", id, level_id);

    Ok(flash_redirect(
        jar,
        &config,
        "Examen agregado correctamente",
        &format!("/admin/niveles/{}", level_id),
    ))
}

pub async fn edit_exam_page(
    State(db): State<Db>,
    Path(id): Path<i64>,
    page: Page,
) -> Result<Response, AppError> {
    let exam = exams::find(&db.courses, id).await?.ok_or_else(exam_not_found)?;

    let layout = page.layout();
    page.render(AdminExamFormTemplate {
        layout,
        heading: "Editar examen".to_string(),
        action: format!("/admin/examenes/editar/{}", id),
        level_id: exam.level_id,
        title: exam.title,
        description: exam.description,
    })
}

pub async fn edit_exam(
    State(db): State<Db>,
    State(config): State<Config>,
    Path(id): Path<i64>,
    jar: CookieJar,
    Form(form): Form<ExamForm>,
) -> Result<Response, AppError> {
    let exam = exams::find(&db.courses, id).await?.ok_or_else(exam_not_found)?;

    let title = form.titulo.trim();
    if title.is_empty() {
        return Ok(flash_redirect(
            jar,
            &config,
            "El título es obligatorio",
            &format!("/admin/examenes/editar/{}", id),
        ));
    }

    exams::update(&db.courses, id, title, &form.descripcion).await?;

    Ok(flash_redirect(
        jar,
        &config,
        "Examen actualizado",
        &format!("/admin/niveles/{}", exam.level_id),
    ))
}

/// Deletes an exam, its questions and every answer recorded for it.
pub async fn delete_exam(
    State(db): State<Db>,
    State(config): State<Config>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let exam = exams::find(&db.courses, id).await?.ok_or_else(exam_not_found)?;

    exams::delete(&db.courses, id).await?;
    tracing::info!("Exam {} deleted", id);

    Ok(flash_redirect(
        jar,
        &config,
        "Examen eliminado",
        &format!("/admin/niveles/{}", exam.level_id),
    ))
}

/// Question list of an exam, with the correct answers visible.
pub async fn questions_page(
    State(db): State<Db>,
    Path(id): Path<i64>,
    page: Page,
) -> Result<Response, AppError> {
    let exam = exams::find(&db.courses, id).await?.ok_or_else(exam_not_found)?;
    let questions = questions::list_for_exam(&db.courses, id).await?;

    let layout = page.layout();
    page.render(AdminExamQuestionsTemplate {
        layout,
        exam,
        questions,
    })
}

pub async fn add_question(
    State(db): State<Db>,
    State(config): State<Config>,
    Path(id): Path<i64>,
    jar: CookieJar,
    Form(form): Form<QuestionForm>,
) -> Result<Response, AppError> {
    if exams::find(&db.courses, id).await?.is_none() {
        return Err(exam_not_found());
    }

    let back = format!("/admin/examenes/{}/preguntas", id);
    if let Some(problem) = form.problem() {
        return Ok(flash_redirect(jar, &config, problem, &back));
    }

    let question_id =
        questions::create(&db.courses, id, form.texto.trim(), &form.respuesta_correcta).await?;
    tracing::info!("Question {} added to exam {}", question_id, id);

    Ok((jar, Redirect::to(&back)).into_response())
}

pub async fn edit_question_page(
    State(db): State<Db>,
    Path(id): Path<i64>,
    page: Page,
) -> Result<Response, AppError> {
    let question = questions::find(&db.courses, id)
        .await?
        .ok_or_else(question_not_found)?;

    let layout = page.layout();
    page.render(AdminQuestionFormTemplate { layout, question })
}

pub async fn edit_question(
    State(db): State<Db>,
    State(config): State<Config>,
    Path(id): Path<i64>,
    jar: CookieJar,
    Form(form): Form<QuestionForm>,
) -> Result<Response, AppError> {
    let question = questions::find(&db.courses, id)
        .await?
        .ok_or_else(question_not_found)?;

    if let Some(problem) = form.problem() {
        return Ok(flash_redirect(
            jar,
            &config,
            problem,
            &format!("/admin/preguntas/editar/{}", id),
        ));
    }

    questions::update(&db.courses, id, form.texto.trim(), &form.respuesta_correcta).await?;

    Ok(flash_redirect(
        jar,
        &config,
        "Pregunta actualizada",
        &format!("/admin/examenes/{}/preguntas", question.exam_id),
    ))
}

pub async fn delete_question(
    State(db): State<Db>,
    State(config): State<Config>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let question = questions::find(&db.courses, id)
        .await?
        .ok_or_else(question_not_found)?;

    questions::delete(&db.courses, id).await?;

    Ok(flash_redirect(
        jar,
        &config,
        "Pregunta eliminada",
        &format!("/admin/examenes/{}/preguntas", question.exam_id),
    ))
}
