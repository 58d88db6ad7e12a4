// src/handlers/api.rs

//! JSON endpoints behind the course creation wizard.

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State},
};
use serde_json::{Value, json};

use crate::{
    config::Config,
    error::{ApiError, AppError},
    models::{
        course::CourseInput,
        level::{AddLevelsRequest, NewLevel, WizardLevel},
    },
    repository::{courses, lessons, levels},
    state::Db,
    utils::upload::{FormData, discard_on_error, save_upload},
};

use super::admin_content::{lesson_input, store_pdf};

const WIZARD_CATEGORY: &str = "General";
const WIZARD_DURATION: &str = "1h";

/// Reads an id sent either as a JSON number or as a numeric string.
pub fn parse_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Step 1: creates the course with wizard defaults.
pub async fn create_course(
    State(db): State<Db>,
    State(config): State<Config>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let form = FormData::read(multipart).await?;

    let title = form.text("titulo").trim().to_string();
    if title.is_empty() {
        return Err(AppError::BadRequest("titulo is required".to_string()).into());
    }

    let image = match form.file("imagen") {
        Some(file) => Some(save_upload(&config.course_img_dir(), file).await?),
        None => None,
    };

    let input = CourseInput {
        title,
        description: form.text("descripcion"),
        category: WIZARD_CATEGORY.to_string(),
        duration: WIZARD_DURATION.to_string(),
        image,
    };

    let created = discard_on_error(
        courses::create(&db.courses, &input).await,
        &config.course_img_dir(),
        input.image.as_deref(),
    )
    .await;
    let id = created.map_err(|e| {
        tracing::error!("Wizard failed to create course: {:?}", e);
        AppError::from(e)
    })?;
    tracing::info!("Wizard created course {}", id);

    Ok(Json(json!({ "success": true, "curso_id": id })))
}

/// Step 2: adds a batch of levels to an existing course.
///
/// All levels are stored in one transaction; on a database error none of
/// them is kept.
pub async fn add_levels(State(db): State<Db>, body: Bytes) -> Result<Json<Value>, ApiError> {
    let request: AddLevelsRequest = serde_json::from_slice(&body)?;

    let entries = match request.niveles {
        Some(Value::Array(entries)) => entries,
        _ => return Err(AppError::BadRequest("niveles must be a list".to_string()).into()),
    };

    let course_id = parse_id(&request.curso_id)
        .ok_or_else(|| AppError::BadRequest("curso_id is not a valid id".to_string()))?;

    if courses::find(&db.courses, course_id).await?.is_none() {
        return Err(AppError::BadRequest(format!("course {} does not exist", course_id)).into());
    }

    let new_levels: Vec<NewLevel> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<WizardLevel>(entry).ok())
        .filter_map(WizardLevel::into_new_level)
        .collect();

    let ids = levels::insert_many(&db.courses, course_id, &new_levels).await?;

    Ok(Json(json!({ "status": "ok", "nivel_ids": ids })))
}

/// Step 3: adds one lesson (optionally with a PDF) to a level.
pub async fn add_lesson(
    State(db): State<Db>,
    State(config): State<Config>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let form = FormData::read(multipart).await?;

    let level_id = parse_id(&Value::String(form.text("nivel_id")))
        .ok_or_else(|| AppError::BadRequest("nivel_id is not a valid id".to_string()))?;

    if levels::find(&db.courses, level_id).await?.is_none() {
        tracing::error!("Wizard lesson refers to missing level {}", level_id);
        return Err(AppError::InternalServerError(format!("level {} does not exist", level_id)).into());
    }

    let mut input = lesson_input(&form);
    input.pdf_file = store_pdf(&form, &config).await?;

    let created = discard_on_error(
        lessons::create(&db.courses, level_id, &input).await,
        &config.pdf_dir(),
        input.pdf_file.as_deref(),
    )
    .await;
    let id = created.map_err(|e| {
        tracing::error!("Wizard failed to add lesson to level {}: {:?}", level_id, e);
        AppError::from(e)
    })?;

    Ok(Json(json!({ "status": "ok", "leccion_id": id })))
}
