// src/handlers/catalog.rs

use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::{
    error::AppError,
    models::level::LevelWithContent,
    repository::{courses, exams, lessons, levels},
    state::Db,
    utils::session::Page,
    views::{CourseDetailTemplate, CoursesTemplate, LessonTemplate},
};

/// Previous and next ids around `id` in an ordered id list.
pub fn neighbours(ids: &[i64], id: i64) -> (Option<i64>, Option<i64>) {
    match ids.iter().position(|&x| x == id) {
        Some(idx) => (
            idx.checked_sub(1).map(|i| ids[i]),
            ids.get(idx + 1).copied(),
        ),
        None => (None, None),
    }
}

pub async fn courses(State(db): State<Db>, page: Page) -> Result<Response, AppError> {
    let courses = courses::list(&db.courses).await?;

    let layout = page.layout();
    page.render(CoursesTemplate { layout, courses })
}

/// Public course page: every level with its lessons and exams.
pub async fn course_detail(
    State(db): State<Db>,
    Path(id): Path<i64>,
    page: Page,
) -> Result<Response, AppError> {
    let course = courses::find(&db.courses, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Curso no encontrado".to_string()))?;

    let mut content = Vec::new();
    for level in levels::list_for_course(&db.courses, id).await? {
        let lessons = lessons::list_for_level(&db.courses, level.id).await?;
        let exams = exams::list_for_level(&db.courses, level.id).await?;
        content.push(LevelWithContent {
            level,
            lessons,
            exams,
        });
    }

    let layout = page.layout();
    page.render(CourseDetailTemplate {
        layout,
        course,
        levels: content,
    })
}

pub async fn lesson(
    State(db): State<Db>,
    Path(id): Path<i64>,
    page: Page,
) -> Result<Response, AppError> {
    let lesson = lessons::find(&db.courses, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Lección no encontrada".to_string()))?;

    let course = match levels::course_id_of(&db.courses, lesson.level_id).await? {
        Some(course_id) => courses::find(&db.courses, course_id).await?,
        None => None,
    };

    let ids: Vec<i64> = lessons::list_for_level(&db.courses, lesson.level_id)
        .await?
        .iter()
        .map(|l| l.id)
        .collect();
    let (previous, next) = neighbours(&ids, lesson.id);

    let layout = page.layout();
    page.render(LessonTemplate {
        layout,
        lesson,
        course,
        previous,
        next,
    })
}
