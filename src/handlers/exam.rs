// src/handlers/exam.rs

use std::collections::HashMap;

use axum::{
    Extension, Form,
    extract::{Path, State},
    response::Response,
};

use crate::{
    config::PASSING_SCORE,
    error::AppError,
    models::{answer::NewAnswer, exam::ExamResult},
    repository::{answers, exams, questions},
    state::Db,
    utils::session::{Page, SessionUser},
    views::{ExamResultTemplate, ExamTemplate},
};

/// Grade out of 10 rounded to two decimals. An exam without questions scores
/// 0 and is never passed.
pub fn calculate_score(correct: usize, total: usize) -> ExamResult {
    if total == 0 {
        return ExamResult {
            score: 0.0,
            correct: 0,
            total: 0,
            passed: false,
        };
    }

    let raw = correct as f64 * 10.0 / total as f64;
    let score = (raw * 100.0).round() / 100.0;

    ExamResult {
        score,
        correct,
        total,
        passed: score >= PASSING_SCORE,
    }
}

/// Exam form plus a summary of the answers this user already recorded for it.
pub async fn show(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Extension(user): Extension<SessionUser>,
    page: Page,
) -> Result<Response, AppError> {
    let exam = exams::find(&db.courses, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Examen no encontrado".to_string()))?;
    let questions = questions::list_for_exam(&db.courses, id).await?;
    let history = answers::list_for_user(&db.courses, user.id, id).await?;

    let layout = page.layout();
    page.render(ExamTemplate {
        layout,
        exam,
        questions,
        answered: history.len(),
        answered_correct: history.iter().filter(|a| a.is_correct).count(),
    })
}

/// Grades a submission keyed by question id.
///
/// Every question gets one answer row, including unanswered ones, which are
/// stored without a value and counted as wrong. Any other text is stored as
/// submitted.
pub async fn submit(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Extension(user): Extension<SessionUser>,
    page: Page,
    Form(submitted): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let exam = exams::find(&db.courses, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Examen no encontrado".to_string()))?;
    let questions = questions::list_for_exam(&db.courses, id).await?;

    let mut correct = 0;
    for question in &questions {
        let given = submitted
            .get(&question.id.to_string())
            .map(String::as_str)
            .filter(|answer| !answer.is_empty());
        let is_correct = given == Some(question.correct.as_str());
        if is_correct {
            correct += 1;
        }

        answers::record(
            &db.courses,
            &NewAnswer {
                user_id: user.id,
                exam_id: id,
                question_id: question.id,
                given,
                is_correct,
            },
        )
        .await?;
    }

    let result = calculate_score(correct, questions.len());
    tracing::info!(
        "User {} scored {:.2} on exam {} ({}/{})",
        user.id,
        result.score,
        id,
        result.correct,
        result.total
    );

    let layout = page.layout();
    page.render(ExamResultTemplate {
        layout,
        exam,
        score: format!("{:.2}", result.score),
        correct: result.correct,
        total: result.total,
        passed: result.passed,
    })
}
