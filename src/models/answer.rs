// src/models/answer.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'respuestas' table: one row per submitted answer per
/// attempt. Rows are append-only.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    #[sqlx(rename = "usuario_id")]
    pub user_id: i64,
    #[sqlx(rename = "examen_id")]
    pub exam_id: i64,
    #[sqlx(rename = "pregunta_id")]
    pub question_id: i64,
    /// `None` when the question was left unanswered.
    #[sqlx(rename = "respuesta_dada")]
    pub given: Option<String>,
    #[sqlx(rename = "es_correcta")]
    pub is_correct: bool,
    pub created_at: Option<chrono::NaiveDateTime>,
}

/// An answer about to be recorded.
#[derive(Debug, Clone)]
pub struct NewAnswer<'a> {
    pub user_id: i64,
    pub exam_id: i64,
    pub question_id: i64,
    pub given: Option<&'a str>,
    pub is_correct: bool,
}
