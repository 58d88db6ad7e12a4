// src/models/exam.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'examenes' table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Exam {
    pub id: i64,
    #[sqlx(rename = "nivel_id")]
    pub level_id: i64,
    #[sqlx(rename = "titulo")]
    pub title: String,
    #[sqlx(rename = "descripcion")]
    pub description: String,
}

/// Admin form for creating or editing an exam.
#[derive(Debug, Deserialize)]
pub struct ExamForm {
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
}

/// Outcome of one exam attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExamResult {
    /// Out of 10, rounded to two decimals.
    pub score: f64,
    pub correct: usize,
    pub total: usize,
    pub passed: bool,
}
