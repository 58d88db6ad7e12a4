// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Represents the 'preguntas' table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    #[sqlx(rename = "examen_id")]
    pub exam_id: i64,

    /// The text content of the question.
    #[sqlx(rename = "texto")]
    pub text: String,

    /// The expected answer, compared by exact string match.
    /// Skipped during serialization so it never reaches exam takers.
    #[serde(skip)]
    #[sqlx(rename = "correcta")]
    pub correct: String,
}

/// Admin form for creating or editing a question.
#[derive(Debug, Deserialize)]
pub struct QuestionForm {
    #[serde(default)]
    pub texto: String,
    #[serde(default)]
    pub respuesta_correcta: String,
}

impl QuestionForm {
    /// Flash message for a form that must not be stored. A blank correct
    /// answer could never be matched, since blank submissions are wrong.
    pub fn problem(&self) -> Option<&'static str> {
        if self.texto.trim().is_empty() {
            Some("La pregunta no puede estar vacía")
        } else if self.respuesta_correcta.trim().is_empty() {
            Some("La respuesta correcta no puede estar vacía")
        } else {
            None
        }
    }
}
