// src/models/level.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{exam::Exam, lesson::Lesson};

/// Represents the 'niveles' table: a grouping of lessons and exams inside a
/// course, ordered by id.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Level {
    pub id: i64,
    #[sqlx(rename = "curso_id")]
    pub course_id: i64,
    #[sqlx(rename = "titulo")]
    pub title: String,
    #[sqlx(rename = "descripcion")]
    pub description: String,
}

/// A level together with its content, as shown on course pages.
#[derive(Debug, Clone, Serialize)]
pub struct LevelWithContent {
    pub level: Level,
    pub lessons: Vec<Lesson>,
    pub exams: Vec<Exam>,
}

/// Admin form for creating or editing a level.
#[derive(Debug, Deserialize)]
pub struct LevelForm {
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
}

/// Title and description of a level about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLevel {
    pub title: String,
    pub description: String,
}

/// One entry of the wizard's `niveles` list: either a bare title or an
/// object with optional `titulo` / `descripcion`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WizardLevel {
    Title(String),
    Detailed {
        titulo: Option<String>,
        descripcion: Option<String>,
    },
    Other(serde_json::Value),
}

impl WizardLevel {
    /// Entries of an unexpected shape yield `None` and are skipped.
    pub fn into_new_level(self) -> Option<NewLevel> {
        match self {
            WizardLevel::Title(title) => Some(NewLevel {
                title,
                description: String::new(),
            }),
            WizardLevel::Detailed { titulo, descripcion } => Some(NewLevel {
                title: titulo.unwrap_or_else(|| "Sin titulo".to_string()),
                description: descripcion.unwrap_or_default(),
            }),
            WizardLevel::Other(value) => {
                tracing::warn!("Skipping level entry of unexpected type: {}", value);
                None
            }
        }
    }
}

/// Body of `POST /api/cursos/agregar_niveles`.
#[derive(Debug, Deserialize)]
pub struct AddLevelsRequest {
    #[serde(default)]
    pub curso_id: serde_json::Value,
    pub niveles: Option<serde_json::Value>,
}
