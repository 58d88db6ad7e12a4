// src/models/course.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::config::DEFAULT_COURSE_IMG;

/// Represents the 'cursos' table in the courses store.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,

    #[sqlx(rename = "titulo")]
    pub title: String,

    #[sqlx(rename = "descripcion")]
    pub description: String,

    /// File name under the course image directory.
    #[sqlx(rename = "imagen")]
    pub image: Option<String>,

    #[sqlx(rename = "categoria")]
    pub category: String,

    /// Free-text duration, e.g. "1h" or "6 semanas".
    #[sqlx(rename = "duracion")]
    pub duration: String,
}

impl Course {
    pub fn image_or_default(&self) -> String {
        self.image
            .clone()
            .filter(|img| !img.is_empty())
            .unwrap_or_else(|| DEFAULT_COURSE_IMG.to_string())
    }
}

/// Field values for creating or editing a course.
#[derive(Debug, Clone, Default)]
pub struct CourseInput {
    pub title: String,
    pub description: String,
    pub category: String,
    pub duration: String,
    pub image: Option<String>,
}
