// src/models/lesson.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::{html::clean_html, youtube::playable_url};

/// Represents the 'lecciones' table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Lesson {
    pub id: i64,
    #[sqlx(rename = "nivel_id")]
    pub level_id: i64,
    #[sqlx(rename = "titulo")]
    pub title: String,
    /// Admin-authored HTML body.
    #[sqlx(rename = "contenido")]
    pub content: String,
    /// Already normalised to an embeddable URL when it points at YouTube.
    pub video_url: Option<String>,
    /// File name under the PDF upload directory.
    pub pdf_file: Option<String>,
}

impl Lesson {
    /// Body with scripts, event handlers and other unsafe markup removed.
    pub fn safe_content(&self) -> String {
        clean_html(&self.content)
    }

    /// Iframe source, empty unless the stored URL is plain `http`/`https`.
    pub fn video(&self) -> String {
        self.video_url
            .as_deref()
            .and_then(playable_url)
            .unwrap_or_default()
    }

    pub fn pdf(&self) -> String {
        self.pdf_file.clone().unwrap_or_default()
    }
}

/// Field values for creating or editing a lesson.
#[derive(Debug, Clone, Default)]
pub struct LessonInput {
    pub title: String,
    pub content: String,
    pub video_url: Option<String>,
    pub pdf_file: Option<String>,
}
