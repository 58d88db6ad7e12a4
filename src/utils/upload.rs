// src/utils/upload.rs

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use axum::{body::Bytes, extract::Multipart};
use chrono::Utc;
use regex::Regex;

use crate::error::AppError;

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.\-]").expect("static regex"));

/// A file part of a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// A multipart form split into text fields and non-empty file parts.
#[derive(Debug, Default)]
pub struct FormData {
    pub fields: HashMap<String, String>,
    pub files: HashMap<String, UploadedFile>,
}

impl FormData {
    /// Reads every part. File inputs left empty by the browser (no file
    /// name) are dropped.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = FormData::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field.bytes().await?;
                    if !file_name.is_empty() {
                        form.files.insert(name, UploadedFile { file_name, bytes });
                    }
                }
                None => {
                    let text = field.text().await?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    /// Text value of a field, empty when absent.
    pub fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    pub fn opt_text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }
}

/// Reduces a client-supplied file name to a safe ASCII name.
///
/// Path separators and whitespace become `_`, anything outside
/// `[A-Za-z0-9_.-]` is dropped, and leading/trailing dots and underscores
/// are stripped so the result can never escape the upload directory.
pub fn secure_filename(name: &str) -> String {
    let joined = name
        .replace(['/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");

    let cleaned = UNSAFE_CHARS.replace_all(&joined, "");
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        "archivo".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `<unix timestamp>_<sanitized name>`
pub fn timestamped_name(original: &str, timestamp: i64) -> String {
    format!("{}_{}", timestamp, secure_filename(original))
}

/// Writes an upload under `dir` (created on demand) and returns the stored
/// file name.
pub async fn save_upload(dir: &Path, file: &UploadedFile) -> Result<String, AppError> {
    let stored = timestamped_name(&file.file_name, Utc::now().timestamp());

    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(dir.join(&stored), &file.bytes).await?;

    tracing::info!("Stored upload {} in {}", stored, dir.display());
    Ok(stored)
}

/// Removes a stored upload that no row refers to.
pub async fn discard_upload(dir: &Path, stored: &str) {
    if let Err(e) = tokio::fs::remove_file(dir.join(stored)).await {
        tracing::warn!("Failed to remove orphan upload {}: {:?}", stored, e);
    }
}

/// Passes `result` through, removing the freshly stored upload under `dir`
/// when the row that refers to it could not be written.
pub async fn discard_on_error<T, E>(
    result: Result<T, E>,
    dir: &Path,
    stored: Option<&str>,
) -> Result<T, E> {
    if let (Err(_), Some(name)) = (&result, stored) {
        discard_upload(dir, name).await;
    }
    result
}
