// src/repository/lessons.rs

use sqlx::SqlitePool;

use crate::models::lesson::{Lesson, LessonInput};

pub async fn list_for_level(pool: &SqlitePool, level_id: i64) -> Result<Vec<Lesson>, sqlx::Error> {
    sqlx::query_as::<_, Lesson>(
        r#"
        SELECT id, nivel_id, titulo, contenido, video_url, pdf_file
        FROM lecciones
        WHERE nivel_id = ?
        ORDER BY id
        "#,
    )
    .bind(level_id)
    .fetch_all(pool)
    .await
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Lesson>, sqlx::Error> {
    sqlx::query_as::<_, Lesson>(
        "SELECT id, nivel_id, titulo, contenido, video_url, pdf_file FROM lecciones WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// `input.video_url` is expected to be normalised already.
pub async fn create(pool: &SqlitePool, level_id: i64, input: &LessonInput) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO lecciones (nivel_id, titulo, contenido, video_url, pdf_file)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(level_id)
    .bind(&input.title)
    .bind(&input.content)
    .bind(input.video_url.as_deref())
    .bind(input.pdf_file.as_deref())
    .execute(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create lesson: {:?}", e);
        e
    })?;

    Ok(result.last_insert_rowid())
}

pub async fn update(pool: &SqlitePool, id: i64, input: &LessonInput) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE lecciones
        SET titulo = ?, contenido = ?, video_url = ?, pdf_file = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.title)
    .bind(&input.content)
    .bind(input.video_url.as_deref())
    .bind(input.pdf_file.as_deref())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM lecciones WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
