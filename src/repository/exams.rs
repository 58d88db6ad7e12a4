// src/repository/exams.rs

use sqlx::SqlitePool;

use crate::models::exam::Exam;

pub async fn list_for_level(pool: &SqlitePool, level_id: i64) -> Result<Vec<Exam>, sqlx::Error> {
    sqlx::query_as::<_, Exam>(
        "SELECT id, nivel_id, titulo, descripcion FROM examenes WHERE nivel_id = ? ORDER BY id",
    )
    .bind(level_id)
    .fetch_all(pool)
    .await
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Exam>, sqlx::Error> {
    sqlx::query_as::<_, Exam>("SELECT id, nivel_id, titulo, descripcion FROM examenes WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &SqlitePool,
    level_id: i64,
    title: &str,
    description: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO examenes (nivel_id, titulo, descripcion) VALUES (?, ?, ?)")
        .bind(level_id)
        .bind(title)
        .bind(description)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create exam: {:?}", e);
            e
        })?;

    Ok(result.last_insert_rowid())
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    title: &str,
    description: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE examenes SET titulo = ?, descripcion = ? WHERE id = ?")
        .bind(title)
        .bind(description)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Deletes an exam together with its questions and recorded answers.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM examenes WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
