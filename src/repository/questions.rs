// src/repository/questions.rs

use sqlx::SqlitePool;

use crate::models::question::Question;

pub async fn list_for_exam(pool: &SqlitePool, exam_id: i64) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        "SELECT id, examen_id, texto, correcta FROM preguntas WHERE examen_id = ? ORDER BY id",
    )
    .bind(exam_id)
    .fetch_all(pool)
    .await
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>("SELECT id, examen_id, texto, correcta FROM preguntas WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &SqlitePool,
    exam_id: i64,
    text: &str,
    correct: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO preguntas (examen_id, texto, correcta) VALUES (?, ?, ?)")
        .bind(exam_id)
        .bind(text)
        .bind(correct)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create question: {:?}", e);
            e
        })?;

    Ok(result.last_insert_rowid())
}

pub async fn update(pool: &SqlitePool, id: i64, text: &str, correct: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE preguntas SET texto = ?, correcta = ? WHERE id = ?")
        .bind(text)
        .bind(correct)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM preguntas WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
