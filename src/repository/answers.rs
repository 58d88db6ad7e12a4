// src/repository/answers.rs

use sqlx::SqlitePool;

use crate::models::answer::{Answer, NewAnswer};

/// Appends one answer row. Rows are never updated or deleted here.
pub async fn record(pool: &SqlitePool, answer: &NewAnswer<'_>) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO respuestas (usuario_id, examen_id, pregunta_id, respuesta_dada, es_correcta)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(answer.user_id)
    .bind(answer.exam_id)
    .bind(answer.question_id)
    .bind(answer.given)
    .bind(answer.is_correct)
    .execute(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to record answer: {:?}", e);
        e
    })?;

    Ok(result.last_insert_rowid())
}

/// Every answer a user recorded for one exam, oldest first.
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: i64,
    exam_id: i64,
) -> Result<Vec<Answer>, sqlx::Error> {
    sqlx::query_as::<_, Answer>(
        r#"
        SELECT id, usuario_id, examen_id, pregunta_id, respuesta_dada, es_correcta, created_at
        FROM respuestas
        WHERE usuario_id = ? AND examen_id = ?
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .bind(exam_id)
    .fetch_all(pool)
    .await
}

pub async fn count_for_user(pool: &SqlitePool, user_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM respuestas WHERE usuario_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await
}
