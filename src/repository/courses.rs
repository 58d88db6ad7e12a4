// src/repository/courses.rs

use sqlx::SqlitePool;

use crate::models::course::{Course, CourseInput};

pub async fn list(pool: &SqlitePool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, titulo, descripcion, imagen, categoria, duracion FROM cursos ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, titulo, descripcion, imagen, categoria, duracion FROM cursos WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create(pool: &SqlitePool, input: &CourseInput) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO cursos (titulo, descripcion, categoria, duracion, imagen)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.category)
    .bind(&input.duration)
    .bind(input.image.as_deref())
    .execute(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create course: {:?}", e);
        e
    })?;

    Ok(result.last_insert_rowid())
}

pub async fn update(pool: &SqlitePool, id: i64, input: &CourseInput) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE cursos
        SET titulo = ?, descripcion = ?, categoria = ?, duracion = ?, imagen = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.category)
    .bind(&input.duration)
    .bind(input.image.as_deref())
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Deletes a course; its levels, lessons, exams, questions and recorded
/// answers go with it through the foreign-key cascades.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM cursos WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
