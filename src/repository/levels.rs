// src/repository/levels.rs

use sqlx::SqlitePool;

use crate::models::level::{Level, NewLevel};

pub async fn list_for_course(pool: &SqlitePool, course_id: i64) -> Result<Vec<Level>, sqlx::Error> {
    sqlx::query_as::<_, Level>(
        "SELECT id, curso_id, titulo, descripcion FROM niveles WHERE curso_id = ? ORDER BY id",
    )
    .bind(course_id)
    .fetch_all(pool)
    .await
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Level>, sqlx::Error> {
    sqlx::query_as::<_, Level>(
        "SELECT id, curso_id, titulo, descripcion FROM niveles WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn course_id_of(pool: &SqlitePool, level_id: i64) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT curso_id FROM niveles WHERE id = ?")
        .bind(level_id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &SqlitePool, course_id: i64, level: &NewLevel) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO niveles (curso_id, titulo, descripcion) VALUES (?, ?, ?)")
        .bind(course_id)
        .bind(&level.title)
        .bind(&level.description)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create level: {:?}", e);
            e
        })?;

    Ok(result.last_insert_rowid())
}

/// Inserts every level in one transaction. Any database error rolls the whole
/// batch back, so either all ids are returned or nothing is stored.
pub async fn insert_many(
    pool: &SqlitePool,
    course_id: i64,
    levels: &[NewLevel],
) -> Result<Vec<i64>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut ids = Vec::with_capacity(levels.len());

    for level in levels {
        let result =
            sqlx::query("INSERT INTO niveles (curso_id, titulo, descripcion) VALUES (?, ?, ?)")
                .bind(course_id)
                .bind(&level.title)
                .bind(&level.description)
                .execute(&mut *tx)
                .await;

        match result {
            Ok(done) => ids.push(done.last_insert_rowid()),
            Err(e) => {
                tracing::error!("Failed to insert level batch for course {}: {:?}", course_id, e);
                tx.rollback().await?;
                return Err(e);
            }
        }
    }

    tx.commit().await?;
    tracing::info!("Levels created for course {}: {:?}", course_id, ids);
    Ok(ids)
}

pub async fn update(pool: &SqlitePool, id: i64, level: &NewLevel) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE niveles SET titulo = ?, descripcion = ? WHERE id = ?")
        .bind(&level.title)
        .bind(&level.description)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Deletes a level with its lessons and exams. The parent course stays.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM niveles WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
