// src/repository/users.rs

use sqlx::SqlitePool;

use crate::models::user::User;

const USER_COLUMNS: &str = "id, nombre, correo, contrasena, rol, profile_img";

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM usuarios WHERE correo = ?"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM usuarios WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Inserts a user. Returns `Ok(None)` when the email is already taken.
pub async fn create(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password_hash: &str,
    role: &str,
    profile_img: &str,
) -> Result<Option<i64>, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO usuarios (nombre, correo, contrasena, rol, profile_img)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .bind(profile_img)
    .execute(pool)
    .await;

    match result {
        Ok(done) => Ok(Some(done.last_insert_rowid())),
        Err(e) if is_unique_violation(&e) => Ok(None),
        Err(e) => {
            tracing::error!("Failed to create user: {:?}", e);
            Err(e)
        }
    }
}

/// All users, ordered by role then name.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM usuarios ORDER BY rol, nombre"
    ))
    .fetch_all(pool)
    .await
}

/// Stores `role` verbatim. Concurrent updates are last-write-wins.
pub async fn update_role(pool: &SqlitePool, id: i64, role: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE usuarios SET rol = ? WHERE id = ?")
        .bind(role)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn update_password(
    pool: &SqlitePool,
    id: i64,
    password_hash: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE usuarios SET contrasena = ? WHERE id = ?")
        .bind(password_hash)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Changes of the profile page. `None` fields are left untouched.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub profile_img: Option<String>,
}

/// Applies a profile update. Returns `Ok(false)` when the new email belongs
/// to another account; nothing is changed in that case.
pub async fn update_profile(
    pool: &SqlitePool,
    id: i64,
    update: &ProfileUpdate,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE usuarios SET
            nombre = COALESCE(?, nombre),
            correo = COALESCE(?, correo),
            profile_img = COALESCE(?, profile_img)
        WHERE id = ?
        "#,
    )
    .bind(update.name.as_deref())
    .bind(update.email.as_deref())
    .bind(update.profile_img.as_deref())
    .bind(id)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(true),
        Err(e) if is_unique_violation(&e) => Ok(false),
        Err(e) => {
            tracing::error!("Failed to update profile {}: {:?}", id, e);
            Err(e)
        }
    }
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM usuarios WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
