// src/db.rs

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::config::{ADMIN_ROLE, Config, DEFAULT_PROFILE_IMG};
use crate::error::AppError;
use crate::repository::users;
use crate::state::Db;
use crate::utils::hash::hash_password;

static USERS_MIGRATOR: Migrator = sqlx::migrate!("./migrations/users");
static COURSES_MIGRATOR: Migrator = sqlx::migrate!("./migrations/courses");

/// Opens a pool on one SQLite file, creating the file (and its directory)
/// when missing. Foreign keys are switched on for every connection so the
/// `ON DELETE CASCADE` clauses take effect.
pub async fn connect(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
        }
    }

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await
}

/// Connects both stores and applies their migrations.
pub async fn init(config: &Config) -> Result<Db, AppError> {
    let users = connect(&config.users_database_url).await?;
    let courses = connect(&config.courses_database_url).await?;

    tracing::info!("Running migrations...");
    USERS_MIGRATOR
        .run(&users)
        .await
        .map_err(|e| AppError::InternalServerError(format!("users migrations: {}", e)))?;
    COURSES_MIGRATOR
        .run(&courses)
        .await
        .map_err(|e| AppError::InternalServerError(format!("courses migrations: {}", e)))?;
    tracing::info!("Migrations applied successfully.");

    Ok(Db { users, courses })
}

/// Creates the configured administrator account once. Does nothing when no
/// admin credentials are configured or the email is already registered.
pub async fn seed_admin_user(pool: &SqlitePool, config: &Config) -> Result<(), AppError> {
    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        if users::find_by_email(pool, email).await?.is_none() {
            tracing::info!("Seeding admin user: {}", email);
            let hashed_password = hash_password(password)?;

            users::create(
                pool,
                &config.admin_name,
                email,
                &hashed_password,
                ADMIN_ROLE,
                DEFAULT_PROFILE_IMG,
            )
            .await?;
            tracing::info!("Admin user created successfully.");
        }
    }
    Ok(())
}
