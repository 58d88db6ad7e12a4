// src/config.rs

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

/// Lifetime of a password-reset link.
pub const RESET_TOKEN_MAX_AGE_SECS: i64 = 3600;

/// Minimum exam score (out of 10) counted as a pass.
pub const PASSING_SCORE: f64 = 7.0;

/// Profile image used when a user never uploaded one.
pub const DEFAULT_PROFILE_IMG: &str = "perfil.png";

/// Course image used when a course is created without one.
pub const DEFAULT_COURSE_IMG: &str = "curso.png";

/// Default role for self-registered users.
pub const DEFAULT_ROLE: &str = "alumno";

pub const ADMIN_ROLE: &str = "admin";

/// Outbound SMTP settings. Absent when `MAIL_SERVER` is not set, in which
/// case reset links are written to the log instead of being mailed.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub sender_name: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub users_database_url: String,
    pub courses_database_url: String,
    pub session_secret: String,
    pub session_ttl_seconds: u64,
    pub rust_log: String,
    pub bind_addr: String,
    /// Externally visible base URL, used to build links in emails.
    pub public_url: String,
    /// Root of the static tree; uploads land in its subdirectories.
    pub static_dir: PathBuf,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub admin_name: String,
    pub mail: Option<MailConfig>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let users_database_url = env::var("USERS_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://instance/usuarios.db".to_string());

        let courses_database_url = env::var("COURSES_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://instance/cursos.db".to_string());

        let session_secret = env::var("SESSION_SECRET")
            .expect("SESSION_SECRET must be set");

        let session_ttl_seconds = env::var("SESSION_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(7 * 24 * 3600);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string());

        let public_url =
            env::var("PUBLIC_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));

        let mail = env::var("MAIL_SERVER")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(|server| MailConfig {
                server,
                port: env::var("MAIL_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(587),
                username: env::var("MAIL_USERNAME").unwrap_or_default(),
                password: env::var("MAIL_PASSWORD").unwrap_or_default(),
                sender_name: env::var("MAIL_SENDER_NAME")
                    .unwrap_or_else(|_| "mljAcademy".to_string()),
            });

        Self {
            users_database_url,
            courses_database_url,
            session_secret,
            session_ttl_seconds,
            rust_log,
            bind_addr,
            public_url,
            static_dir,
            admin_email: env::var("ADMIN_EMAIL").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
            admin_name: env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrador".to_string()),
            mail,
        }
    }

    pub fn pdf_dir(&self) -> PathBuf {
        self.static_dir.join("uploads")
    }

    pub fn course_img_dir(&self) -> PathBuf {
        self.static_dir.join("img")
    }

    pub fn profile_img_dir(&self) -> PathBuf {
        self.static_dir.join("profiles")
    }
}
