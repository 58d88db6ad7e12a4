// tests/common/mod.rs

#![allow(dead_code)]

use academia::{
    config::{ADMIN_ROLE, Config, DEFAULT_PROFILE_IMG, DEFAULT_ROLE},
    db, routes,
    repository::users,
    state::{AppState, Db},
    utils::hash::hash_password,
};
use tempfile::TempDir;

pub struct TestApp {
    pub address: String,
    pub db: Db,
    pub config: Config,
    // Keeps the SQLite files and uploads alive for the duration of the test.
    _dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

pub fn test_config(dir: &TempDir) -> Config {
    Config {
        users_database_url: format!("sqlite://{}", dir.path().join("usuarios.db").display()),
        courses_database_url: format!("sqlite://{}", dir.path().join("cursos.db").display()),
        session_secret: "test_secret_for_integration_tests".to_string(),
        session_ttl_seconds: 600,
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        public_url: "http://localhost:5000".to_string(),
        static_dir: dir.path().join("static"),
        admin_email: None,
        admin_password: None,
        admin_name: "Administrador".to_string(),
        mail: None,
    }
}

/// Spawns the app on a random port, backed by fresh SQLite files.
pub async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(&dir);

    let db = db::init(&config).await.expect("Failed to initialise databases");

    let state = AppState {
        db: db.clone(),
        config: config.clone(),
    };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address,
        db,
        config,
        _dir: dir,
    }
}

/// Browser-like client: keeps cookies, does not follow redirects.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

pub fn unique_email(prefix: &str) -> String {
    format!("{}_{}@example.com", prefix, &uuid::Uuid::new_v4().to_string()[..8])
}

pub fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub async fn insert_user(app: &TestApp, email: &str, password: &str, role: &str) -> i64 {
    let hashed = hash_password(password).unwrap();
    users::create(&app.db.users, "Usuario Test", email, &hashed, role, DEFAULT_PROFILE_IMG)
        .await
        .unwrap()
        .expect("email already taken")
}

pub async fn login(app: &TestApp, client: &reqwest::Client, email: &str, password: &str) -> reqwest::Response {
    client
        .post(app.url("/login"))
        .form(&[("correo", email), ("contrasena", password)])
        .send()
        .await
        .expect("Failed to execute request")
}

/// Creates a student account and logs `client` in with it.
pub async fn login_as_student(app: &TestApp, client: &reqwest::Client) -> i64 {
    let email = unique_email("alumno");
    let id = insert_user(app, &email, "password123", DEFAULT_ROLE).await;
    let response = login(app, client, &email, "password123").await;
    assert_eq!(response.status().as_u16(), 303);
    id
}

/// Creates an admin account and logs `client` in with it.
pub async fn login_as_admin(app: &TestApp, client: &reqwest::Client) -> i64 {
    let email = unique_email("admin");
    let id = insert_user(app, &email, "password123", ADMIN_ROLE).await;
    let response = login(app, client, &email, "password123").await;
    assert_eq!(response.status().as_u16(), 303);
    id
}
