// src/main.rs

use academia::config::Config;
use academia::db;
use academia::routes;
use academia::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment (.env included)
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Upload folders must exist before the first request
    for dir in [
        config.pdf_dir(),
        config.course_img_dir(),
        config.profile_img_dir(),
    ] {
        if let Err(e) = std::fs::create_dir_all(&dir) {
            panic!("Failed to create upload directory {}: {}", dir.display(), e);
        }
    }

    // Connect both stores and run migrations
    let db = match db::init(&config).await {
        Ok(db) => db,
        Err(e) => panic!("Failed to initialise databases: {}", e),
    };
    tracing::info!("Databases connected...");

    // Seed Admin User
    if let Err(e) = db::seed_admin_user(&db.users, &config).await {
        tracing::error!("Failed to seed admin user: {:?}", e);
    }

    let addr = config.bind_addr.clone();
    let state = AppState { db, config };

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => panic!("Failed to bind {}: {}", addr, e),
    };
    tracing::info!("Listening on {}", addr);

    // Start the server
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}
