use crate::config::Config;
use axum::extract::FromRef;
use sqlx::SqlitePool;

/// The two physically separate stores.
#[derive(Clone)]
pub struct Db {
    /// `usuarios`
    pub users: SqlitePool,
    /// `cursos`, `niveles`, `lecciones`, `examenes`, `preguntas`, `respuestas`
    pub courses: SqlitePool,
}

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
}

impl FromRef<AppState> for Db {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
