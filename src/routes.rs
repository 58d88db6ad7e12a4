// src/routes.rs

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{
        admin_content, admin_courses, admin_exams, admin_users, api, auth, catalog, exam, pages,
        password, profile,
    },
    state::AppState,
    utils::session::{require_admin, require_login},
};

/// Assembles the main application router.
///
/// * Public pages, auth and the course catalogue are open.
/// * Profile and exams sit behind the login guard.
/// * Admin screens and wizard endpoints sit behind the admin guard.
/// * `/static` serves assets and uploads from the configured directory.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(pages::home))
        .route("/sobre", get(pages::about))
        .route("/ubicacion", get(pages::location))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/registro", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
        .route("/recuperar", get(password::recover_page).post(password::recover))
        .route("/reset/{token}", get(password::reset_page).post(password::reset))
        .route("/cursos", get(catalog::courses))
        .route("/cursos/{id}", get(catalog::course_detail))
        .route("/leccion/{id}", get(catalog::lesson));

    let member_routes = Router::new()
        .route("/perfil", get(profile::show).post(profile::update))
        .route("/examen/{id}", get(exam::show))
        .route("/examen/{id}/resolver", post(exam::submit))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_login,
        ));

    let admin_routes = Router::new()
        .route("/cursos", get(admin_courses::list))
        .route(
            "/cursos/agregar",
            get(admin_courses::add_page).post(admin_courses::add),
        )
        .route(
            "/cursos/editar/{id}",
            get(admin_courses::edit_page).post(admin_courses::edit),
        )
        .route("/cursos/borrar/{id}", get(admin_courses::delete))
        .route(
            "/cursos/{id}/niveles",
            get(admin_content::list_levels).post(admin_content::add_level),
        )
        .route("/niveles/{id}", get(admin_content::level_detail))
        .route(
            "/niveles/editar/{id}",
            get(admin_content::edit_level_page).post(admin_content::edit_level),
        )
        .route("/niveles/borrar/{id}", get(admin_content::delete_level))
        .route("/niveles/{id}/lecciones", post(admin_content::add_lesson))
        .route(
            "/lecciones/editar/{id}",
            get(admin_content::edit_lesson_page).post(admin_content::edit_lesson),
        )
        .route("/lecciones/borrar/{id}", get(admin_content::delete_lesson))
        .route(
            "/examenes/agregar/{nivel_id}",
            get(admin_exams::add_exam_page).post(admin_exams::add_exam),
        )
        .route(
            "/examenes/{id}/preguntas",
            get(admin_exams::questions_page).post(admin_exams::add_question),
        )
        .route(
            "/examenes/editar/{id}",
            get(admin_exams::edit_exam_page).post(admin_exams::edit_exam),
        )
        .route("/examenes/eliminar/{id}", get(admin_exams::delete_exam))
        .route(
            "/preguntas/editar/{id}",
            get(admin_exams::edit_question_page).post(admin_exams::edit_question),
        )
        .route("/preguntas/borrar/{id}", get(admin_exams::delete_question))
        .route("/usuarios", get(admin_users::list))
        .route("/usuarios/rol/{id}/{rol}", get(admin_users::set_role))
        .route("/usuarios/borrar/{id}", get(admin_users::delete))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    let api_routes = Router::new()
        .route("/cursos/crear", post(api::create_course))
        .route("/cursos/agregar_niveles", post(api::add_levels))
        .route("/cursos/agregar_leccion", post(api::add_lesson))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .merge(public_routes)
        .merge(member_routes)
        .nest("/admin", admin_routes)
        .nest("/api", api_routes)
        .nest_service("/static", static_files)
        // Global Middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
