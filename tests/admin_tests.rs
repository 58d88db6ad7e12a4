// tests/admin_tests.rs

mod common;

use academia::{
    models::{course::CourseInput, lesson::LessonInput, level::NewLevel},
    repository::{courses, exams, lessons, levels, questions, users},
};
use common::{TestApp, client, location, login_as_admin, login_as_student, spawn_app};

struct Seeded {
    course_id: i64,
    level_id: i64,
    lesson_id: i64,
    exam_id: i64,
    question_id: i64,
}

async fn seed_course(app: &TestApp) -> Seeded {
    let course_id = courses::create(
        &app.db.courses,
        &CourseInput {
            title: "Historia".to_string(),
            description: "Historia universal".to_string(),
            category: "Humanidades".to_string(),
            duration: "2h".to_string(),
            image: None,
        },
    )
    .await
    .unwrap();
    let level_id = levels::create(
        &app.db.courses,
        course_id,
        &NewLevel {
            title: "Antigüedad".to_string(),
            description: String::new(),
        },
    )
    .await
    .unwrap();
    let lesson_id = lessons::create(
        &app.db.courses,
        level_id,
        &LessonInput {
            title: "Egipto".to_string(),
            content: "<p>El Nilo</p>".to_string(),
            video_url: None,
            pdf_file: None,
        },
    )
    .await
    .unwrap();
    let exam_id = exams::create(&app.db.courses, level_id, "Repaso", "").await.unwrap();
    let question_id = questions::create(&app.db.courses, exam_id, "¿Río de Egipto?", "Nilo")
        .await
        .unwrap();

    Seeded {
        course_id,
        level_id,
        lesson_id,
        exam_id,
        question_id,
    }
}

#[tokio::test]
async fn admin_pages_redirect_non_admins_home_with_flash() {
    let app = spawn_app().await;
    let client = client();
    login_as_student(&app, &client).await;

    let response = client.get(app.url("/admin/cursos")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/");

    let home = client.get(app.url("/")).send().await.unwrap().text().await.unwrap();
    assert!(home.contains("Acceso denegado. Se requiere ser administrador."));
}

#[tokio::test]
async fn admin_posts_from_non_admins_get_403_json() {
    let app = spawn_app().await;

    // Anonymous
    let response = client()
        .post(app.url("/api/cursos/agregar_niveles"))
        .json(&serde_json::json!({ "curso_id": 1, "niveles": ["A"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 403);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "forbidden");

    // Logged-in student
    let client = client();
    login_as_student(&app, &client).await;
    let response = client
        .post(app.url("/admin/cursos/agregar"))
        .multipart(reqwest::multipart::Form::new().text("titulo", "Hack"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 403);
    assert!(courses::list(&app.db.courses).await.unwrap().is_empty());
}

#[tokio::test]
async fn revoked_admins_lose_access_at_once() {
    let app = spawn_app().await;
    let client = client();
    let admin_id = login_as_admin(&app, &client).await;

    let response = client.get(app.url("/admin/usuarios")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);

    // Demoted while the session cookie still says "admin"
    users::update_role(&app.db.users, admin_id, "alumno").await.unwrap();
    let response = client.get(app.url("/admin/usuarios")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/");

    // Deleted: API calls are refused and member pages send back to login
    users::update_role(&app.db.users, admin_id, "admin").await.unwrap();
    users::delete(&app.db.users, admin_id).await.unwrap();
    let response = client
        .post(app.url("/api/cursos/agregar_niveles"))
        .json(&serde_json::json!({ "curso_id": 1, "niveles": ["A"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 403);

    let response = client.get(app.url("/perfil")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn rejected_course_form_keeps_no_image() {
    let app = spawn_app().await;
    let client = client();
    login_as_admin(&app, &client).await;

    let image = reqwest::multipart::Part::bytes(vec![0x89, b'P', b'N', b'G']).file_name("portada.png");
    let form = reqwest::multipart::Form::new()
        .text("titulo", "   ")
        .part("imagen", image);
    let response = client
        .post(app.url("/admin/cursos/agregar"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), "/admin/cursos/agregar");

    assert!(courses::list(&app.db.courses).await.unwrap().is_empty());
    let stored = std::fs::read_dir(app.config.course_img_dir())
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn admin_creates_and_edits_a_course() {
    let app = spawn_app().await;
    let client = client();
    login_as_admin(&app, &client).await;

    let form = reqwest::multipart::Form::new()
        .text("titulo", "Programación")
        .text("descripcion", "Rust desde cero")
        .text("categoria", "Tecnología")
        .text("duracion", "6 semanas");
    let response = client
        .post(app.url("/admin/cursos/agregar"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/admin/cursos");

    let list = client.get(app.url("/admin/cursos")).send().await.unwrap().text().await.unwrap();
    assert!(list.contains("Curso agregado correctamente"));
    assert!(list.contains("Programación"));

    let course = courses::list(&app.db.courses).await.unwrap().remove(0);
    assert_eq!(course.image.as_deref(), Some("curso.png"));
    assert_eq!(course.duration, "6 semanas");

    // New image replaces the default
    let image = reqwest::multipart::Part::bytes(vec![1, 2, 3]).file_name("portada.png");
    let form = reqwest::multipart::Form::new()
        .text("titulo", "Programación en Rust")
        .text("descripcion", "Rust desde cero")
        .part("imagen", image);
    client
        .post(app.url(&format!("/admin/cursos/editar/{}", course.id)))
        .multipart(form)
        .send()
        .await
        .unwrap();

    let edited = courses::find(&app.db.courses, course.id).await.unwrap().unwrap();
    assert_eq!(edited.title, "Programación en Rust");
    let image = edited.image.clone().unwrap();
    assert!(image.ends_with("_portada.png"));
    assert!(app.config.course_img_dir().join(&image).exists());

    // No file keeps the stored image
    let form = reqwest::multipart::Form::new()
        .text("titulo", "Rust")
        .text("descripcion", "");
    client
        .post(app.url(&format!("/admin/cursos/editar/{}", course.id)))
        .multipart(form)
        .send()
        .await
        .unwrap();
    let edited = courses::find(&app.db.courses, course.id).await.unwrap().unwrap();
    assert_eq!(edited.title, "Rust");
    assert_eq!(edited.image.as_deref(), Some(image.as_str()));
}

#[tokio::test]
async fn deleting_a_course_cascades() {
    let app = spawn_app().await;
    let client = client();
    login_as_admin(&app, &client).await;
    let seeded = seed_course(&app).await;

    let response = client
        .get(app.url(&format!("/admin/cursos/borrar/{}", seeded.course_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/admin/cursos");

    let db = &app.db.courses;
    assert!(courses::find(db, seeded.course_id).await.unwrap().is_none());
    assert!(levels::find(db, seeded.level_id).await.unwrap().is_none());
    assert!(lessons::find(db, seeded.lesson_id).await.unwrap().is_none());
    assert!(exams::find(db, seeded.exam_id).await.unwrap().is_none());
    assert!(questions::find(db, seeded.question_id).await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_a_level_keeps_the_course() {
    let app = spawn_app().await;
    let client = client();
    login_as_admin(&app, &client).await;
    let seeded = seed_course(&app).await;

    let response = client
        .get(app.url(&format!("/admin/niveles/borrar/{}", seeded.level_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(
        location(&response),
        format!("/admin/cursos/{}/niveles", seeded.course_id)
    );

    let db = &app.db.courses;
    assert!(courses::find(db, seeded.course_id).await.unwrap().is_some());
    assert!(levels::find(db, seeded.level_id).await.unwrap().is_none());
    assert!(lessons::find(db, seeded.lesson_id).await.unwrap().is_none());
    assert!(exams::find(db, seeded.exam_id).await.unwrap().is_none());
    assert!(questions::find(db, seeded.question_id).await.unwrap().is_none());
}

#[tokio::test]
async fn lesson_video_links_are_normalised() {
    let app = spawn_app().await;
    let client = client();
    login_as_admin(&app, &client).await;
    let seeded = seed_course(&app).await;

    let pdf = reqwest::multipart::Part::bytes(b"%PDF-1.4".to_vec()).file_name("tema 1.pdf");
    let form = reqwest::multipart::Form::new()
        .text("titulo", "Mesopotamia")
        .text("contenido", "<p>Tigris</p><script>alert(1)</script>")
        .text("video_url", "https://www.youtube.com/watch?v=abc123&t=10s")
        .part("pdf", pdf);
    let response = client
        .post(app.url(&format!("/admin/niveles/{}/lecciones", seeded.level_id)))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), format!("/admin/niveles/{}", seeded.level_id));

    let lesson = lessons::list_for_level(&app.db.courses, seeded.level_id)
        .await
        .unwrap()
        .into_iter()
        .find(|l| l.title == "Mesopotamia")
        .unwrap();
    assert_eq!(
        lesson.video_url.as_deref(),
        Some("https://www.youtube.com/embed/abc123")
    );
    let pdf = lesson.pdf_file.clone().unwrap();
    assert!(pdf.ends_with("_tema_1.pdf"));
    assert!(app.config.pdf_dir().join(&pdf).exists());

    // Public lesson page sanitises the admin HTML and links neighbours
    let page = client
        .get(app.url(&format!("/leccion/{}", lesson.id)))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("<p>Tigris</p>"));
    assert!(!page.contains("<script>alert(1)</script>"));
    assert!(page.contains(&format!("/leccion/{}", seeded.lesson_id)));
}

#[tokio::test]
async fn lesson_video_with_script_scheme_is_not_embedded() {
    let app = spawn_app().await;
    let client = client();
    login_as_admin(&app, &client).await;
    let seeded = seed_course(&app).await;

    let form = reqwest::multipart::Form::new()
        .text("titulo", "Ur")
        .text("contenido", "<p>Zigurat</p>")
        .text("video_url", "javascript:alert(document.domain)");
    let response = client
        .post(app.url(&format!("/admin/niveles/{}/lecciones", seeded.level_id)))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), format!("/admin/niveles/{}", seeded.level_id));

    let lesson = lessons::list_for_level(&app.db.courses, seeded.level_id)
        .await
        .unwrap()
        .into_iter()
        .find(|l| l.title == "Ur")
        .unwrap();

    let page = client
        .get(app.url(&format!("/leccion/{}", lesson.id)))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("<p>Zigurat</p>"));
    assert!(!page.contains("<iframe"));
    assert!(!page.contains("javascript:"));
}

#[tokio::test]
async fn exam_and_question_admin_flow() {
    let app = spawn_app().await;
    let client = client();
    login_as_admin(&app, &client).await;
    let seeded = seed_course(&app).await;

    let response = client
        .post(app.url(&format!("/admin/examenes/agregar/{}", seeded.level_id)))
        .form(&[("titulo", "Final"), ("descripcion", "Examen final")])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), format!("/admin/niveles/{}", seeded.level_id));

    let exam = exams::list_for_level(&app.db.courses, seeded.level_id)
        .await
        .unwrap()
        .into_iter()
        .find(|e| e.title == "Final")
        .unwrap();

    client
        .post(app.url(&format!("/admin/examenes/{}/preguntas", exam.id)))
        .form(&[("texto", "¿Capital de Egipto?"), ("respuesta_correcta", "El Cairo")])
        .send()
        .await
        .unwrap();

    let page = client
        .get(app.url(&format!("/admin/examenes/{}/preguntas", exam.id)))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("El Cairo"));

    let response = client
        .get(app.url(&format!("/admin/examenes/eliminar/{}", exam.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), format!("/admin/niveles/{}", seeded.level_id));
    assert!(exams::find(&app.db.courses, exam.id).await.unwrap().is_none());
    assert!(questions::list_for_exam(&app.db.courses, exam.id).await.unwrap().is_empty());

    let response = client
        .get(app.url(&format!("/admin/examenes/eliminar/{}", exam.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(response.text().await.unwrap(), "Examen no encontrado");
}

#[tokio::test]
async fn questions_need_a_correct_answer() {
    let app = spawn_app().await;
    let client = client();
    login_as_admin(&app, &client).await;
    let seeded = seed_course(&app).await;
    let back = format!("/admin/examenes/{}/preguntas", seeded.exam_id);

    let response = client
        .post(app.url(&back))
        .form(&[("texto", "¿Capital de Asiria?"), ("respuesta_correcta", "  ")])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), back);

    let stored = questions::list_for_exam(&app.db.courses, seeded.exam_id).await.unwrap();
    assert!(stored.iter().all(|q| q.text != "¿Capital de Asiria?"));

    let page = client.get(app.url(&back)).send().await.unwrap().text().await.unwrap();
    assert!(page.contains("La respuesta correcta no puede estar vacía"));

    // Editing cannot blank the answer of an existing question either
    let response = client
        .post(app.url(&format!("/admin/preguntas/editar/{}", seeded.question_id)))
        .form(&[("texto", "Otra"), ("respuesta_correcta", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(
        location(&response),
        format!("/admin/preguntas/editar/{}", seeded.question_id)
    );
    let question = questions::find(&app.db.courses, seeded.question_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(question.correct, "Nilo");
}

#[tokio::test]
async fn role_updates_are_last_write_wins() {
    let app = spawn_app().await;
    let client = client();
    login_as_admin(&app, &client).await;
    let target = common::insert_user(&app, &common::unique_email("target"), "password123", "alumno").await;

    // Concurrent updates: the stored role is one of the written values
    let (a, b) = tokio::join!(
        client.get(app.url(&format!("/admin/usuarios/rol/{}/admin", target))).send(),
        client.get(app.url(&format!("/admin/usuarios/rol/{}/editor", target))).send(),
    );
    assert_eq!(a.unwrap().status().as_u16(), 303);
    assert_eq!(b.unwrap().status().as_u16(), 303);
    let role = users::find_by_id(&app.db.users, target).await.unwrap().unwrap().role;
    assert!(role == "admin" || role == "editor");

    // Sequential updates: the last one sticks, any string is accepted
    for role in ["admin", "alumno", "profesor"] {
        client
            .get(app.url(&format!("/admin/usuarios/rol/{}/{}", target, role)))
            .send()
            .await
            .unwrap();
    }
    let user = users::find_by_id(&app.db.users, target).await.unwrap().unwrap();
    assert_eq!(user.role, "profesor");

    let page = client.get(app.url("/admin/usuarios")).send().await.unwrap().text().await.unwrap();
    assert!(page.contains("profesor"));
}

#[tokio::test]
async fn deleting_a_user() {
    let app = spawn_app().await;
    let client = client();
    login_as_admin(&app, &client).await;
    let target = common::insert_user(&app, &common::unique_email("bye"), "password123", "alumno").await;

    let response = client
        .get(app.url(&format!("/admin/usuarios/borrar/{}", target)))
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), "/admin/usuarios");
    assert!(users::find_by_id(&app.db.users, target).await.unwrap().is_none());
}

#[tokio::test]
async fn public_catalogue_shows_levels_and_missing_course_is_404() {
    let app = spawn_app().await;
    let client = client();
    let seeded = seed_course(&app).await;

    let page = client
        .get(app.url(&format!("/cursos/{}", seeded.course_id)))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Antigüedad"));
    assert!(page.contains("Egipto"));
    assert!(page.contains("Repaso"));

    let response = client.get(app.url("/cursos/9999")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(response.text().await.unwrap(), "Curso no encontrado");

    let response = client.get(app.url("/leccion/9999")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(response.text().await.unwrap(), "Lección no encontrada");
}
