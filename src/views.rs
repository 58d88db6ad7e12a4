//! Server-rendered pages. Every template extends `base.html`, which reads the
//! shared [`Layout`] for the navigation bar and pending flash messages.

use askama::Template;
use axum::response::{Html, IntoResponse, Response};

use crate::{
    error::AppError,
    models::{
        course::Course,
        exam::Exam,
        lesson::Lesson,
        level::{Level, LevelWithContent},
        question::Question,
        user::User,
    },
    utils::session::{Page, SessionUser},
};

pub struct Layout {
    pub user: Option<SessionUser>,
    pub flash: Vec<String>,
}

impl Layout {
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(SessionUser::is_admin)
    }
}

impl Page {
    pub fn layout(&self) -> Layout {
        Layout {
            user: self.user.clone(),
            flash: self.flash.clone(),
        }
    }

    /// Renders `template` and sends the (flash-consumed) cookie jar along.
    pub fn render<T: Template>(self, template: T) -> Result<Response, AppError> {
        let body = template.render()?;
        Ok((self.jar, Html(body)).into_response())
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub courses: Vec<Course>,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub layout: Layout,
}

#[derive(Template)]
#[template(path = "location.html")]
pub struct LocationTemplate {
    pub layout: Layout,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
    pub email: String,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub layout: Layout,
    pub name: String,
    pub email: String,
}

#[derive(Template)]
#[template(path = "recover.html")]
pub struct RecoverTemplate {
    pub layout: Layout,
}

#[derive(Template)]
#[template(path = "reset_password.html")]
pub struct ResetPasswordTemplate {
    pub layout: Layout,
    pub email: String,
    pub token: String,
}

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub layout: Layout,
    pub user: User,
    pub answers_count: i64,
}

#[derive(Template)]
#[template(path = "courses.html")]
pub struct CoursesTemplate {
    pub layout: Layout,
    pub courses: Vec<Course>,
}

#[derive(Template)]
#[template(path = "course_detail.html")]
pub struct CourseDetailTemplate {
    pub layout: Layout,
    pub course: Course,
    pub levels: Vec<LevelWithContent>,
}

#[derive(Template)]
#[template(path = "lesson.html")]
pub struct LessonTemplate {
    pub layout: Layout,
    pub lesson: Lesson,
    pub course: Option<Course>,
    pub previous: Option<i64>,
    pub next: Option<i64>,
}

#[derive(Template)]
#[template(path = "exam.html")]
pub struct ExamTemplate {
    pub layout: Layout,
    pub exam: Exam,
    pub questions: Vec<Question>,
    /// Answers previously recorded by the current user, across attempts.
    pub answered: usize,
    pub answered_correct: usize,
}

#[derive(Template)]
#[template(path = "exam_result.html")]
pub struct ExamResultTemplate {
    pub layout: Layout,
    pub exam: Exam,
    /// Pre-formatted with two decimals.
    pub score: String,
    pub correct: usize,
    pub total: usize,
    pub passed: bool,
}

#[derive(Template)]
#[template(path = "admin/courses.html")]
pub struct AdminCoursesTemplate {
    pub layout: Layout,
    pub courses: Vec<Course>,
}

/// Shared by the create and edit screens.
#[derive(Template)]
#[template(path = "admin/course_form.html")]
pub struct AdminCourseFormTemplate {
    pub layout: Layout,
    pub heading: String,
    pub action: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub duration: String,
    pub image: String,
}

#[derive(Template)]
#[template(path = "admin/levels.html")]
pub struct AdminLevelsTemplate {
    pub layout: Layout,
    pub course: Course,
    pub levels: Vec<Level>,
}

#[derive(Template)]
#[template(path = "admin/level.html")]
pub struct AdminLevelTemplate {
    pub layout: Layout,
    pub course: Course,
    pub level: Level,
    pub lessons: Vec<Lesson>,
    pub exams: Vec<Exam>,
}

#[derive(Template)]
#[template(path = "admin/lesson_form.html")]
pub struct AdminLessonFormTemplate {
    pub layout: Layout,
    pub lesson: Lesson,
}

#[derive(Template)]
#[template(path = "admin/exam_form.html")]
pub struct AdminExamFormTemplate {
    pub layout: Layout,
    pub heading: String,
    pub action: String,
    pub level_id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Template)]
#[template(path = "admin/exam_questions.html")]
pub struct AdminExamQuestionsTemplate {
    pub layout: Layout,
    pub exam: Exam,
    pub questions: Vec<Question>,
}

#[derive(Template)]
#[template(path = "admin/question_form.html")]
pub struct AdminQuestionFormTemplate {
    pub layout: Layout,
    pub question: Question,
}

#[derive(Template)]
#[template(path = "admin/users.html")]
pub struct AdminUsersTemplate {
    pub layout: Layout,
    pub users: Vec<User>,
}
