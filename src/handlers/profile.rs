// src/handlers/profile.rs

use axum::{
    Extension,
    extract::{Multipart, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    config::Config,
    error::AppError,
    repository::{
        answers,
        users::{self, ProfileUpdate},
    },
    state::Db,
    utils::{
        session::{Page, SessionUser, end_session, push_flash, start_session},
        upload::{FormData, discard_on_error, discard_upload, save_upload},
    },
    views::ProfileTemplate,
};

/// Shows the logged-in user's data and how many answers they have recorded.
pub async fn show(
    State(db): State<Db>,
    Extension(session_user): Extension<SessionUser>,
    page: Page,
) -> Result<Response, AppError> {
    let Some(user) = users::find_by_id(&db.users, session_user.id).await? else {
        // Account deleted while the session was still alive.
        return Ok((end_session(page.jar), Redirect::to("/login")).into_response());
    };

    let answers_count = answers::count_for_user(&db.courses, user.id).await?;

    let layout = page.layout();
    page.render(ProfileTemplate {
        layout,
        user,
        answers_count,
    })
}

/// Updates photo, name and email. Empty fields are left unchanged.
///
/// The session cookie is reissued so the navigation bar reflects the new
/// values right away.
pub async fn update(
    State(db): State<Db>,
    State(config): State<Config>,
    Extension(session_user): Extension<SessionUser>,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = FormData::read(multipart).await?;

    let profile_img = match form.file("foto") {
        Some(file) => Some(save_upload(&config.profile_img_dir(), file).await?),
        None => None,
    };

    let update = ProfileUpdate {
        name: form.opt_text("nombre"),
        email: form.opt_text("email"),
        profile_img,
    };

    let applied = discard_on_error(
        users::update_profile(&db.users, session_user.id, &update).await,
        &config.profile_img_dir(),
        update.profile_img.as_deref(),
    )
    .await?;

    let mut jar = jar;
    if !applied {
        if let Some(stored) = update.profile_img.as_deref() {
            discard_upload(&config.profile_img_dir(), stored).await;
        }
        jar = push_flash(jar, &config, "El correo ya está registrado");
    }

    let jar = match users::find_by_id(&db.users, session_user.id).await? {
        Some(user) => start_session(jar, &SessionUser::from(&user), &config)?,
        None => return Ok((end_session(jar), Redirect::to("/login")).into_response()),
    };

    Ok((jar, Redirect::to("/perfil")).into_response())
}
