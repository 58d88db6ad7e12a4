// src/handlers/admin_users.rs

use axum::{
    extract::{Path, State},
    response::{Redirect, Response},
};

use crate::{error::AppError, repository::users, state::Db, utils::session::Page, views::AdminUsersTemplate};

/// Lists all users ordered by role, then name.
pub async fn list(State(db): State<Db>, page: Page) -> Result<Response, AppError> {
    let users = users::list_all(&db.users).await.map_err(|e| {
        tracing::error!("Failed to list users: {:?}", e);
        AppError::from(e)
    })?;

    let layout = page.layout();
    page.render(AdminUsersTemplate { layout, users })
}

/// Stores `role` verbatim. Concurrent changes are last-write-wins.
pub async fn set_role(
    State(db): State<Db>,
    Path((id, role)): Path<(i64, String)>,
) -> Result<Redirect, AppError> {
    if users::update_role(&db.users, id, &role).await? {
        tracing::info!("User {} now has role '{}'", id, role);
    }

    Ok(Redirect::to("/admin/usuarios"))
}

/// Hard-deletes a user. Their recorded answers stay in the courses store.
pub async fn delete(State(db): State<Db>, Path(id): Path<i64>) -> Result<Redirect, AppError> {
    if users::delete(&db.users, id).await? {
        tracing::info!("User {} deleted", id);
    }

    Ok(Redirect::to("/admin/usuarios"))
}
