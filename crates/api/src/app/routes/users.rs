use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;

use byline_auth::{authority, user_policy, Decision};
use byline_core::UserId;
use byline_store::{NewUser, PasswordHasher, PostStore, UserChanges, UserStore};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/with-posts", get(list_users_with_posts))
        .route("/:id", get(show_user).put(update_user).delete(delete_user))
        .route("/:id/promote", post(promote_user))
}

// ─────────────────────────────────────────────────────────────────────────────
// Reads
// ─────────────────────────────────────────────────────────────────────────────

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
) -> axum::response::Response {
    if !authority::can_browse_users(&user.principal()) {
        return errors::json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "You are not allowed to view users",
        );
    }

    let items = services
        .users
        .list()
        .iter()
        .map(dto::user_to_json)
        .collect::<Vec<_>>();

    (StatusCode::OK, Json(json!({ "items": items }))).into_response()
}

pub async fn list_users_with_posts(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
) -> axum::response::Response {
    if !authority::can_browse_users(&user.principal()) {
        return errors::json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "You are not allowed to view users",
        );
    }

    let items = services
        .users
        .list()
        .iter()
        .map(|u| dto::user_with_posts_to_json(u, &services.posts.list_by_author(u.id)))
        .collect::<Vec<_>>();

    (StatusCode::OK, Json(json!({ "items": items }))).into_response()
}

pub async fn show_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> axum::response::Response {
    // The browse gate needs no target, so it runs before the id is parsed.
    if !authority::can_browse_users(&user.principal()) {
        return errors::json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "You are not allowed to view users",
        );
    }

    let user_id: UserId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id");
        }
    };

    match services.users.get(user_id) {
        Some(record) => (StatusCode::OK, Json(dto::user_to_json(&record))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mutations
// ─────────────────────────────────────────────────────────────────────────────

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<dto::CreateUserRequest>,
) -> axum::response::Response {
    if let Decision::Deny(reason) = user_policy::create(&user.principal()) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", reason.into_owned());
    }

    if let Err(resp) = dto::require_name(&body.name) {
        return resp;
    }
    if let Err(resp) = dto::require_email(&body.email) {
        return resp;
    }
    if let Err(resp) = dto::require_password(&body.password) {
        return resp;
    }
    // Same assignable set as registration; only the caller differs, and the
    // policy above has already pinned that caller to an admin.
    let role = match dto::assignable_role(body.role) {
        Ok(role) => role,
        Err(resp) => return resp,
    };

    let password_hash = match services.passwords.hash(&body.password) {
        Ok(hash) => hash,
        Err(e) => {
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                e.to_string(),
            );
        }
    };

    let new_user = NewUser {
        name: body.name,
        email: body.email,
        password_hash,
        role,
    };
    match services.users.create(new_user, Utc::now()) {
        Ok(created) => (StatusCode::CREATED, Json(dto::user_to_json(&created))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateUserRequest>,
) -> axum::response::Response {
    let user_id: UserId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id");
        }
    };

    if services.users.get(user_id).is_none() {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found");
    }

    // A present role field counts as a role change request even when it
    // repeats the current role.
    let decision = user_policy::update(&user.principal(), user_id, body.role.is_some());
    if let Decision::Deny(reason) = decision {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", reason.into_owned());
    }

    if let Some(name) = &body.name {
        if let Err(resp) = dto::require_name(name) {
            return resp;
        }
    }
    if let Some(email) = &body.email {
        if let Err(resp) = dto::require_email(email) {
            return resp;
        }
    }
    if let Some(password) = &body.password {
        if let Err(resp) = dto::require_password(password) {
            return resp;
        }
    }

    let password_hash = match &body.password {
        Some(password) => match services.passwords.hash(password) {
            Ok(hash) => Some(hash),
            Err(e) => {
                return errors::json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    e.to_string(),
                );
            }
        },
        None => None,
    };

    let changes = UserChanges {
        name: body.name,
        email: body.email,
        password_hash,
        role: body.role,
    };
    match services.users.update(user_id, changes, Utc::now()) {
        Ok(updated) => (StatusCode::OK, Json(dto::user_to_json(&updated))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let user_id: UserId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id");
        }
    };

    if services.users.get(user_id).is_none() {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found");
    }

    if let Decision::Deny(reason) = user_policy::delete(&user.principal(), user_id) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", reason.into_owned());
    }

    // The user's posts stay behind, orphaned.
    match services.users.delete(user_id) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "id": user_id.to_string(), "deleted": true })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn promote_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<dto::PromoteRequest>,
) -> axum::response::Response {
    let user_id: UserId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id");
        }
    };

    if services.users.get(user_id).is_none() {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found");
    }

    if let Decision::Deny(reason) = user_policy::promote(&user.principal(), user_id) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", reason.into_owned());
    }

    // Any of the four roles may be set here, demotions to regular included.
    let changes = UserChanges {
        role: Some(body.role),
        ..Default::default()
    };
    match services.users.update(user_id, changes, Utc::now()) {
        Ok(updated) => (StatusCode::OK, Json(dto::user_to_json(&updated))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
