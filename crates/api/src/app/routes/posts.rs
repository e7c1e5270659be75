use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;

use byline_auth::{post_policy, Decision};
use byline_content::{Post, PostChanges};
use byline_core::PostId;
use byline_store::PostStore;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CurrentUser;

// ─────────────────────────────────────────────────────────────────────────────
// Reads (anonymous or authenticated)
// ─────────────────────────────────────────────────────────────────────────────

pub async fn list_posts(
    Extension(services): Extension<Arc<AppServices>>,
    user: Option<Extension<CurrentUser>>,
) -> axum::response::Response {
    // Anonymous listing never consults the policy; an authenticated listing
    // does, and a deny would surface as a 403 like everywhere else.
    if let Some(Extension(user)) = user {
        if let Decision::Deny(reason) = post_policy::view_any(&user.principal()) {
            return errors::json_error(StatusCode::FORBIDDEN, "forbidden", reason.into_owned());
        }
    }

    let items = services
        .posts
        .list()
        .iter()
        .map(dto::post_to_json)
        .collect::<Vec<_>>();

    (StatusCode::OK, Json(json!({ "items": items }))).into_response()
}

pub async fn show_post(
    Extension(services): Extension<Arc<AppServices>>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let post_id: PostId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid post id");
        }
    };

    let post = match services.posts.get(post_id) {
        Some(post) => post,
        None => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "post not found"),
    };

    // The instance-level view check runs only for authenticated callers.
    if let Some(Extension(user)) = user {
        if let Decision::Deny(reason) = post_policy::view(&user.principal(), &post) {
            return errors::json_error(StatusCode::FORBIDDEN, "forbidden", reason.into_owned());
        }
    }

    (StatusCode::OK, Json(dto::post_to_json(&post))).into_response()
}

// ─────────────────────────────────────────────────────────────────────────────
// Mutations (authenticated only)
// ─────────────────────────────────────────────────────────────────────────────

pub async fn create_post(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<dto::CreatePostRequest>,
) -> axum::response::Response {
    // Authorship is open to every authenticated principal, including ones
    // the coarse role matrix would turn away.
    if let Decision::Deny(reason) = post_policy::create(&user.principal()) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", reason.into_owned());
    }

    let post = match Post::new(user.id(), body.title, body.body, Utc::now()) {
        Ok(post) => post,
        Err(e) => return errors::domain_error_to_response(e),
    };
    services.posts.insert(post.clone());

    (StatusCode::CREATED, Json(dto::post_to_json(&post))).into_response()
}

pub async fn update_post(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdatePostRequest>,
) -> axum::response::Response {
    let post_id: PostId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid post id");
        }
    };

    let post = match services.posts.get(post_id) {
        Some(post) => post,
        None => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "post not found"),
    };

    if let Decision::Deny(reason) = post_policy::update(&user.principal(), &post) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", reason.into_owned());
    }

    let changes = PostChanges {
        title: body.title,
        body: body.body,
    };
    match services.posts.update(post_id, changes, Utc::now()) {
        Ok(updated) => (StatusCode::OK, Json(dto::post_to_json(&updated))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_post(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let post_id: PostId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid post id");
        }
    };

    let post = match services.posts.get(post_id) {
        Some(post) => post,
        None => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "post not found"),
    };

    if let Decision::Deny(reason) = post_policy::delete(&user.principal(), &post) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", reason.into_owned());
    }

    match services.posts.delete(post_id) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "id": post_id.to_string(), "deleted": true })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
