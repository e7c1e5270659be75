use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::{Duration, Utc};
use serde_json::json;

use byline_core::UserId;
use byline_store::{NewUser, PasswordHasher, UserStore};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CurrentUser;

/// Issued tokens are valid for 24 hours from the moment of issue.
const TOKEN_TTL_HOURS: i64 = 24;

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> axum::response::Response {
    if let Err(resp) = dto::require_name(&body.name) {
        return resp;
    }
    if let Err(resp) = dto::require_email(&body.email) {
        return resp;
    }
    if let Err(resp) = dto::require_password(&body.password) {
        return resp;
    }
    // The requested role is honored as long as it is assignable, so
    // anonymous registration can mint admins (see README).
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
    let user = match services.users.create(new_user, Utc::now()) {
        Ok(user) => user,
        Err(e) => return errors::store_error_to_response(e),
    };

    let token = match issue_token(&services, user.id) {
        Ok(token) => token,
        Err(resp) => return resp,
    };

    (
        StatusCode::CREATED,
        Json(json!({ "user": dto::user_to_json(&user), "token": token })),
    )
        .into_response()
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let user = match services.users.get_by_email(&body.email) {
        Some(user) => user,
        // Unknown email and wrong password answer identically.
        None => {
            return errors::json_error(
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "invalid email or password",
            );
        }
    };

    let password_ok = services
        .passwords
        .verify(&body.password, &user.password_hash)
        .unwrap_or(false);
    if !password_ok {
        return errors::json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "invalid email or password",
        );
    }

    let token = match issue_token(&services, user.id) {
        Ok(token) => token,
        Err(resp) => return resp,
    };

    (
        StatusCode::OK,
        Json(json!({ "user": dto::user_to_json(&user), "token": token })),
    )
        .into_response()
}

pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
) -> axum::response::Response {
    // The middleware resolved this subject moments ago; a miss here means
    // the account was deleted mid-request.
    match services.users.get(user.id()) {
        Some(record) => (StatusCode::OK, Json(dto::user_to_json(&record))).into_response(),
        None => errors::json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "authentication required",
        ),
    }
}

fn issue_token(
    services: &AppServices,
    user_id: UserId,
) -> Result<String, axum::response::Response> {
    services
        .tokens
        .issue(user_id, Utc::now(), Duration::hours(TOKEN_TTL_HOURS))
        .map_err(|e| {
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                e.to_string(),
            )
        })
}
