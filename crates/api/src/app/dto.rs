//! Request DTOs, boundary field validation, and JSON response mapping.

use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::json;

use byline_auth::Role;
use byline_content::Post;
use byline_store::User;

use super::errors::json_error;

// ─────────────────────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct PromoteRequest {
    pub role: Role,
}

// ─────────────────────────────────────────────────────────────────────────────
// Field validation
// ─────────────────────────────────────────────────────────────────────────────

/// Non-empty after trimming.
pub fn require_name(name: &str) -> Result<(), axum::response::Response> {
    if name.trim().is_empty() {
        return Err(json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "name cannot be empty",
        ));
    }
    Ok(())
}

/// Shape check only: non-empty and contains an '@'.
pub fn require_email(email: &str) -> Result<(), axum::response::Response> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') {
        return Err(json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "email must be a valid address",
        ));
    }
    Ok(())
}

pub fn require_password(password: &str) -> Result<(), axum::response::Response> {
    if password.chars().count() < 8 {
        return Err(json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "password must be at least 8 characters",
        ));
    }
    Ok(())
}

/// Role requested at account creation: viewer when omitted. `regular` is a
/// fallback classification, not a choice anyone can ask for.
pub fn assignable_role(role: Option<Role>) -> Result<Role, axum::response::Response> {
    let role = role.unwrap_or(Role::Viewer);
    if !role.is_assignable() {
        return Err(json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "role must be one of: admin, editor, viewer",
        ));
    }
    Ok(role)
}

// ─────────────────────────────────────────────────────────────────────────────
// Responses
// ─────────────────────────────────────────────────────────────────────────────

/// The only mapper from `User` to a wire shape; `password_hash` is never
/// part of it.
pub fn user_to_json(user: &User) -> serde_json::Value {
    json!({
        "id": user.id.to_string(),
        "name": user.name,
        "email": user.email,
        "role": user.role.as_str(),
        "created_at": user.created_at,
        "updated_at": user.updated_at,
    })
}

pub fn post_to_json(post: &Post) -> serde_json::Value {
    json!({
        "id": post.id.to_string(),
        "author_id": post.author_id.to_string(),
        "title": post.title,
        "body": post.body,
        "created_at": post.created_at,
        "updated_at": post.updated_at,
    })
}

pub fn user_with_posts_to_json(user: &User, posts: &[Post]) -> serde_json::Value {
    let mut value = user_to_json(user);
    value["posts"] = posts.iter().map(post_to_json).collect::<Vec<_>>().into();
    value
}
