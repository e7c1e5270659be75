use axum::{
    routing::{get, post, put},
    Router,
};

pub mod auth;
pub mod posts;
pub mod system;
pub mod users;

/// Post reads, reachable anonymously or with a token.
pub fn post_read_router() -> Router {
    Router::new()
        .route("/posts", get(posts::list_posts))
        .route("/posts/:id", get(posts::show_post))
}

/// Router for everything that requires an authenticated principal.
pub fn protected_router() -> Router {
    Router::new()
        .route("/auth/me", get(auth::me))
        .route("/posts", post(posts::create_post))
        .route("/posts/:id", put(posts::update_post).delete(posts::delete_post))
        .nest("/users", users::router())
}
