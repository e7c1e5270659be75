//! `byline-api`: HTTP surface of the content service.
//!
//! Thin Axum layer: middleware resolves a principal from the bearer token,
//! handlers run the authorization checks from `byline-auth`, then talk to the
//! stores. No decision logic lives here; handlers only translate decisions
//! and store errors into HTTP responses.

pub mod app;
pub mod context;
pub mod middleware;
