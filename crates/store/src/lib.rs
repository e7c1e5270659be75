//! `byline-store`: persistence collaborators for the content API.
//!
//! In-memory `RwLock<HashMap>` stores behind `UserStore`/`PostStore` traits,
//! plus the Argon2 password hasher behind its own trait. Handlers make every
//! authorization decision before calling in here; the stores' only promise
//! is that a mutation re-checks existence and applies atomically under one
//! write guard.

pub mod password;
pub mod posts;
pub mod users;

use thiserror::Error;

use byline_core::DomainError;

pub use password::{Argon2Hasher, PasswordHashError, PasswordHasher};
pub use posts::{InMemoryPostStore, PostStore};
pub use users::{InMemoryUserStore, NewUser, User, UserChanges, UserStore};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Another user already holds this email address.
    #[error("email already in use")]
    EmailTaken,

    /// The target record does not exist (or was deleted concurrently).
    #[error("record not found")]
    NotFound,

    /// The mutation failed domain validation inside the write guard.
    #[error(transparent)]
    Domain(#[from] DomainError),
}
