//! Infrastructure wiring (stores, password hashing, token codec).

use std::sync::Arc;

use byline_auth::Hs256TokenCodec;
use byline_store::{Argon2Hasher, InMemoryPostStore, InMemoryUserStore, PasswordHasher};

/// Shared service handles, inserted as an `Extension` for every handler.
///
/// All state is process-local: the stores are in-memory and empty at boot.
#[derive(Clone)]
pub struct AppServices {
    pub users: Arc<InMemoryUserStore>,
    pub posts: Arc<InMemoryPostStore>,
    pub passwords: Arc<dyn PasswordHasher>,
    pub tokens: Arc<Hs256TokenCodec>,
}

pub fn build_services(jwt_secret: &str) -> AppServices {
    AppServices {
        users: Arc::new(InMemoryUserStore::new()),
        posts: Arc::new(InMemoryPostStore::new()),
        passwords: Arc::new(Argon2Hasher),
        tokens: Arc::new(Hs256TokenCodec::new(jwt_secret.as_bytes())),
    }
}
