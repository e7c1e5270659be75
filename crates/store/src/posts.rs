//! The `PostStore` trait and its in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use byline_content::{Post, PostChanges};
use byline_core::{PostId, UserId};

use crate::StoreError;

/// Post persistence. Update and delete re-check existence inside the write
/// guard, so a post deleted between the caller's read and its write surfaces
/// as `NotFound` rather than resurrecting.
pub trait PostStore: Send + Sync {
    fn insert(&self, post: Post);
    fn get(&self, id: PostId) -> Option<Post>;
    fn list(&self) -> Vec<Post>;
    fn list_by_author(&self, author_id: UserId) -> Vec<Post>;
    fn update(
        &self,
        id: PostId,
        changes: PostChanges,
        now: DateTime<Utc>,
    ) -> Result<Post, StoreError>;
    fn delete(&self, id: PostId) -> Result<(), StoreError>;
}

impl<S> PostStore for Arc<S>
where
    S: PostStore + ?Sized,
{
    fn insert(&self, post: Post) {
        (**self).insert(post)
    }

    fn get(&self, id: PostId) -> Option<Post> {
        (**self).get(id)
    }

    fn list(&self) -> Vec<Post> {
        (**self).list()
    }

    fn list_by_author(&self, author_id: UserId) -> Vec<Post> {
        (**self).list_by_author(author_id)
    }

    fn update(
        &self,
        id: PostId,
        changes: PostChanges,
        now: DateTime<Utc>,
    ) -> Result<Post, StoreError> {
        (**self).update(id, changes, now)
    }

    fn delete(&self, id: PostId) -> Result<(), StoreError> {
        (**self).delete(id)
    }
}

/// In-memory post store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryPostStore {
    inner: RwLock<HashMap<PostId, Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<PostId, Post>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<PostId, Post>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl PostStore for InMemoryPostStore {
    fn insert(&self, post: Post) {
        self.write().insert(post.id, post);
    }

    fn get(&self, id: PostId) -> Option<Post> {
        self.read().get(&id).cloned()
    }

    fn list(&self) -> Vec<Post> {
        self.read().values().cloned().collect()
    }

    fn list_by_author(&self, author_id: UserId) -> Vec<Post> {
        self.read()
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect()
    }

    fn update(
        &self,
        id: PostId,
        changes: PostChanges,
        now: DateTime<Utc>,
    ) -> Result<Post, StoreError> {
        let mut map = self.write();
        let post = map.get_mut(&id).ok_or(StoreError::NotFound)?;
        post.apply_update(changes, now)?;
        Ok(post.clone())
    }

    fn delete(&self, id: PostId) -> Result<(), StoreError> {
        match self.write().remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }
}
