//! User records and the `UserStore` trait with its in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use byline_auth::{Principal, Role};
use byline_core::UserId;

use crate::StoreError;

// ─────────────────────────────────────────────────────────────────────────────
// Records
// ─────────────────────────────────────────────────────────────────────────────

/// Stored user record. Not serde-serializable: the HTTP layer maps it to a
/// response shape so `password_hash` never reaches the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The decision-layer view of this user.
    pub fn principal(&self) -> Principal {
        Principal::new(self.id, self.role)
    }
}

/// Fields required to create a user; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Partial update. A present `role` means "set the role"; whether the caller
/// was allowed to send it at all is the policy layer's question, settled
/// before the store is touched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Store trait
// ─────────────────────────────────────────────────────────────────────────────

/// User persistence. Email uniqueness is enforced here, case-insensitively.
pub trait UserStore: Send + Sync {
    fn create(&self, new: NewUser, now: DateTime<Utc>) -> Result<User, StoreError>;
    fn get(&self, id: UserId) -> Option<User>;
    fn get_by_email(&self, email: &str) -> Option<User>;
    fn list(&self) -> Vec<User>;
    fn update(
        &self,
        id: UserId,
        changes: UserChanges,
        now: DateTime<Utc>,
    ) -> Result<User, StoreError>;
    /// Permanent removal. The user's posts are left in place, orphaned.
    fn delete(&self, id: UserId) -> Result<(), StoreError>;
}

impl<S> UserStore for Arc<S>
where
    S: UserStore + ?Sized,
{
    fn create(&self, new: NewUser, now: DateTime<Utc>) -> Result<User, StoreError> {
        (**self).create(new, now)
    }

    fn get(&self, id: UserId) -> Option<User> {
        (**self).get(id)
    }

    fn get_by_email(&self, email: &str) -> Option<User> {
        (**self).get_by_email(email)
    }

    fn list(&self) -> Vec<User> {
        (**self).list()
    }

    fn update(
        &self,
        id: UserId,
        changes: UserChanges,
        now: DateTime<Utc>,
    ) -> Result<User, StoreError> {
        (**self).update(id, changes, now)
    }

    fn delete(&self, id: UserId) -> Result<(), StoreError> {
        (**self).delete(id)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory implementation
// ─────────────────────────────────────────────────────────────────────────────

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// In-memory user store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only records that some writer panicked; take the
    // guard back instead of propagating the poison.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<UserId, User>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<UserId, User>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl UserStore for InMemoryUserStore {
    fn create(&self, new: NewUser, now: DateTime<Utc>) -> Result<User, StoreError> {
        let mut map = self.write();

        let candidate = normalize_email(&new.email);
        if map.values().any(|u| normalize_email(&u.email) == candidate) {
            return Err(StoreError::EmailTaken);
        }

        let user = User {
            id: UserId::new(),
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            role: new.role,
            created_at: now,
            updated_at: now,
        };
        map.insert(user.id, user.clone());
        Ok(user)
    }

    fn get(&self, id: UserId) -> Option<User> {
        self.read().get(&id).cloned()
    }

    fn get_by_email(&self, email: &str) -> Option<User> {
        let normalized = normalize_email(email);
        self.read()
            .values()
            .find(|u| normalize_email(&u.email) == normalized)
            .cloned()
    }

    fn list(&self) -> Vec<User> {
        self.read().values().cloned().collect()
    }

    fn update(
        &self,
        id: UserId,
        changes: UserChanges,
        now: DateTime<Utc>,
    ) -> Result<User, StoreError> {
        let mut map = self.write();

        if let Some(email) = &changes.email {
            let candidate = normalize_email(email);
            if map
                .values()
                .any(|u| u.id != id && normalize_email(&u.email) == candidate)
            {
                return Err(StoreError::EmailTaken);
            }
        }

        let user = map.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        user.updated_at = now;
        Ok(user.clone())
    }

    fn delete(&self, id: UserId) -> Result<(), StoreError> {
        match self.write().remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            name: "Alice".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role,
        }
    }

    #[test]
    fn created_users_are_retrievable_by_id_and_email() {
        let store = InMemoryUserStore::new();
        let now = Utc::now();

        let user = store.create(new_user("alice@example.com", Role::Viewer), now).unwrap();

        assert_eq!(store.get(user.id), Some(user.clone()));
        assert_eq!(store.get_by_email("alice@example.com"), Some(user));
    }

    #[test]
    fn email_lookup_is_case_and_whitespace_insensitive() {
        let store = InMemoryUserStore::new();
        store
            .create(new_user("alice@example.com", Role::Viewer), Utc::now())
            .unwrap();

        assert!(store.get_by_email("  ALICE@Example.COM ").is_some());
        assert!(store.get_by_email("bob@example.com").is_none());
    }

    #[test]
    fn duplicate_email_is_rejected_regardless_of_case() {
        let store = InMemoryUserStore::new();
        let now = Utc::now();
        store.create(new_user("alice@example.com", Role::Viewer), now).unwrap();

        let err = store
            .create(new_user("ALICE@EXAMPLE.COM", Role::Editor), now)
            .unwrap_err();
        assert_eq!(err, StoreError::EmailTaken);
    }

    #[test]
    fn update_applies_only_the_present_fields() {
        let store = InMemoryUserStore::new();
        let created_at = Utc::now();
        let user = store.create(new_user("alice@example.com", Role::Viewer), created_at).unwrap();

        let later = created_at + chrono::Duration::minutes(5);
        let updated = store
            .update(
                user.id,
                UserChanges { name: Some("Alice B".into()), ..Default::default() },
                later,
            )
            .unwrap();

        assert_eq!(updated.name, "Alice B");
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.role, user.role);
        assert_eq!(updated.created_at, created_at);
        assert_eq!(updated.updated_at, later);
    }

    #[test]
    fn update_may_keep_the_callers_own_email() {
        let store = InMemoryUserStore::new();
        let now = Utc::now();
        let user = store.create(new_user("alice@example.com", Role::Viewer), now).unwrap();

        // Re-sending your own address is not a collision.
        let updated = store
            .update(
                user.id,
                UserChanges { email: Some("alice@example.com".into()), ..Default::default() },
                now,
            )
            .unwrap();
        assert_eq!(updated.email, "alice@example.com");
    }

    #[test]
    fn update_rejects_switching_to_a_taken_email() {
        let store = InMemoryUserStore::new();
        let now = Utc::now();
        store.create(new_user("alice@example.com", Role::Viewer), now).unwrap();
        let bob = store.create(new_user("bob@example.com", Role::Viewer), now).unwrap();

        let err = store
            .update(
                bob.id,
                UserChanges { email: Some("Alice@Example.com".into()), ..Default::default() },
                now,
            )
            .unwrap_err();
        assert_eq!(err, StoreError::EmailTaken);
    }

    #[test]
    fn role_change_lands_and_shows_in_the_principal() {
        let store = InMemoryUserStore::new();
        let now = Utc::now();
        let user = store.create(new_user("alice@example.com", Role::Viewer), now).unwrap();
        assert!(user.principal().is_viewer());

        let updated = store
            .update(
                user.id,
                UserChanges { role: Some(Role::Admin), ..Default::default() },
                now,
            )
            .unwrap();
        assert!(updated.principal().is_admin());
    }

    #[test]
    fn deleted_users_are_gone_and_a_second_delete_is_not_found() {
        let store = InMemoryUserStore::new();
        let now = Utc::now();
        let user = store.create(new_user("alice@example.com", Role::Viewer), now).unwrap();

        store.delete(user.id).unwrap();
        assert!(store.get(user.id).is_none());
        assert_eq!(store.delete(user.id), Err(StoreError::NotFound));
    }

    #[test]
    fn update_of_a_missing_user_is_not_found() {
        let store = InMemoryUserStore::new();
        let err = store
            .update(UserId::new(), UserChanges::default(), Utc::now())
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound);
    }

    #[test]
    fn list_returns_every_stored_user() {
        let store = InMemoryUserStore::new();
        let now = Utc::now();
        let a = store.create(new_user("a@example.com", Role::Admin), now).unwrap();
        let b = store.create(new_user("b@example.com", Role::Regular), now).unwrap();

        let listed = store.list();
        assert_eq!(listed.len(), 2);
        assert!(listed.contains(&a));
        assert!(listed.contains(&b));
    }
}
