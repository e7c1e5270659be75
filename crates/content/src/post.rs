use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use byline_auth::Owned;
use byline_core::{DomainError, DomainResult, Entity, PostId, UserId};

/// A published post. `author_id` is the owning user; nothing guarantees the
/// author still exists, and ownership checks stay meaningful either way
/// because they are pure id comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update: absent fields are left untouched, present fields replace
/// the old value wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }
}

impl Post {
    /// Create a post authored by `author_id` at `now`. Title and body must
    /// be non-blank; they are stored as given, untrimmed.
    pub fn new(
        author_id: UserId,
        title: String,
        body: String,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if title.trim().is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }
        if body.trim().is_empty() {
            return Err(DomainError::validation("body cannot be empty"));
        }

        Ok(Self {
            id: PostId::new(),
            author_id,
            title,
            body,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update, bumping `updated_at` to `now`. A blank
    /// replacement for either field rejects the whole update; an empty
    /// change set is accepted and still bumps the timestamp.
    pub fn apply_update(&mut self, changes: PostChanges, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some(title) = &changes.title {
            if title.trim().is_empty() {
                return Err(DomainError::validation("title cannot be empty"));
            }
        }
        if let Some(body) = &changes.body {
            if body.trim().is_empty() {
                return Err(DomainError::validation("body cannot be empty"));
            }
        }

        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(body) = changes.body {
            self.body = body;
        }
        self.updated_at = now;

        Ok(())
    }
}

impl Entity for Post {
    type Id = PostId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Owned for Post {
    fn owner_id(&self) -> UserId {
        self.author_id
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use proptest::prelude::*;

    use super::*;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn sample_post(author_id: UserId) -> Post {
        Post::new(
            author_id,
            "First post".to_string(),
            "Hello there.".to_string(),
            test_time(),
        )
        .unwrap()
    }

    #[test]
    fn new_post_starts_with_matching_timestamps() {
        let now = test_time();
        let post = Post::new(UserId::new(), "Title".into(), "Body".into(), now).unwrap();
        assert_eq!(post.created_at, now);
        assert_eq!(post.updated_at, now);
    }

    #[test]
    fn new_post_rejects_blank_title() {
        let err = Post::new(UserId::new(), "   ".into(), "Body".into(), test_time()).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert_eq!(msg, "title cannot be empty"),
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn new_post_rejects_blank_body() {
        let err = Post::new(UserId::new(), "Title".into(), "".into(), test_time()).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert_eq!(msg, "body cannot be empty"),
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn update_replaces_only_the_provided_fields() {
        let author = UserId::new();
        let mut post = sample_post(author);
        let original_body = post.body.clone();

        let later = post.created_at + Duration::minutes(5);
        post.apply_update(
            PostChanges { title: Some("Edited".into()), body: None },
            later,
        )
        .unwrap();

        assert_eq!(post.title, "Edited");
        assert_eq!(post.body, original_body);
        assert_eq!(post.updated_at, later);
    }

    #[test]
    fn update_never_moves_created_at() {
        let mut post = sample_post(UserId::new());
        let created = post.created_at;

        post.apply_update(
            PostChanges { title: Some("A".into()), body: Some("B".into()) },
            created + Duration::hours(1),
        )
        .unwrap();

        assert_eq!(post.created_at, created);
    }

    #[test]
    fn blank_replacement_rejects_the_whole_update() {
        let mut post = sample_post(UserId::new());
        let before = post.clone();

        let err = post
            .apply_update(
                PostChanges { title: Some("Kept?".into()), body: Some("  ".into()) },
                test_time() + Duration::minutes(1),
            )
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(post, before);
    }

    #[test]
    fn empty_change_set_still_bumps_updated_at() {
        let mut post = sample_post(UserId::new());
        let later = post.updated_at + Duration::minutes(1);

        post.apply_update(PostChanges::default(), later).unwrap();
        assert_eq!(post.updated_at, later);
    }

    #[test]
    fn owner_is_the_author() {
        let author = UserId::new();
        let post = sample_post(author);
        assert_eq!(post.owner_id(), author);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: non-blank replacements always land verbatim, and the
        /// author never changes through an update.
        #[test]
        fn updates_store_replacements_verbatim(
            title in "[A-Za-z][A-Za-z0-9 ]{0,59}",
            body in "[A-Za-z][A-Za-z0-9 .,]{0,199}",
        ) {
            let author = UserId::new();
            let mut post = sample_post(author);

            post.apply_update(
                PostChanges { title: Some(title.clone()), body: Some(body.clone()) },
                test_time(),
            )
            .unwrap();

            prop_assert_eq!(&post.title, &title);
            prop_assert_eq!(&post.body, &body);
            prop_assert_eq!(post.author_id, author);
        }
    }
}
