//! Instance-level post decisions: who may view, author, amend or remove a
//! concrete post.
//!
//! Ownership means author-id equality and nothing else. A post whose author
//! record no longer exists simply fails the equality test for everyone; no
//! special dangling-owner branch exists.
//!
//! Deny reasons returned here are part of the crate's observable contract.
//! The HTTP layer surfaces them verbatim in 403 bodies, so the strings are
//! load-bearing and must not be reworded casually.

use byline_core::UserId;

use crate::{Decision, Principal};

/// A resource with a single owning user.
///
/// Implemented by post entities; policies only ever need the owner id, so
/// they take `&impl Owned` rather than a concrete post type.
pub trait Owned {
    fn owner_id(&self) -> UserId;
}

fn owns(principal: &Principal, resource: &impl Owned) -> bool {
    resource.owner_id() == principal.id
}

/// Listing posts is open to every authenticated principal.
pub fn view_any(_principal: &Principal) -> Decision {
    Decision::allow()
}

/// Viewing a single post is open to every authenticated principal,
/// regardless of who wrote it.
pub fn view(_principal: &Principal, _post: &impl Owned) -> Decision {
    Decision::allow()
}

/// Authoring is decided per principal, not per instance; every role this
/// policy sees may create. Role-level gating happens in
/// [`crate::authority`], before any post exists to pass here.
pub fn create(_principal: &Principal) -> Decision {
    Decision::allow()
}

/// Admins and editors may update any post; everyone else only their own.
pub fn update(principal: &Principal, post: &impl Owned) -> Decision {
    if principal.is_admin() || principal.is_editor() || owns(principal, post) {
        Decision::allow()
    } else {
        Decision::deny("You can only update your own posts")
    }
}

/// Admins may delete any post. Editors, despite their unconditional update
/// grant, may only delete their own. Everyone else is held to plain
/// ownership.
pub fn delete(principal: &Principal, post: &impl Owned) -> Decision {
    if principal.is_admin() {
        return Decision::allow();
    }
    if principal.is_editor() {
        return if owns(principal, post) {
            Decision::allow()
        } else {
            Decision::deny("Editors can only delete their own posts")
        };
    }
    if owns(principal, post) {
        Decision::allow()
    } else {
        Decision::deny("You can only delete your own posts")
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::Role;

    struct Sample {
        owner: UserId,
    }

    impl Owned for Sample {
        fn owner_id(&self) -> UserId {
            self.owner
        }
    }

    fn principal(role: Role) -> Principal {
        Principal::new(UserId::new(), role)
    }

    fn owned_by(principal: &Principal) -> Sample {
        Sample { owner: principal.id }
    }

    fn owned_by_someone_else() -> Sample {
        Sample { owner: UserId::new() }
    }

    #[test]
    fn everyone_views_everything() {
        for role in Role::ALL {
            let p = principal(role);
            assert!(view_any(&p).is_allow());
            assert!(view(&p, &owned_by_someone_else()).is_allow());
        }
    }

    #[test]
    fn create_is_unconditionally_allowed_at_this_layer() {
        for role in Role::ALL {
            assert!(create(&principal(role)).is_allow());
        }
    }

    #[test]
    fn admin_updates_and_deletes_any_post() {
        let admin = principal(Role::Admin);
        let theirs = owned_by_someone_else();
        assert!(update(&admin, &theirs).is_allow());
        assert!(delete(&admin, &theirs).is_allow());
    }

    #[test]
    fn editor_updates_any_post_but_deletes_only_their_own() {
        let editor = principal(Role::Editor);
        let own = owned_by(&editor);
        let theirs = owned_by_someone_else();

        assert!(update(&editor, &theirs).is_allow());
        assert!(delete(&editor, &own).is_allow());

        let denied = delete(&editor, &theirs);
        assert_eq!(denied.reason(), Some("Editors can only delete their own posts"));
    }

    #[test]
    fn viewer_is_held_to_ownership_for_update_and_delete() {
        let viewer = principal(Role::Viewer);
        let own = owned_by(&viewer);
        let theirs = owned_by_someone_else();

        assert!(update(&viewer, &own).is_allow());
        assert!(delete(&viewer, &own).is_allow());
        assert_eq!(
            update(&viewer, &theirs).reason(),
            Some("You can only update your own posts")
        );
        assert_eq!(
            delete(&viewer, &theirs).reason(),
            Some("You can only delete your own posts")
        );
    }

    #[test]
    fn regular_is_held_to_ownership_for_update_and_delete() {
        let regular = principal(Role::Regular);
        let own = owned_by(&regular);
        let theirs = owned_by_someone_else();

        assert!(update(&regular, &own).is_allow());
        assert!(delete(&regular, &own).is_allow());
        assert!(update(&regular, &theirs).is_deny());
        assert!(delete(&regular, &theirs).is_deny());
    }

    #[test]
    fn dangling_owner_is_just_a_failed_equality_test() {
        // The author's user record may be gone; the id comparison still
        // decides, and nobody below admin/editor passes it.
        let regular = principal(Role::Regular);
        let orphaned = owned_by_someone_else();
        assert!(update(&regular, &orphaned).is_deny());

        let admin = principal(Role::Admin);
        assert!(update(&admin, &orphaned).is_allow());
    }

    fn arb_role() -> impl Strategy<Value = Role> {
        prop::sample::select(Role::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: admins are never denied anything on posts.
        #[test]
        fn admin_always_wins(owner_is_self in any::<bool>()) {
            let admin = principal(Role::Admin);
            let post = if owner_is_self { owned_by(&admin) } else { owned_by_someone_else() };
            prop_assert!(view(&admin, &post).is_allow());
            prop_assert!(update(&admin, &post).is_allow());
            prop_assert!(delete(&admin, &post).is_allow());
        }

        /// Property: for any role, owning the post allows update and delete.
        #[test]
        fn owners_always_manage_their_own_posts(role in arb_role()) {
            let p = principal(role);
            let own = owned_by(&p);
            prop_assert!(update(&p, &own).is_allow());
            prop_assert!(delete(&p, &own).is_allow());
        }

        /// Property: viewer and regular receive identical instance-level
        /// outcomes; their difference lives entirely at the role layer.
        #[test]
        fn viewer_and_regular_agree_at_instance_level(owner_is_self in any::<bool>()) {
            let viewer = principal(Role::Viewer);
            let regular = principal(Role::Regular);
            let viewer_post = if owner_is_self { owned_by(&viewer) } else { owned_by_someone_else() };
            let regular_post = if owner_is_self { owned_by(&regular) } else { owned_by_someone_else() };

            prop_assert_eq!(
                update(&viewer, &viewer_post).is_allow(),
                update(&regular, &regular_post).is_allow()
            );
            prop_assert_eq!(
                delete(&viewer, &viewer_post).is_allow(),
                delete(&regular, &regular_post).is_allow()
            );
        }

        /// Property: decisions are pure; evaluating twice yields the same
        /// outcome and the same reason.
        #[test]
        fn decisions_are_stable(role in arb_role(), owner_is_self in any::<bool>()) {
            let p = principal(role);
            let post = if owner_is_self { owned_by(&p) } else { owned_by_someone_else() };
            prop_assert_eq!(update(&p, &post), update(&p, &post));
            prop_assert_eq!(delete(&p, &post), delete(&p, &post));
        }
    }
}
