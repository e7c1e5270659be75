//! Instance-level user decisions: admin-only mutations plus the
//! self-protection rules that keep principals from sawing off the branch
//! they sit on.
//!
//! "Self" means id equality between the principal and the target user,
//! nothing else. Rules are evaluated in a fixed order, so when several
//! denials could apply the earlier one's reason wins; the HTTP layer
//! surfaces these strings verbatim.

use byline_core::UserId;

use crate::{Decision, Principal};

fn is_self(principal: &Principal, target: UserId) -> bool {
    principal.id == target
}

/// Creating user accounts through the management endpoint is admin-only.
/// Self-service registration bypasses this policy entirely.
pub fn create(principal: &Principal) -> Decision {
    if principal.is_admin() {
        Decision::allow()
    } else {
        Decision::deny("Only administrators can create users")
    }
}

/// Admins update anyone. Everyone else updates only themselves, and even
/// then may not touch their own role; `requests_role_change` is true when
/// the update payload carries a role field at all, regardless of whether
/// the value differs from the current one.
pub fn update(principal: &Principal, target: UserId, requests_role_change: bool) -> Decision {
    if principal.is_admin() {
        return Decision::allow();
    }
    if !is_self(principal, target) {
        return Decision::deny("You can only update your own profile");
    }
    if requests_role_change {
        return Decision::deny("You cannot change your own role");
    }
    Decision::allow()
}

/// Deleting users is admin-only, and even admins cannot delete themselves.
/// The role check runs first, so a non-admin targeting their own account
/// hears about the missing role, not about self-deletion.
pub fn delete(principal: &Principal, target: UserId) -> Decision {
    if !principal.is_admin() {
        return Decision::deny("Only administrators can delete users");
    }
    if is_self(principal, target) {
        return Decision::deny("You cannot delete your own account");
    }
    Decision::allow()
}

/// Changing another user's role is admin-only, and self-promotion (or
/// demotion) is blocked outright. Same ordering as [`delete`]: the role
/// check wins over the self check.
pub fn promote(principal: &Principal, target: UserId) -> Decision {
    if !principal.is_admin() {
        return Decision::deny("Only administrators can promote users");
    }
    if is_self(principal, target) {
        return Decision::deny("You cannot promote or demote yourself");
    }
    Decision::allow()
}
