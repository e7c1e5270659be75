//! Role-level authorization: coarse checks evaluated before a concrete
//! target resource is known.
//!
//! Everything here assumes an authenticated principal. "No principal" is an
//! authentication failure the transport layer reports (401) strictly before
//! any of these functions run; none of them distinguishes a missing
//! principal from a wrong role.
//!
//! Two create gates exist for posts and they do not agree for viewers:
//! [`can_perform`] denies viewer `Create` on posts while [`can_create_posts`]
//! allows it. Both behaviors are load-bearing; call sites are wired to one
//! or the other, never to a merged rule.

use crate::{Access, Principal, ResourceKind, Role};

/// Exact role match. No hierarchy: `has_role(p, Editor)` is false for an
/// admin principal.
pub fn has_role(principal: &Principal, role: Role) -> bool {
    principal.role == role
}

/// Coarse role/resource/access matrix.
///
/// - `Admin`: every access on every resource.
/// - `Editor`: every access on posts; read-only on users.
/// - `Viewer`: read-only on either resource.
/// - `Regular`: nothing at this layer (instance-level rules may still allow
///   self-service operations).
pub fn can_perform(principal: &Principal, resource: ResourceKind, access: Access) -> bool {
    match principal.role {
        Role::Admin => true,
        Role::Editor => match resource {
            ResourceKind::Posts => true,
            ResourceKind::Users => access == Access::Read,
        },
        Role::Viewer => access == Access::Read,
        Role::Regular => false,
    }
}

/// The post-creation gate: admin, editor and viewer may author posts.
///
/// Wider than `can_perform(.., Posts, Create)`: viewers pass here. Not
/// derived from the matrix; do not consolidate the two.
pub fn can_create_posts(principal: &Principal) -> bool {
    matches!(principal.role, Role::Admin | Role::Editor | Role::Viewer)
}

/// Gate for the user-directory endpoints (list, show, users-with-posts).
///
/// An explicit allow-set, not a derivation from [`can_perform`]: exactly
/// admin, editor and viewer may browse users.
pub fn can_browse_users(principal: &Principal) -> bool {
    matches!(principal.role, Role::Admin | Role::Editor | Role::Viewer)
}
