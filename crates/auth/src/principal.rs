use serde::{Deserialize, Serialize};

use byline_core::UserId;

use crate::Role;

/// A fully resolved principal for authorization decisions.
///
/// This is the minimal view of an authenticated identity the decision
/// functions need: who is acting, and with which role. It is constructed at
/// the boundary (from a validated token plus the user record) and passed
/// explicitly into every check; decisions never reach for ambient request
/// state.
///
/// An authenticated principal always has exactly one role; there is no
/// "role-less" state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    pub role: Role,
}

impl Principal {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Exact-match check against the `admin` literal.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Exact-match check against the `editor` literal.
    pub fn is_editor(&self) -> bool {
        self.role == Role::Editor
    }

    /// Exact-match check against the `viewer` literal.
    pub fn is_viewer(&self) -> bool {
        self.role == Role::Viewer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_match_exactly_one_role() {
        let admin = Principal::new(UserId::new(), Role::Admin);
        assert!(admin.is_admin());
        assert!(!admin.is_editor());
        assert!(!admin.is_viewer());

        let editor = Principal::new(UserId::new(), Role::Editor);
        assert!(!editor.is_admin());
        assert!(editor.is_editor());

        let regular = Principal::new(UserId::new(), Role::Regular);
        assert!(!regular.is_admin());
        assert!(!regular.is_editor());
        assert!(!regular.is_viewer());
    }
}
