use core::str::FromStr;

use serde::{Deserialize, Serialize};

use byline_core::DomainError;

/// Role of a principal.
///
/// The set is closed: there are exactly four roles and nothing else. There is
/// no hierarchy between them; a check for one role is never satisfied by
/// another (`Admin` does not "contain" `Editor`). Every privileged operation
/// spells out the roles it accepts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access to both resources.
    Admin,
    /// Content staff: unrestricted post editing, read-only on users.
    Editor,
    /// Read access plus content authoring parity with editors' own posts.
    Viewer,
    /// Any identity not explicitly granted a privileged role. Self-service
    /// and own-content operations only.
    #[default]
    Regular,
}

impl Role {
    /// All roles, in descending order of privilege.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Editor, Role::Viewer, Role::Regular];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
            Role::Regular => "regular",
        }
    }

    /// Whether a caller may request this role when an account is created.
    ///
    /// `Regular` is a fallback classification, never an assignable choice;
    /// account creation accepts only admin/editor/viewer (viewer when
    /// omitted).
    pub fn is_assignable(self) -> bool {
        self != Role::Regular
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "viewer" => Ok(Role::Viewer),
            "regular" => Ok(Role::Regular),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}
