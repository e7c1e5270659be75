//! Action vocabulary the authorization core reasons over.
//!
//! Actions are values, not stored entities. Each resource has its own action
//! set; both classify onto the coarse [`Access`] classes the role matrix in
//! [`crate::authority`] is keyed by.

/// Coarse action class, independent of the concrete action name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Access {
    Read,
    Create,
    Update,
    Delete,
}

/// Resource-type hint for coarse checks evaluated before a target is known.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Posts,
    Users,
}

/// Actions on the post resource.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PostAction {
    /// View a single post.
    View,
    /// List the collection.
    ViewAny,
    Create,
    Update,
    Delete,
}

impl PostAction {
    pub fn access(self) -> Access {
        match self {
            PostAction::View | PostAction::ViewAny => Access::Read,
            PostAction::Create => Access::Create,
            PostAction::Update => Access::Update,
            PostAction::Delete => Access::Delete,
        }
    }
}

/// Actions on the user resource.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UserAction {
    List,
    Show,
    Create,
    Update,
    Delete,
    /// Change another user's role. Classified as an update for the coarse
    /// matrix; the instance-level rule lives in [`crate::user_policy`].
    Promote,
}

impl UserAction {
    pub fn access(self) -> Access {
        match self {
            UserAction::List | UserAction::Show => Access::Read,
            UserAction::Create => Access::Create,
            UserAction::Update | UserAction::Promote => Access::Update,
            UserAction::Delete => Access::Delete,
        }
    }
}
