use byline_auth::Principal;
use byline_core::UserId;

/// Authenticated identity for a request.
///
/// Inserted by the auth middleware after the token's subject has been
/// re-read from the user store, so the role in here is the subject's
/// current role, not whatever it was when the token was minted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    principal: Principal,
}

impl CurrentUser {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn principal(&self) -> Principal {
        self.principal
    }

    pub fn id(&self) -> UserId {
        self.principal.id
    }
}
