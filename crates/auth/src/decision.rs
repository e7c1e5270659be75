use std::borrow::Cow;

/// Outcome of an authorization check.
///
/// A deny always carries a human-readable reason. Reasons are part of the
/// observable contract: the HTTP layer surfaces them verbatim in 403 bodies,
/// and tests assert on the exact strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Cow<'static, str>),
}

impl Decision {
    pub fn allow() -> Self {
        Decision::Allow
    }

    pub fn deny(reason: impl Into<Cow<'static, str>>) -> Self {
        Decision::Deny(reason.into())
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn is_deny(&self) -> bool {
        !self.is_allow()
    }

    /// The denial reason, if this is a deny.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::Deny(reason) => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deny_carries_its_reason() {
        let d = Decision::deny("nope");
        assert!(d.is_deny());
        assert_eq!(d.reason(), Some("nope"));
    }

    #[test]
    fn allow_has_no_reason() {
        assert!(Decision::allow().is_allow());
        assert_eq!(Decision::allow().reason(), None);
    }
}
