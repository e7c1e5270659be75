//! `byline-auth`: pure authorization boundary for the content API.
//!
//! Every decision function in this crate is a pure function of its explicit
//! arguments: the acting [`Principal`] and, where an instance-level decision
//! is needed, the target resource. There is no ambient "current user", no
//! registry, no IO, and no caching, so identical inputs always produce
//! identical decisions.
//!
//! Layering:
//! - [`authority`] answers coarse, role-only questions ("may editors touch
//!   posts at all?") before a concrete target is known.
//! - [`post_policy`] decides per-post update/delete/view by combining the
//!   role with the post's ownership.
//! - [`user_policy`] carries the self-protection rules for the user resource
//!   (self is identity equality, never any other attribute).
//!
//! Authentication is out of scope for the decision functions: callers must
//! only invoke them with a resolved principal. Token plumbing ([`claims`],
//! [`token`]) lives here because it is transport-agnostic, but it never
//! participates in a decision.

pub mod action;
pub mod authority;
pub mod claims;
pub mod decision;
pub mod post_policy;
pub mod principal;
pub mod role;
pub mod token;
pub mod user_policy;

pub use action::{Access, PostAction, ResourceKind, UserAction};
pub use claims::{Claims, TokenValidationError, validate_claims};
pub use decision::Decision;
pub use post_policy::Owned;
pub use principal::Principal;
pub use role::Role;
pub use token::{Hs256TokenCodec, TokenError, TokenValidator};
