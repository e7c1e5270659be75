//! `byline-content`: the post entity and its creation/update validation.
//!
//! Posts are plain records: the core never interprets title or body beyond
//! requiring them to be non-empty. Authorization over posts lives in
//! `byline-auth`; this crate only supplies the ownership view of a post.

pub mod post;

pub use post::{Post, PostChanges};
