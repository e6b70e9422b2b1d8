//! Working tree providers
//!
//! - `GitSync`: clone-or-update a repository into the cache directory
//! - `resolve_local_tree`: use an existing directory as-is

mod git;
mod local;

pub use git::{redact, GitSync};
pub use local::resolve_local_tree;
