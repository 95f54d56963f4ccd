//! # snipcheck-walker — Concurrent Tree Walker
//!
//! Visits every source file reachable from a root path and checks it with a
//! [`SnippetChecker`](snipcheck_schema::SnippetChecker).
//!
//! ## Completion
//!
//! Each directory spawns one task per child into a `JoinSet` and resolves
//! only after every child task, with its whole subtree, has been joined. The
//! root visit resolving is therefore the one and only completion signal:
//! no shared pending set, no race between the last two siblings.
//!
//! ## Filesystem Access
//!
//! All I/O goes through the [`SnippetFs`] trait. [`TokioFs`] is the real
//! filesystem; tests substitute in-memory trees with randomized latency.
//!
//! ## Failure Isolation
//!
//! A failed `stat`, directory listing, or read becomes a file-level
//! [`Outcome`](snipcheck_core::Outcome) for that path. Siblings continue. A
//! panicking task is not absorbed and resumes on the caller.

pub mod fs;
pub mod walker;

pub use fs::{EntryKind, SnippetFs, TokioFs};
pub use walker::{TreeWalker, WalkError};
