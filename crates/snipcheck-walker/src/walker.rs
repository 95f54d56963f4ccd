//! # Tree Walker
//!
//! ```text
//! visit(root)
//!   ├─ stat ──► Directory ──► read_dir ──► JoinSet { visit(child) ... } ──► join all
//!   ├─ stat ──► File (suffix matches) ──► read ──► SnippetChecker::check_source
//!   └─ stat ──► anything else ──► nothing
//! ```
//!
//! Every visit returns its own outcome list; a directory appends its
//! children's lists as they are joined. Outcomes therefore arrive in
//! completion order and must be sorted before presentation.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use thiserror::Error;
use tokio::task::{JoinError, JoinSet};

use snipcheck_core::{Outcome, OutcomeError};
use snipcheck_schema::SnippetChecker;

use crate::fs::{EntryKind, SnippetFs, TokioFs};

/// Fatal walker failure. Per-path I/O failures are outcomes, not errors.
#[derive(Error, Debug)]
pub enum WalkError {
    /// A visit task was cancelled before it settled.
    #[error("walker task did not complete: {0}")]
    TaskCancelled(#[source] JoinError),
}

/// Walks a directory tree and checks every source file in it.
#[derive(Clone)]
pub struct TreeWalker {
    ctx: Arc<WalkContext>,
}

struct WalkContext {
    fs: Arc<dyn SnippetFs>,
    checker: SnippetChecker,
}

type VisitFuture = Pin<Box<dyn Future<Output = Result<Vec<Outcome>, WalkError>> + Send>>;

impl TreeWalker {
    /// Walker over an arbitrary filesystem.
    pub fn new(fs: Arc<dyn SnippetFs>, checker: SnippetChecker) -> Self {
        Self {
            ctx: Arc::new(WalkContext { fs, checker }),
        }
    }

    /// Walker over the real filesystem.
    pub fn with_tokio_fs(checker: SnippetChecker) -> Self {
        Self::new(Arc::new(TokioFs), checker)
    }

    /// Visit everything under `root` and return all outcomes once every
    /// visit has settled.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::TaskCancelled`] if a visit task is cancelled.
    /// A panicking visit task resumes its panic here.
    pub async fn walk(&self, root: &Path) -> Result<Vec<Outcome>, WalkError> {
        tracing::debug!(root = %root.display(), "walking tree");
        let outcomes = visit(Arc::clone(&self.ctx), root.to_path_buf()).await?;

        let failed = outcomes.iter().filter(|o| !o.passed()).count();
        tracing::info!(
            root = %root.display(),
            outcomes = outcomes.len(),
            passed = outcomes.len() - failed,
            failed,
            "walk complete"
        );
        Ok(outcomes)
    }

    /// Visit everything under `root`, then hand the outcomes to
    /// `on_complete`. The callback runs exactly once, after the last visit
    /// settled, and never runs if the walk fails.
    pub async fn walk_then<C>(&self, root: &Path, on_complete: C) -> Result<(), WalkError>
    where
        C: FnOnce(Vec<Outcome>),
    {
        let outcomes = self.walk(root).await?;
        on_complete(outcomes);
        Ok(())
    }
}

fn visit(ctx: Arc<WalkContext>, path: PathBuf) -> VisitFuture {
    Box::pin(async move {
        let kind = match ctx.fs.stat(&path).await {
            Ok(kind) => kind,
            Err(err) => return Ok(vec![io_failure(&path, "stat", &err)]),
        };
        match kind {
            EntryKind::Directory => visit_directory(ctx, path).await,
            EntryKind::File => Ok(visit_file(&ctx, &path).await),
            EntryKind::Other => Ok(Vec::new()),
        }
    })
}

async fn visit_directory(ctx: Arc<WalkContext>, path: PathBuf) -> Result<Vec<Outcome>, WalkError> {
    let names = match ctx.fs.read_dir(&path).await {
        Ok(names) => names,
        Err(err) => return Ok(vec![io_failure(&path, "read_dir", &err)]),
    };
    tracing::trace!(dir = %path.display(), children = names.len(), "visiting directory");

    let mut children = JoinSet::new();
    for name in names {
        children.spawn(visit(Arc::clone(&ctx), path.join(name)));
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = children.join_next().await {
        match joined {
            Ok(child) => outcomes.extend(child?),
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => return Err(WalkError::TaskCancelled(err)),
        }
    }
    Ok(outcomes)
}

async fn visit_file(ctx: &WalkContext, path: &Path) -> Vec<Outcome> {
    let accepted = path
        .file_name()
        .is_some_and(|name| ctx.checker.accepts_file_name(&name.to_string_lossy()));
    if !accepted {
        return Vec::new();
    }

    match ctx.fs.read_to_string(path).await {
        Ok(text) => {
            let outcomes = ctx.checker.check_source(path, &text);
            tracing::debug!(file = %path.display(), blocks = outcomes.len(), "checked file");
            outcomes
        }
        Err(err) => vec![io_failure(path, "read", &err)],
    }
}

fn io_failure(path: &Path, op: &str, err: &std::io::Error) -> Outcome {
    tracing::warn!(path = %path.display(), op, error = %err, "filesystem access failed");
    Outcome::file_failure(path, OutcomeError::io(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const VALID: &str = "# METADATA: library-snippet\n# title: t\n# description: d\npackage x\n";
    const INVALID: &str = "# METADATA: library-snippet\n# title: t\npackage x\n";

    fn write(root: &Path, rel: &str, text: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, text).unwrap();
    }

    #[tokio::test]
    async fn walks_nested_directories_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.rego", VALID);
        write(dir.path(), "nested/b.rego", INVALID);
        write(dir.path(), "nested/deeper/c.rego", VALID);
        write(dir.path(), "nested/README.md", VALID);

        let walker = TreeWalker::with_tokio_fs(SnippetChecker::default());
        let mut outcomes = walker.walk(dir.path()).await.unwrap();
        snipcheck_core::sort_outcomes(&mut outcomes);

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].passed());
        assert!(outcomes[1].filename.ends_with("nested/b.rego"));
        assert!(!outcomes[1].passed());
        assert!(outcomes[2].passed());
    }

    #[tokio::test]
    async fn missing_root_is_a_file_level_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("does-not-exist");
        let outcomes = TreeWalker::with_tokio_fs(SnippetChecker::default())
            .walk(&root)
            .await
            .unwrap();
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].location.is_none());
        assert!(matches!(outcomes[0].errors[0], OutcomeError::Io(_)));
    }

    #[tokio::test]
    async fn root_may_be_a_single_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "only.rego", VALID);
        let outcomes = TreeWalker::with_tokio_fs(SnippetChecker::default())
            .walk(&dir.path().join("only.rego"))
            .await
            .unwrap();
        assert_eq!(outcomes.len(), 1);
    }

    #[tokio::test]
    async fn empty_directory_completes_once() {
        let dir = tempfile::tempdir().unwrap();
        let calls = AtomicUsize::new(0);
        TreeWalker::with_tokio_fs(SnippetChecker::default())
            .walk_then(dir.path(), |outcomes| {
                assert!(outcomes.is_empty());
                calls.fetch_add(1, Ordering::SeqCst);
            })
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_utf8_file_is_a_file_level_outcome() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bin.rego"), [0xff, 0xfe]).unwrap();
        write(dir.path(), "ok.rego", VALID);
        let outcomes = TreeWalker::with_tokio_fs(SnippetChecker::default())
            .walk(dir.path())
            .await
            .unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes.iter().filter(|o| o.location.is_none()).count(), 1);
    }
}
