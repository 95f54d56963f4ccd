//! In-memory filesystem with randomized latency for walker tests.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use snipcheck_walker::{EntryKind, SnippetFs};

#[derive(Debug, Clone)]
pub enum Node {
    Dir(Vec<String>),
    File(String),
    /// Stats as a file, fails to read.
    Unreadable,
    /// Stats as a directory, fails to list.
    UnlistableDir,
    Other,
}

#[derive(Debug, Default)]
pub struct MemoryFs {
    nodes: HashMap<PathBuf, Node>,
    max_delay_ms: u64,
    reads: AtomicUsize,
    in_flight: AtomicUsize,
}

impl MemoryFs {
    pub fn new(max_delay_ms: u64) -> Self {
        Self {
            max_delay_ms,
            ..Self::default()
        }
    }

    /// Insert a file, creating parent directories on the way.
    pub fn file(mut self, path: &str, text: &str) -> Self {
        self.insert(PathBuf::from(path), Node::File(text.to_owned()));
        self
    }

    pub fn node(mut self, path: &str, node: Node) -> Self {
        self.insert(PathBuf::from(path), node);
        self
    }

    /// Number of successful `read_to_string` calls so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Calls that have started but not yet returned.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn insert(&mut self, path: PathBuf, node: Node) {
        let mut child = path.clone();
        while let Some(parent) = child.parent().map(Path::to_path_buf) {
            if parent.as_os_str().is_empty() {
                break;
            }
            let name = child
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let entry = self
                .nodes
                .entry(parent.clone())
                .or_insert_with(|| Node::Dir(Vec::new()));
            if let Node::Dir(children) = entry {
                if !children.contains(&name) {
                    children.push(name);
                    children.sort();
                }
            }
            child = parent;
        }
        match (self.nodes.get(&path), &node) {
            (Some(Node::Dir(_)), Node::Dir(_)) => {}
            _ => {
                self.nodes.insert(path, node);
            }
        }
    }

    async fn pause(&self) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let delay = rand::thread_rng().gen_range(0..=self.max_delay_ms);
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    fn settle(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn lookup(&self, path: &Path) -> io::Result<Node> {
        self.nodes
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such entry"))
    }
}

#[async_trait]
impl SnippetFs for MemoryFs {
    async fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        self.pause().await;
        let result = self.lookup(path).map(|node| match node {
            Node::Dir(_) | Node::UnlistableDir => EntryKind::Directory,
            Node::File(_) | Node::Unreadable => EntryKind::File,
            Node::Other => EntryKind::Other,
        });
        self.settle();
        result
    }

    async fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        self.pause().await;
        let result = match self.lookup(path) {
            Ok(Node::Dir(children)) => Ok(children),
            Ok(_) => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "directory not listable",
            )),
            Err(err) => Err(err),
        };
        self.settle();
        result
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.pause().await;
        let result = match self.lookup(path) {
            Ok(Node::File(text)) => {
                self.reads.fetch_add(1, Ordering::SeqCst);
                Ok(text)
            }
            Ok(_) => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "file not readable",
            )),
            Err(err) => Err(err),
        };
        self.settle();
        result
    }
}
