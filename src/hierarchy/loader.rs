//! Build a [`NodeTree`] from a directory on disk.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::{Hierarchy, NodeId, NodeTree};
use crate::error::{GroveError, Result};

/// Options controlling which entries end up in the tree.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Maximum depth to descend (None = unlimited)
    pub max_depth: Option<usize>,

    /// Include hidden files/directories (starting with .)
    pub include_hidden: bool,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }
}

/// Load `path` into a tree whose root is expanded.
///
/// Directories come before files, each group sorted by name. Files carry
/// their size as the node detail.
pub fn load_directory(path: &Path, options: &LoadOptions) -> Result<NodeTree> {
    if !path.exists() {
        return Err(GroveError::PathNotFound(path.to_path_buf()));
    }

    let root_label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mut tree = NodeTree::new(root_label);
    let root = tree.root_id();

    let mut parents: HashMap<PathBuf, NodeId> = HashMap::new();
    parents.insert(path.to_path_buf(), root);

    let mut walker = WalkDir::new(path).min_depth(1).sort_by(compare_entries);
    if let Some(depth) = options.max_depth {
        walker = walker.max_depth(depth);
    }

    let include_hidden = options.include_hidden;
    let entries = walker
        .into_iter()
        .filter_entry(move |entry| include_hidden || !is_hidden(entry));

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(err.into()),
            Err(err) => {
                tracing::warn!(error = %err, "Skipping unreadable entry");
                continue;
            }
        };

        let Some(parent) = entry
            .path()
            .parent()
            .and_then(|parent| parents.get(parent))
            .copied()
        else {
            continue;
        };

        let label = entry.file_name().to_string_lossy().into_owned();
        let id = tree.push_child(parent, label);

        if entry.file_type().is_dir() {
            parents.insert(entry.path().to_path_buf(), id);
        } else if let Ok(metadata) = entry.metadata() {
            tree.set_detail(id, humansize::format_size(metadata.len(), humansize::BINARY));
        }
    }

    tree.relayout();
    tree.expand(root);

    tracing::debug!(path = %path.display(), nodes = tree.len(), "Loaded directory tree");
    Ok(tree)
}

fn compare_entries(a: &DirEntry, b: &DirEntry) -> Ordering {
    b.file_type()
        .is_dir()
        .cmp(&a.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_orders_directories_first() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("alpha.txt"), "a").unwrap();
        fs::create_dir(temp.path().join("zeta")).unwrap();
        fs::create_dir(temp.path().join("beta")).unwrap();

        let tree = load_directory(temp.path(), &LoadOptions::new()).unwrap();
        let root = tree.root_id();

        assert!(tree.is_expanded(root));
        let labels: Vec<_> = (0..tree.children_count(root))
            .filter_map(|i| tree.child(root, i))
            .filter_map(|id| tree.label(id))
            .collect();
        assert_eq!(labels, ["beta", "zeta", "alpha.txt"]);
    }

    #[test]
    fn test_load_nests_children() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("src/bin")).unwrap();
        fs::write(temp.path().join("src/lib.rs"), "pub fn x() {}").unwrap();

        let tree = load_directory(temp.path(), &LoadOptions::new()).unwrap();

        let lib = tree.find_relative(&["src", "lib.rs"]).unwrap();
        assert!(tree.find_relative(&["src", "bin"]).is_some());
        assert!(tree.detail(lib).is_some());
        // Only the root starts expanded.
        let src = tree.find_relative(&["src"]).unwrap();
        assert!(!tree.is_expanded(src));
    }

    #[test]
    fn test_load_skips_hidden_by_default() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(".secret"), "x").unwrap();
        fs::write(temp.path().join("visible"), "x").unwrap();

        let tree = load_directory(temp.path(), &LoadOptions::new()).unwrap();
        assert!(tree.find_relative(&[".secret"]).is_none());

        let tree = load_directory(temp.path(), &LoadOptions::new().with_hidden(true)).unwrap();
        assert!(tree.find_relative(&[".secret"]).is_some());
    }

    #[test]
    fn test_load_respects_max_depth() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("a/b/c")).unwrap();

        let tree = load_directory(temp.path(), &LoadOptions::new().with_max_depth(2)).unwrap();
        assert!(tree.find_relative(&["a", "b"]).is_some());
        assert!(tree.find_relative(&["a", "b", "c"]).is_none());
    }

    #[test]
    fn test_load_missing_path() {
        let result = load_directory(Path::new("/definitely/not/here"), &LoadOptions::new());
        assert!(matches!(result, Err(GroveError::PathNotFound(_))));
    }
}
