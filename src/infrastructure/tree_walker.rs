// src/infrastructure/tree_walker.rs
use crate::constants::MAX_TREE_DEPTH;
use crate::domain::{DomainError, TreeNode};
use std::path::Path;
use tracing::{instrument, warn};
use walkdir::WalkDir;

/// Build the nested listing of everything below `root`.
///
/// The walk is pre-order, so every entry arrives after its parent directory.
/// Open directories are kept on a stack together with their depth; an entry
/// at depth `d` closes every open directory at depth `>= d` before it is
/// attached to the directory left on top.
///
/// Symbolic links are not followed and are reported as leaves.
#[instrument(level = "debug", fields(root = %root.display()))]
pub fn list_tree(root: &Path) -> Result<Vec<TreeNode>, DomainError> {
    if !root.is_dir() {
        return Err(DomainError::RootNotFound(root.to_path_buf()));
    }

    let mut top_level: Vec<TreeNode> = Vec::new();
    let mut open: Vec<(usize, TreeNode)> = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(MAX_TREE_DEPTH)
        .follow_links(false);

    for entry in walker {
        let entry = entry.map_err(|e| {
            DomainError::StorageError(format!("Failed to read notes tree: {}", e))
        })?;
        let depth = entry.depth();

        close_until(&mut open, &mut top_level, depth);

        let id = relative_id(root, entry.path())?;
        let name = entry.file_name().to_string_lossy().into_owned();

        if entry.file_type().is_dir() {
            if depth == MAX_TREE_DEPTH {
                warn!(%id, max_depth = MAX_TREE_DEPTH, "Directory too deep, listing without children");
            }
            open.push((depth, TreeNode::directory(id, name)));
        } else {
            attach(&mut open, &mut top_level, TreeNode::file(id, name));
        }
    }

    close_until(&mut open, &mut top_level, 1);
    Ok(top_level)
}

/// Pop every open directory at `depth` or deeper into its parent
fn close_until(open: &mut Vec<(usize, TreeNode)>, top_level: &mut Vec<TreeNode>, depth: usize) {
    while open.last().is_some_and(|(d, _)| *d >= depth) {
        if let Some((_, dir)) = open.pop() {
            attach(open, top_level, dir);
        }
    }
}

fn attach(open: &mut [(usize, TreeNode)], top_level: &mut Vec<TreeNode>, node: TreeNode) {
    match open.last_mut() {
        Some((_, parent)) => parent.children.get_or_insert_with(Vec::new).push(node),
        None => top_level.push(node),
    }
}

/// Root-relative id with `/` separators regardless of platform
fn relative_id(root: &Path, path: &Path) -> Result<String, DomainError> {
    let relative = path.strip_prefix(root).map_err(|_| {
        DomainError::StorageError(format!("{} is outside the notes root", path.display()))
    })?;
    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}
