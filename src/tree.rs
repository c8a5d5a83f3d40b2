//! Folder hierarchy built from the flat index, plus the read-only navigation helpers over it.

use crate::indexer::{IndexedItem, ItemKind};
use crate::path;
use std::cmp::Ordering;
use std::collections::HashMap;

pub const ROOT_NAME: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafRef {
    pub kind: ItemKind,
    pub display_name: String,
    pub locator: String,
    pub source_path: String,
    pub full_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub name: String,
    pub children: HashMap<String, TreeNode>,
    pub leaves: Vec<LeafRef>,
}

impl TreeNode {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: HashMap::new(),
            leaves: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.leaves.is_empty()
    }

    fn count(&self) -> (usize, usize) {
        self.children
            .values()
            .fold((self.children.len(), self.leaves.len()), |acc, child| {
                let (folders, leaves) = child.count();
                (acc.0 + folders, acc.1 + leaves)
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    pub root: TreeNode,
}

impl Tree {
    /// Number of folders and leaves below the synthetic root.
    pub fn stats(&self) -> (usize, usize) {
        self.root.count()
    }
}

fn leaf_display_name(item: &IndexedItem, terminal: &str) -> String {
    match item {
        IndexedItem::Page { title, .. } if !title.is_empty() => title.clone(),
        IndexedItem::Page { .. } => terminal.to_string(),
        IndexedItem::File { name, .. } => name.clone(),
    }
}

/// Places every item under `root_segment` into a fresh tree. Items whose reference is empty or
/// falls outside the content root are skipped.
pub fn build(items: &[IndexedItem], root_segment: &str) -> Tree {
    let mut root = TreeNode::new(ROOT_NAME);
    let mut skipped = 0usize;

    for item in items {
        let Some(reference) = item.tree_reference() else {
            skipped += 1;
            continue;
        };
        let segments = path::split(reference);
        if !path::is_under_root(&segments, root_segment) {
            skipped += 1;
            continue;
        }
        let Some((terminal, folders)) = segments.split_last() else {
            skipped += 1;
            continue;
        };

        let mut node = &mut root;
        for segment in folders {
            node = node
                .children
                .entry((*segment).to_string())
                .or_insert_with(|| TreeNode::new(segment));
        }
        // The terminal segment is always a leaf, even when a folder of the same name exists.
        node.leaves.push(LeafRef {
            kind: item.kind(),
            display_name: leaf_display_name(item, terminal),
            locator: item.locator().to_string(),
            source_path: item.source_path().to_string(),
            full_path: path::join(&segments),
        });
    }

    let tree = Tree { root };
    let (folders, leaves) = tree.stats();
    tracing::debug!(folders, leaves, skipped, "folder tree built");
    tree
}

/// Walks `folder_path` from the root; `None` when any segment is missing.
pub fn resolve<'a>(tree: &'a Tree, folder_path: &str) -> Option<&'a TreeNode> {
    path::split(folder_path)
        .into_iter()
        .try_fold(&tree.root, |node, segment| node.children.get(segment))
}

/// Parent folder of `folder_path`, never rising above the content root.
pub fn parent_of(folder_path: &str, root_segment: &str) -> String {
    let mut segments = path::split(folder_path);
    segments.pop();
    if !path::is_under_root(&segments, root_segment) {
        return path::join(&[root_segment]);
    }
    path::join(&segments)
}

/// Case-aware ordering close to a browser's default `localeCompare`: letters compare
/// case-insensitively first, lowercase sorts before uppercase on ties. Digits and punctuation
/// compare by code point, so `file10` sorts before `file2`.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| {
        a.chars()
            .zip(b.chars())
            .find(|(x, y)| x != y)
            .map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => x.cmp(&y),
            })
            .unwrap_or_else(|| a.len().cmp(&b.len()))
    })
}

pub fn list_folders(node: &TreeNode) -> Vec<&str> {
    let mut names: Vec<&str> = node.children.keys().map(String::as_str).collect();
    names.sort_by(|a, b| locale_cmp(a, b));
    names
}

pub fn list_leaves(node: &TreeNode) -> Vec<&LeafRef> {
    let mut leaves: Vec<&LeafRef> = node.leaves.iter().collect();
    leaves.sort_by(|a, b| locale_cmp(&a.display_name, &b.display_name));
    leaves
}
