use crate::config::ExplorerConfig;
use crate::indexer::{IndexedItem, ItemKind};
use crate::path;
use crate::search::search_items;
use crate::tree::{list_folders, list_leaves, resolve, LeafRef, Tree};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRow {
    pub name: String,
    /// Absolute folder path to pass back as `OpenFolder`.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub kind: ItemKind,
    pub label: String,
    /// Locator with the configured base applied.
    pub href: String,
    pub source_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewBody {
    Listing {
        folders: Vec<FolderRow>,
        leaves: Vec<EntryRow>,
    },
    Empty,
    NotFound {
        path: String,
    },
    Results {
        query: String,
        entries: Vec<EntryRow>,
    },
    NoMatches {
        query: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub status: String,
    pub body: ViewBody,
}

/// Bootstrap state of a viewer; `Failed` replaces every other view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

impl LoadState {
    pub fn message(&self) -> Option<String> {
        match self {
            LoadState::Loading => Some("Loading index...".to_string()),
            LoadState::Ready => None,
            LoadState::Failed(error) => Some(format!("Failed to load index: {error}")),
        }
    }
}

pub fn kind_marker(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Page => "[page]",
        ItemKind::File => "[file]",
    }
}

fn leaf_row(leaf: &LeafRef, base: &str) -> EntryRow {
    EntryRow {
        kind: leaf.kind,
        label: leaf.display_name.clone(),
        href: path::with_base(base, &leaf.locator),
        source_path: leaf.source_path.clone(),
    }
}

fn item_row(item: &IndexedItem, base: &str) -> EntryRow {
    let label = match item {
        IndexedItem::Page { title, .. } if title.is_empty() => item
            .search_reference()
            .and_then(|reference| path::split(reference).last().copied())
            .unwrap_or_default()
            .to_string(),
        _ => item.label().to_string(),
    };
    EntryRow {
        kind: item.kind(),
        label,
        href: path::with_base(base, item.locator()),
        source_path: item.source_path().to_string(),
    }
}

pub fn folder_view(tree: &Tree, folder: &str, config: &ExplorerConfig) -> View {
    let folder = path::normalize(folder);
    let body = match resolve(tree, &folder) {
        None => ViewBody::NotFound {
            path: folder.clone(),
        },
        Some(node) if node.is_empty() => ViewBody::Empty,
        Some(node) => {
            let prefix = path::split(&folder);
            let folders = list_folders(node)
                .into_iter()
                .map(|name| {
                    let mut segments = prefix.clone();
                    segments.push(name);
                    FolderRow {
                        name: name.to_string(),
                        path: path::join(&segments),
                    }
                })
                .collect();
            let leaves = list_leaves(node)
                .into_iter()
                .map(|leaf| leaf_row(leaf, &config.base_path))
                .collect();
            ViewBody::Listing { folders, leaves }
        }
    };
    View {
        status: folder,
        body,
    }
}

pub fn search_view(items: &[IndexedItem], query: &str, config: &ExplorerConfig) -> View {
    let entries: Vec<EntryRow> =
        search_items(items, query, &config.root_segment, config.max_results)
            .into_iter()
            .map(|item| item_row(item, &config.base_path))
            .collect();
    let body = if entries.is_empty() {
        ViewBody::NoMatches {
            query: query.to_string(),
        }
    } else {
        ViewBody::Results {
            query: query.to_string(),
            entries,
        }
    };
    View {
        status: format!("/search: {query}"),
        body,
    }
}

/// Character positions of the first case-insensitive occurrence of `query` in `text`.
pub fn match_positions(text: &str, query: &str) -> HashSet<usize> {
    let mut out = HashSet::new();
    let q_chars: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    if q_chars.is_empty() {
        return out;
    }
    let text_chars: Vec<char> = text.chars().collect();
    if q_chars.len() > text_chars.len() {
        return out;
    }

    let chars_equal = |a: char, b: char| a == b || a.to_lowercase().eq(b.to_lowercase());
    for start in 0..=text_chars.len() - q_chars.len() {
        if q_chars
            .iter()
            .enumerate()
            .all(|(offset, q)| chars_equal(text_chars[start + offset], *q))
        {
            out.extend(start..start + q_chars.len());
            break;
        }
    }
    out
}

fn entry_line(entry: &EntryRow) -> String {
    format!("{} {}\t{}", kind_marker(entry.kind), entry.label, entry.href)
}

/// Plain-text rendering, one row per line, status first.
pub fn render_text(view: &View) -> String {
    let mut lines = vec![view.status.clone()];
    match &view.body {
        ViewBody::Listing { folders, leaves } => {
            lines.extend(folders.iter().map(|folder| format!("[dir]  {}/", folder.name)));
            lines.extend(leaves.iter().map(entry_line));
        }
        ViewBody::Empty => lines.push("<empty folder>".to_string()),
        ViewBody::NotFound { path } => lines.push(format!("<not found: {path}>")),
        ViewBody::Results { entries, .. } => lines.extend(entries.iter().map(entry_line)),
        ViewBody::NoMatches { .. } => lines.push("<no matches>".to_string()),
    }
    format!("{}\n", lines.join("\n"))
}
