use crate::config::IndexSource;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::io::Read;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Page,
    File,
}

/// One entry of the site index. Absent strings are kept as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexedItem {
    Page {
        title: String,
        url: String,
        path: String,
        body: Option<String>,
    },
    File {
        name: String,
        url: String,
        path: String,
    },
}

impl IndexedItem {
    pub fn kind(&self) -> ItemKind {
        match self {
            IndexedItem::Page { .. } => ItemKind::Page,
            IndexedItem::File { .. } => ItemKind::File,
        }
    }

    /// Page title or file name.
    pub fn label(&self) -> &str {
        match self {
            IndexedItem::Page { title, .. } => title,
            IndexedItem::File { name, .. } => name,
        }
    }

    pub fn locator(&self) -> &str {
        match self {
            IndexedItem::Page { url, .. } | IndexedItem::File { url, .. } => url,
        }
    }

    pub fn source_path(&self) -> &str {
        match self {
            IndexedItem::Page { path, .. } | IndexedItem::File { path, .. } => path,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            IndexedItem::Page { body, .. } => body.as_deref(),
            IndexedItem::File { .. } => None,
        }
    }

    /// Reference used for tree placement: the locator, then the source path.
    pub fn tree_reference(&self) -> Option<&str> {
        first_non_empty(self.locator(), self.source_path())
    }

    /// Reference used for search membership: the source path, then the locator.
    pub fn search_reference(&self) -> Option<&str> {
        first_non_empty(self.source_path(), self.locator())
    }
}

fn first_non_empty<'a>(preferred: &'a str, fallback: &'a str) -> Option<&'a str> {
    if !preferred.is_empty() {
        Some(preferred)
    } else if !fallback.is_empty() {
        Some(fallback)
    } else {
        None
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawIndex {
    pages: Vec<RawPage>,
    files: Vec<RawFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPage {
    title: Option<String>,
    url: Option<String>,
    path: Option<String>,
    body: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFile {
    name: Option<String>,
    url: Option<String>,
    path: Option<String>,
}

impl From<RawPage> for IndexedItem {
    fn from(raw: RawPage) -> Self {
        IndexedItem::Page {
            title: raw.title.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            path: raw.path.unwrap_or_default(),
            body: raw.body,
        }
    }
}

impl From<RawFile> for IndexedItem {
    fn from(raw: RawFile) -> Self {
        IndexedItem::File {
            name: raw.name.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            path: raw.path.unwrap_or_default(),
        }
    }
}

/// Flattened index: pages first, then files, each in document order.
#[derive(Debug, Clone, Default)]
pub struct SiteIndex {
    pub items: Vec<IndexedItem>,
}

impl SiteIndex {
    pub fn page_count(&self) -> usize {
        self.count(ItemKind::Page)
    }

    pub fn file_count(&self) -> usize {
        self.count(ItemKind::File)
    }

    fn count(&self, kind: ItemKind) -> usize {
        self.items.iter().filter(|item| item.kind() == kind).count()
    }
}

pub fn parse_index(text: &str) -> Result<SiteIndex> {
    let raw: RawIndex = serde_json::from_str(text)?;
    let mut items = Vec::with_capacity(raw.pages.len() + raw.files.len());
    items.extend(raw.pages.into_iter().map(IndexedItem::from));
    items.extend(raw.files.into_iter().map(IndexedItem::from));
    Ok(SiteIndex { items })
}

fn read_index_text(source: &IndexSource) -> Result<String> {
    match source {
        IndexSource::File(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read index {}", path.display())),
        IndexSource::Url(url) => fetch_index_text(url),
    }
}

fn fetch_index_text(url: &str) -> Result<String> {
    let response = match ureq::get(url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(code, _)) => {
            bail!("failed to fetch index {url}: HTTP status {code}")
        }
        Err(err) => return Err(err).with_context(|| format!("failed to fetch index {url}")),
    };
    // Not `into_string`: it rejects bodies over 10 MB.
    let mut text = String::new();
    response
        .into_reader()
        .read_to_string(&mut text)
        .with_context(|| format!("failed to fetch index {url}"))?;
    Ok(text)
}

pub fn load_index(source: &IndexSource) -> Result<SiteIndex> {
    let text = read_index_text(source)?;
    let index =
        parse_index(&text).with_context(|| format!("failed to parse index {source}"))?;
    tracing::info!(
        source = %source,
        pages = index.page_count(),
        files = index.file_count(),
        "site index loaded"
    );
    Ok(index)
}
