use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_ROOT_SEGMENT: &str = "content";
pub const DEFAULT_INDEX_PATH: &str = "search-index.json";
pub const DEFAULT_MAX_RESULTS: usize = 20;
pub const MAX_RESULTS_CEILING: usize = 1000;

/// Where the site index is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSource {
    File(PathBuf),
    Url(String),
}

impl IndexSource {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            IndexSource::Url(trimmed.to_string())
        } else {
            IndexSource::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for IndexSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexSource::File(path) => write!(f, "{}", path.display()),
            IndexSource::Url(url) => f.write_str(url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    /// First path segment every browsable item must live under.
    pub root_segment: String,
    /// Prefix applied to root-absolute locators before they are opened.
    pub base_path: String,
    pub max_results: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            root_segment: DEFAULT_ROOT_SEGMENT.to_string(),
            base_path: String::new(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl ExplorerConfig {
    pub fn new(root_segment: &str, base_path: &str, max_results: usize) -> Self {
        let root_segment = root_segment.trim().trim_matches('/');
        Self {
            root_segment: if root_segment.is_empty() {
                DEFAULT_ROOT_SEGMENT.to_string()
            } else {
                root_segment.to_string()
            },
            base_path: base_path.trim().to_string(),
            max_results: max_results.clamp(1, MAX_RESULTS_CEILING),
        }
    }
}
