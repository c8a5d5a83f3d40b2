use crate::path;
use crate::search::normalize_query;
use crate::tree::parent_of;

/// Input events the explorer reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCommand {
    OpenFolder(String),
    GoUp,
    QueryChanged(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavMode {
    Browsing,
    /// Holds the normalized, non-empty query.
    Searching(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    root_segment: String,
    folder: String,
    mode: NavMode,
}

impl NavigationState {
    pub fn new(root_segment: &str) -> Self {
        Self {
            root_segment: root_segment.to_string(),
            folder: path::join(&[root_segment]),
            mode: NavMode::Browsing,
        }
    }

    /// Last browsed folder; kept while searching.
    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn mode(&self) -> &NavMode {
        &self.mode
    }

    pub fn active_query(&self) -> Option<&str> {
        match &self.mode {
            NavMode::Browsing => None,
            NavMode::Searching(query) => Some(query),
        }
    }

    /// Breadcrumb text: the folder path, or `/search: <query>` while searching.
    pub fn status(&self) -> String {
        match &self.mode {
            NavMode::Browsing => self.folder.clone(),
            NavMode::Searching(query) => format!("/search: {query}"),
        }
    }

    pub fn is_browsing(&self) -> bool {
        self.mode == NavMode::Browsing
    }

    /// Moves to any folder path. Existence is checked at render time, not here.
    /// Ignored while searching; clearing the query returns to the remembered folder.
    pub fn enter_folder(&mut self, folder: &str) {
        if self.is_browsing() {
            self.folder = path::normalize(folder);
        }
    }

    /// Ignored while searching, like `enter_folder`.
    pub fn go_up(&mut self) {
        if self.is_browsing() {
            self.folder = parent_of(&self.folder, &self.root_segment);
        }
    }

    pub fn type_query(&mut self, query: &str) {
        let normalized = normalize_query(query);
        self.mode = if normalized.is_empty() {
            NavMode::Browsing
        } else {
            NavMode::Searching(normalized)
        };
    }

    /// Applies one command; returns whether anything observable changed.
    pub fn apply(&mut self, command: &NavCommand) -> bool {
        let before = self.clone();
        match command {
            NavCommand::OpenFolder(folder) => self.enter_folder(folder),
            NavCommand::GoUp => self.go_up(),
            NavCommand::QueryChanged(query) => self.type_query(query),
        }
        let changed = *self != before;
        if changed {
            tracing::debug!(?command, status = %self.status(), "navigation state changed");
        }
        changed
    }
}
