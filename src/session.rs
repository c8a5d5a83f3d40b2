use crate::config::ExplorerConfig;
use crate::indexer::{IndexedItem, SiteIndex};
use crate::navigation::{NavCommand, NavMode, NavigationState};
use crate::tree::{build, Tree};
use crate::ui_model::{folder_view, search_view, View};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

/// Everything one loaded index needs: the flat item list, the tree built from it and the
/// navigation position. Built once per load and owned by a single controller.
pub struct ExplorerSession {
    config: ExplorerConfig,
    items: Arc<Vec<IndexedItem>>,
    tree: Tree,
    nav: NavigationState,
    subscribers: Vec<Sender<View>>,
}

impl ExplorerSession {
    pub fn new(index: SiteIndex, config: ExplorerConfig) -> Self {
        let tree = build(&index.items, &config.root_segment);
        let nav = NavigationState::new(&config.root_segment);
        Self {
            items: Arc::new(index.items),
            tree,
            nav,
            config,
            subscribers: Vec::new(),
        }
    }

    pub fn items(&self) -> &Arc<Vec<IndexedItem>> {
        &self.items
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn is_browsing(&self) -> bool {
        self.nav.is_browsing()
    }

    /// Receives a fresh `View` after every command that changes the state.
    pub fn subscribe(&mut self) -> Receiver<View> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn view(&self) -> View {
        match self.nav.mode() {
            NavMode::Browsing => folder_view(&self.tree, self.nav.folder(), &self.config),
            NavMode::Searching(query) => search_view(&self.items, query, &self.config),
        }
    }

    pub fn dispatch(&mut self, command: NavCommand) -> bool {
        if !self.nav.apply(&command) {
            return false;
        }
        if !self.subscribers.is_empty() {
            let view = self.view();
            self.subscribers.retain(|tx| tx.send(view.clone()).is_ok());
        }
        true
    }
}
