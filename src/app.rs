use crate::actions::open_locator;
use crate::config::{ExplorerConfig, IndexSource};
use crate::indexer::{load_index, SiteIndex};
use crate::navigation::NavCommand;
use crate::session::ExplorerSession;
use crate::ui_model::{kind_marker, match_positions, EntryRow, LoadState, View, ViewBody};
use eframe::egui;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

struct IndexRequest {
    request_id: u64,
    source: IndexSource,
}

enum IndexResponse {
    Finished { request_id: u64, index: SiteIndex },
    Failed { request_id: u64, error: String },
}

fn spawn_index_worker() -> (Sender<IndexRequest>, Receiver<IndexResponse>) {
    let (tx_req, rx_req) = mpsc::channel::<IndexRequest>();
    let (tx_res, rx_res) = mpsc::channel::<IndexResponse>();

    thread::spawn(move || {
        while let Ok(mut req) = rx_req.recv() {
            while let Ok(newer) = rx_req.try_recv() {
                req = newer;
            }
            let msg = match load_index(&req.source) {
                Ok(index) => IndexResponse::Finished {
                    request_id: req.request_id,
                    index,
                },
                Err(err) => IndexResponse::Failed {
                    request_id: req.request_id,
                    error: format!("{err:#}"),
                },
            };
            if tx_res.send(msg).is_err() {
                break;
            }
        }
    });

    (tx_req, rx_res)
}

enum RowAction {
    Command(NavCommand),
    Open(String),
}

pub struct SiteExplorerApp {
    source: IndexSource,
    config: ExplorerConfig,
    query: String,
    load_state: LoadState,
    session: Option<ExplorerSession>,
    view: Option<View>,
    view_rx: Option<Receiver<View>>,
    notice: String,
    status_line: String,
    index_tx: Sender<IndexRequest>,
    index_rx: Receiver<IndexResponse>,
    next_index_request_id: u64,
    pending_index_request_id: Option<u64>,
}

impl SiteExplorerApp {
    pub fn new(source: IndexSource, config: ExplorerConfig, query: String) -> Self {
        let (index_tx, index_rx) = spawn_index_worker();
        let mut app = Self {
            source,
            config,
            query,
            load_state: LoadState::Loading,
            session: None,
            view: None,
            view_rx: None,
            notice: String::new(),
            status_line: String::new(),
            index_tx,
            index_rx,
            next_index_request_id: 1,
            pending_index_request_id: None,
        };
        app.request_index_refresh();
        app
    }

    fn refresh_status_line(&mut self) {
        let mut parts = vec![format!("Index: {}", self.source)];
        match (&self.load_state, &self.session) {
            (LoadState::Ready, Some(session)) => {
                let (folders, leaves) = session.tree().stats();
                parts.push(format!(
                    "Items: {} | Folders: {} | Browsable: {}",
                    session.items().len(),
                    folders,
                    leaves
                ));
            }
            (state, _) => parts.extend(state.message()),
        }
        if !self.notice.is_empty() {
            parts.push(self.notice.clone());
        }
        self.status_line = parts.join(" | ");
    }

    fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = notice.into();
        self.refresh_status_line();
    }

    fn request_index_refresh(&mut self) {
        let request_id = self.next_index_request_id;
        self.next_index_request_id = self.next_index_request_id.saturating_add(1);
        self.pending_index_request_id = Some(request_id);

        self.session = None;
        self.view = None;
        self.view_rx = None;
        self.load_state = LoadState::Loading;
        self.notice.clear();
        self.refresh_status_line();

        let req = IndexRequest {
            request_id,
            source: self.source.clone(),
        };
        if self.index_tx.send(req).is_err() {
            self.pending_index_request_id = None;
            self.load_state = LoadState::Failed("index worker is unavailable".to_string());
            self.refresh_status_line();
        }
    }

    fn poll_index_response(&mut self) {
        while let Ok(msg) = self.index_rx.try_recv() {
            match msg {
                IndexResponse::Finished { request_id, index } => {
                    if Some(request_id) != self.pending_index_request_id {
                        continue;
                    }
                    self.pending_index_request_id = None;
                    self.install_session(ExplorerSession::new(index, self.config.clone()));
                }
                IndexResponse::Failed { request_id, error } => {
                    if Some(request_id) != self.pending_index_request_id {
                        continue;
                    }
                    self.pending_index_request_id = None;
                    tracing::warn!(source = %self.source, %error, "index load failed");
                    self.load_state = LoadState::Failed(error);
                    self.refresh_status_line();
                }
            }
        }
    }

    fn install_session(&mut self, mut session: ExplorerSession) {
        self.view_rx = Some(session.subscribe());
        self.view = Some(session.view());
        self.session = Some(session);
        self.load_state = LoadState::Ready;
        if !self.query.trim().is_empty() {
            self.dispatch(NavCommand::QueryChanged(self.query.clone()));
        }
        self.refresh_status_line();
    }

    fn dispatch(&mut self, command: NavCommand) {
        if let Some(session) = self.session.as_mut() {
            session.dispatch(command);
        }
        self.poll_views();
    }

    /// "Up" is disabled while a query is active.
    fn can_go_up(&self) -> bool {
        self.session.as_ref().is_some_and(ExplorerSession::is_browsing)
    }

    fn poll_views(&mut self) {
        let Some(rx) = &self.view_rx else {
            return;
        };
        while let Ok(view) = rx.try_recv() {
            self.view = Some(view);
        }
    }

    fn open_entry(&mut self, href: &str) {
        match open_locator(href) {
            Ok(()) => self.set_notice(format!("Opened {href}")),
            Err(err) => self.set_notice(format!("{err:#}")),
        }
    }

    fn choose_index_file(&mut self) {
        match native_dialog::FileDialog::new()
            .add_filter("JSON index", &["json"])
            .show_open_single_file()
        {
            Ok(Some(path)) => {
                self.source = IndexSource::File(path);
                self.request_index_refresh();
            }
            Ok(None) => {}
            Err(err) => self.set_notice(format!("Browse failed: {err}")),
        }
    }

    fn entry_job(entry: &EntryRow, query: Option<&str>) -> egui::text::LayoutJob {
        let mut job = egui::text::LayoutJob::default();
        let kind_color = match entry.kind {
            crate::indexer::ItemKind::Page => egui::Color32::from_rgb(96, 165, 250),
            crate::indexer::ItemKind::File => egui::Color32::from_rgb(52, 211, 153),
        };
        job.append(
            &format!("{} ", kind_marker(entry.kind)),
            0.0,
            egui::TextFormat {
                color: kind_color,
                ..Default::default()
            },
        );

        let positions = query
            .map(|q| match_positions(&entry.label, q))
            .unwrap_or_default();
        for (idx, ch) in entry.label.chars().enumerate() {
            let color = if positions.contains(&idx) {
                egui::Color32::from_rgb(245, 158, 11)
            } else {
                egui::Color32::from_rgb(229, 231, 235)
            };
            job.append(
                &ch.to_string(),
                0.0,
                egui::TextFormat {
                    color,
                    ..Default::default()
                },
            );
        }

        if !entry.source_path.is_empty() {
            job.append(
                &format!("  {}", entry.source_path),
                0.0,
                egui::TextFormat {
                    color: egui::Color32::GRAY,
                    ..Default::default()
                },
            );
        }
        job
    }

    fn show_entries(
        ui: &mut egui::Ui,
        entries: &[EntryRow],
        query: Option<&str>,
        actions: &mut Vec<RowAction>,
    ) {
        for entry in entries {
            let response = ui
                .add(egui::Label::new(Self::entry_job(entry, query)).sense(egui::Sense::click()))
                .on_hover_text(&entry.href);
            if response.clicked() {
                actions.push(RowAction::Open(entry.href.clone()));
            }
        }
    }

    fn show_view(ui: &mut egui::Ui, view: &View, actions: &mut Vec<RowAction>) {
        match &view.body {
            ViewBody::Listing { folders, leaves } => {
                for folder in folders {
                    let response = ui.add(
                        egui::Label::new(
                            egui::RichText::new(format!("[dir]  {}/", folder.name))
                                .color(egui::Color32::from_rgb(250, 204, 21)),
                        )
                        .sense(egui::Sense::click()),
                    );
                    if response.clicked() {
                        actions.push(RowAction::Command(NavCommand::OpenFolder(
                            folder.path.clone(),
                        )));
                    }
                }
                Self::show_entries(ui, leaves, None, actions);
            }
            ViewBody::Empty => {
                ui.weak("This folder is empty.");
            }
            ViewBody::NotFound { path } => {
                ui.weak(format!("Folder not found: {path}"));
            }
            ViewBody::Results { query, entries } => {
                Self::show_entries(ui, entries, Some(query), actions);
            }
            ViewBody::NoMatches { query } => {
                ui.weak(format!("No matches for \"{query}\"."));
            }
        }
    }
}

impl eframe::App for SiteExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_index_response();
        self.poll_views();
        if self.pending_index_request_id.is_some() {
            ctx.request_repaint_after(Duration::from_millis(16));
        }

        let ready = self.session.is_some();
        let can_go_up = self.can_go_up();
        let mut commands: Vec<NavCommand> = Vec::new();

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Index: {}", self.source));
                if ui.button("Open Index...").clicked() {
                    self.choose_index_file();
                }
                if ui.button("Reload").clicked() {
                    self.request_index_refresh();
                }
            });

            ui.horizontal(|ui| {
                if ui.add_enabled(can_go_up, egui::Button::new("Up")).clicked() {
                    commands.push(NavCommand::GoUp);
                }
                let crumb = self
                    .view
                    .as_ref()
                    .map(|view| view.status.clone())
                    .unwrap_or_default();
                ui.monospace(crumb);
            });

            let response = ui.add_enabled(
                ready,
                egui::TextEdit::singleline(&mut self.query)
                    .desired_width(f32::INFINITY)
                    .hint_text("Search titles, names, paths and text..."),
            );
            if response.changed() {
                commands.push(NavCommand::QueryChanged(self.query.clone()));
            }
        });

        egui::TopBottomPanel::bottom("status")
            .resizable(false)
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.label(&self.status_line);
            });

        let mut actions: Vec<RowAction> = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(message) = self.load_state.message() {
                ui.heading(message);
                return;
            }
            let Some(view) = &self.view else {
                return;
            };
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| Self::show_view(ui, view, &mut actions));
        });

        for action in actions {
            match action {
                RowAction::Command(command) => commands.push(command),
                RowAction::Open(href) => self.open_entry(&href),
            }
        }
        for command in commands {
            self.dispatch(command);
        }
    }
}
