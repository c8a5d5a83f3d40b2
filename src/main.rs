#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use site_explorer::app::SiteExplorerApp;
use site_explorer::config::{
    ExplorerConfig, IndexSource, DEFAULT_INDEX_PATH, DEFAULT_MAX_RESULTS, DEFAULT_ROOT_SEGMENT,
};
use site_explorer::indexer::load_index;
use site_explorer::navigation::NavCommand;
use site_explorer::session::ExplorerSession;
use site_explorer::ui_model::render_text;

#[derive(Parser, Debug)]
#[command(name = "siteexplorer")]
#[command(about = "Browse and search a static site's JSON index")]
struct Args {
    #[arg(default_value = "")]
    query: String,
    /// Index file path or http(s) URL.
    #[arg(long, default_value = DEFAULT_INDEX_PATH)]
    index: String,
    #[arg(long, default_value = DEFAULT_ROOT_SEGMENT)]
    root_segment: String,
    /// Prefix for root-absolute locators.
    #[arg(long, default_value = "")]
    base: String,
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    limit: usize,
    /// Folder to list in CLI mode; defaults to the content root.
    #[arg(long)]
    folder: Option<String>,
    #[arg(long, default_value_t = false)]
    cli: bool,
}

impl Args {
    fn config(&self) -> ExplorerConfig {
        ExplorerConfig::new(&self.root_segment, &self.base, self.limit)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_cli(args: &Args) -> Result<()> {
    let index = load_index(&IndexSource::parse(&args.index))?;
    let mut session = ExplorerSession::new(index, args.config());
    if let Some(folder) = &args.folder {
        session.dispatch(NavCommand::OpenFolder(folder.clone()));
    }
    session.dispatch(NavCommand::QueryChanged(args.query.clone()));
    print!("{}", render_text(&session.view()));
    Ok(())
}

fn run_gui(args: &Args) -> Result<()> {
    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport =
        eframe::egui::ViewportBuilder::default().with_inner_size(eframe::egui::vec2(1100.0, 800.0));
    let source = IndexSource::parse(&args.index);
    let config = args.config();
    let query = args.query.clone();

    eframe::run_native(
        "Site Explorer",
        native_options,
        Box::new(move |_cc| Ok(Box::new(SiteExplorerApp::new(source, config, query)))),
    )
    .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    if args.cli {
        run_cli(&args)
    } else {
        run_gui(&args)
    }
}
