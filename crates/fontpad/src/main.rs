#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate, clippy::missing_errors_doc)]

mod commands;
mod options;
mod terminal;

pub use options::*;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, Naming};
use fontpad_engine::{
    enumerate_weights, resolve, variant::display_label, CatalogSource, EditorRuntime, FileStore, FontCatalog, FontPadEditor, FontStyle, LocatorFontSource,
    MemoryStore,
};

use crate::terminal::{TerminalPresenter, TextSurface};

pub type TerminalResult<T> = anyhow::Result<T>;

#[derive(Parser, Debug)]
#[command(version, about = "Preview fonts from a font catalog", long_about = None)]
pub struct Args {
    /// Font catalog (path or http(s) URL), overrides the configured one
    #[arg(long, value_name = "SOURCE")]
    catalog: Option<String>,

    /// File the editor state is kept in
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Autosave interval in seconds, 0 disables periodic saves
    #[arg(long, value_name = "SECS")]
    autosave: Option<u64>,

    /// Write the effective options to options.toml
    #[arg(long, default_value_t = false)]
    write_config: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    #[command(about = "Interactive editor (default)")]
    Edit,

    #[command(about = "List the font families of the catalog")]
    Families,

    #[command(about = "List all weight options across families")]
    Weights,

    #[command(about = "Resolve a family/weight/style to a font locator")]
    Resolve {
        family: String,
        weight: String,
        #[arg(long, default_value_t = false)]
        italic: bool,
    },
}

fn get_log_dir() -> Option<PathBuf> {
    if let Some(proj_dirs) = directories::ProjectDirs::from("com", "GitHub", "fontpad") {
        let dir = proj_dirs.config_dir().to_path_buf();
        if !dir.exists() {
            std::fs::create_dir_all(&dir).ok()?;
        }
        return Some(dir);
    }
    None
}

fn start_logger() -> Option<flexi_logger::LoggerHandle> {
    let logger = match Logger::try_with_env_or_str("info") {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("Failed to configure logging: {err}");
            return None;
        }
    };
    let logger = if let Some(log_dir) = get_log_dir() {
        logger
            .log_to_file(FileSpec::default().directory(&log_dir).basename("fontpad").suffix("log").suppress_timestamp())
            .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
            .create_symlink(log_dir.join("fontpad.log"))
            .duplicate_to_stderr(flexi_logger::Duplicate::Warn)
    } else {
        eprintln!("Failed to create log file");
        logger.log_to_stderr()
    };
    match logger.start() {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logging: {err}");
            None
        }
    }
}

fn main() -> TerminalResult<()> {
    let args = Args::parse();
    let _logger = start_logger();

    log::info!("Starting fontpad {}", env!("CARGO_PKG_VERSION"));

    let mut options = Options::load_options()?;
    if let Some(catalog) = &args.catalog {
        options.catalog.clone_from(catalog);
    }
    if let Some(store) = &args.store {
        options.store_file = Some(store.clone());
    }
    if let Some(secs) = args.autosave {
        options.autosave_interval = Duration::from_secs(secs);
    }
    if args.write_config {
        options.store_options()?;
    }

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let source = CatalogSource::parse(&options.catalog);

    match args.command.unwrap_or(Commands::Edit) {
        Commands::Edit => runtime.block_on(run_editor(&options, source)),
        Commands::Families => {
            let catalog = runtime.block_on(FontCatalog::fetch(&source))?;
            for family in catalog.families() {
                println!("{family}");
            }
        }
        Commands::Weights => {
            let catalog = runtime.block_on(FontCatalog::fetch(&source))?;
            for key in enumerate_weights(&catalog) {
                println!("{:<12}{}", key, display_label(&key));
            }
        }
        Commands::Resolve { family, weight, italic } => {
            let catalog = runtime.block_on(FontCatalog::fetch(&source))?;
            let style = if italic { FontStyle::Italic } else { FontStyle::Normal };
            let resolution = resolve(&catalog, &family, &weight, style)?;
            println!("{}", resolution.locator);
            log::info!("Resolved {family} {weight} {style} to '{}' ({:?})", resolution.key, resolution.kind);
        }
    }

    log::info!("Shutting down.");
    Ok(())
}

async fn run_editor(options: &Options, source: CatalogSource) {
    println!("{}", commands::HELP);

    let surface = TextSurface::default();
    let presenter = TerminalPresenter::new(std::io::stdout(), surface.clone());
    let fonts = Arc::new(LocatorFontSource::new(source.base()));
    let runtime = EditorRuntime::new(fonts, options.autosave());

    let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel();
    tokio::spawn(commands::read_input(surface, event_tx));

    if let Some(path) = options.store_path() {
        log::info!("Editor state is kept in {}", path.display());
        let mut editor = FontPadEditor::new(FileStore::open(path), presenter);
        runtime.run(&mut editor, &source, event_rx).await;
    } else {
        log::warn!("No config directory available, editor state won't be kept");
        let mut editor = FontPadEditor::new(MemoryStore::new(), presenter);
        runtime.run(&mut editor, &source, event_rx).await;
    }
}
