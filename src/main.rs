// LeadDesk - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation
// 3. Lead store construction (persisted or in-memory snapshot)
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can still use
// `crate::app::...`, `crate::core::...` etc.
pub use leaddesk::app;
pub use leaddesk::core;
pub use leaddesk::platform;
pub use leaddesk::ui;
pub use leaddesk::util;

use app::persistence::{JsonFileStore, MemoryStore, SnapshotStore};
use clap::Parser;
use std::path::PathBuf;

/// LeadDesk - Desktop sales-lead manager.
///
/// Import leads from CSV or Excel files, triage them by disposition, and
/// export the results back to a spreadsheet.
#[derive(Parser, Debug)]
#[command(name = "LeadDesk", version, about)]
struct Cli {
    /// Lead file (.csv, .tsv, .txt, .xlsx, .xls, .ods) to import at startup.
    file: Option<PathBuf>,

    /// Directory holding the saved lead snapshot (overrides config and platform default).
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Keep leads in memory only; nothing is read from or written to disk.
    #[arg(long = "ephemeral")]
    ephemeral: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging so its [logging] section can apply;
    // its warnings are replayed once the subscriber is installed.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        ephemeral = cli.ephemeral,
        "LeadDesk starting"
    );

    // Snapshot location: CLI override > config override > platform default
    let persistence: Box<dyn SnapshotStore> = if cli.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        let data_dir = cli
            .data_dir
            .clone()
            .or_else(|| config.data_dir.clone())
            .unwrap_or_else(|| platform_paths.data_dir.clone());
        let store = JsonFileStore::in_dir(&data_dir);
        tracing::info!(path = %store.path().display(), "Using snapshot file");
        Box::new(store)
    };

    let store = app::store::LeadStore::new(persistence);
    let mut state = app::state::AppState::new(store, config.font_size, cli.debug);

    // A file given on the command line is imported on the first frame.
    if let Some(ref path) = cli.file {
        state.pending_import = Some(path.clone());
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([900.0, 560.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |_cc| Ok(Box::new(gui::LeadDeskApp::new(state)))),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch LeadDesk GUI: {e}");
        std::process::exit(1);
    }
}
