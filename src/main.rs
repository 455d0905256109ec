mod app;
mod cabinet;
mod components;
mod config;
mod error;
mod event;
mod handler;
mod logging;
mod source;
mod theme;
mod tui;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use crate::app::App;
use crate::config::{AppConfig, GeneralConfig, LoggingConfig, SourceConfig, ThemeConfig, UploadConfig};
use crate::event::{Event, EventHandler};
use crate::source::{FixtureSource, FolderSource, JsonFileSource, StubUploader};
use crate::tui::{install_panic_hook, Tui};

/// A terminal file cabinet: browse, rename, delete and upload items.
#[derive(Parser, Debug)]
#[command(name = "fcab", version, about)]
struct Cli {
    /// Folder id to open at startup
    folder: Option<String>,

    /// Path to a config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file with folder listings (built-in listing if omitted)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Color scheme: dark, light or custom
    #[arg(long)]
    theme: Option<String>,

    /// Milliseconds the upload control stays busy after an upload
    #[arg(long)]
    settle_ms: Option<u64>,

    /// Ask before deleting an item
    #[arg(long)]
    confirm_delete: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                initial_folder: self.folder.clone(),
                confirm_delete: self.confirm_delete.then_some(true),
                ..Default::default()
            },
            source: SourceConfig {
                data_file: self.data.clone(),
                ..Default::default()
            },
            upload: UploadConfig {
                settle_ms: self.settle_ms,
                ..Default::default()
            },
            logging: LoggingConfig {
                level: self.log_level.clone(),
                ..Default::default()
            },
            theme: ThemeConfig {
                scheme: self.theme.clone(),
                custom: None,
            },
        }
    }
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = match logging::init_logging(&config.log_directory(), config.log_level()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };
    tracing::info!(
        folder = config.initial_folder(),
        theme = config.theme_scheme(),
        "starting"
    );

    let source: Arc<dyn FolderSource> = match config.data_file() {
        Some(path) => Arc::new(JsonFileSource::new(path)),
        None => Arc::new(FixtureSource::new(Duration::from_millis(config.fetch_delay_ms()))),
    };
    let uploader = Arc::new(StubUploader::new(Duration::from_millis(config.upload_latency_ms())));

    install_panic_hook();

    let mut tui = Tui::new()?;
    let mut app = App::new(&config, source, uploader);
    let mut events = EventHandler::new(Duration::from_millis(config.tick_rate_ms()));
    let event_tx = events.sender();

    app.load_current(&event_tx);

    loop {
        tui.terminal_mut().draw(|frame| {
            ui::render(&app, frame);
        })?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key, &event_tx),
            Event::Tick => app.tick(),
            Event::Resize(_, _) => {}
            Event::FolderLoaded { ticket, result } => app.handle_folder_loaded(ticket, result),
            Event::UploadSucceeded {
                folder,
                id,
                version,
            } => app.handle_upload_succeeded(&folder, id, version),
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    tracing::info!("exiting");
    Ok(())
}
