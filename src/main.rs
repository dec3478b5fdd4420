use clap::Parser;
use classify_app::main::ClassifyApp;
use cli::{Cli, DisplayKind};
use display::impl_console::DisplayConsole;
use display::impl_gui::{run_window, DisplayGui};
use history::store::HistoryStore;
use image_classifier::impl_fake::ImageClassifierFake;
use image_classifier::impl_http::ImageClassifierHttp;
use image_classifier::interface::ImageClassifier;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::sync::{Arc, Mutex};
use storage::impl_file::StorageFile;

mod classify_app;
mod cli;
mod config;
mod display;
mod history;
mod image_classifier;
mod library;
mod result_view;
mod storage;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let config = cli.to_config();

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone, cli.verbose));

    let storage = Arc::new(StorageFile::new(config.data_dir.clone()));
    let mut history = HistoryStore::new(
        storage,
        config.history_key.clone(),
        config.history_capacity,
        logger.clone(),
    );
    history.load();
    let history = Arc::new(Mutex::new(history));

    let image_classifier: Arc<dyn ImageClassifier + Send + Sync> = if cli.fake {
        Arc::new(ImageClassifierFake::new(logger.clone()))
    } else {
        Arc::new(ImageClassifierHttp::new(logger.clone())?)
    };

    match cli.display {
        DisplayKind::Console => {
            let display = Arc::new(Mutex::new(DisplayConsole::new()));
            let app = ClassifyApp::new(config, logger, image_classifier, history, display);
            app.run()?;
        }
        DisplayKind::Gui => {
            let display = DisplayGui::new();
            let window = display.window();
            let app = ClassifyApp::new(
                config,
                logger.clone(),
                image_classifier,
                history,
                Arc::new(Mutex::new(display)),
            );
            std::thread::spawn(move || {
                if let Err(e) = app.run() {
                    let _ = logger.error(&format!("app stopped: {}", e));
                }
            });
            run_window(window)?;
        }
    }

    Ok(())
}
