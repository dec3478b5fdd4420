use crate::classify_app::render::{ResultsPanel, Screen, StatusLine};
use crate::display::interface::{Display, InputEvent};
use crate::result_view::NO_DETAILED_PREDICTIONS;
use std::error::Error;
use std::fmt::Write as _;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver};

pub const HELP: &str = "\
Commands:
  classify <path>   upload an image (alias: c, or just type the path)
  url <base-url>    change the classification service URL
  test              check that the service is reachable
  clear             remove the current image
  help              show this help
  quit              exit (alias: exit)";

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Input(InputEvent),
    Help,
    Empty,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match (word.to_ascii_lowercase().as_str(), rest) {
        ("classify" | "c", path) if !path.is_empty() => {
            Command::Input(InputEvent::FileChosen(PathBuf::from(path)))
        }
        ("url", url) if !url.is_empty() => Command::Input(InputEvent::ApiUrlChanged(url.to_string())),
        ("test", "") => Command::Input(InputEvent::TestConnection),
        ("clear", "") => Command::Input(InputEvent::ClearImage),
        ("quit" | "exit", "") => Command::Input(InputEvent::Quit),
        ("help" | "?", "") => Command::Help,
        _ if PathBuf::from(line).is_file() => {
            Command::Input(InputEvent::FileChosen(PathBuf::from(line)))
        }
        _ => Command::Unknown(line.to_string()),
    }
}

fn status_text(status: &StatusLine) -> Option<String> {
    match status {
        StatusLine::None => None,
        StatusLine::Loading(text) => Some(format!("⏳ {}", text)),
        StatusLine::Success(text) => Some(format!("✔ {}", text)),
        StatusLine::Error(text) => Some(format!("✘ {}", text)),
    }
}

fn confidence_bar(fraction: f64) -> String {
    let filled = ((fraction * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

pub fn render_text(screen: &Screen) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "──────────── Waste Classifier ────────────");
    let _ = writeln!(out, "API: {}", screen.api_base_url);
    if let Some(connection) = status_text(&screen.connection) {
        let _ = writeln!(out, "  {}", connection);
    }
    if let Some(preview) = &screen.preview {
        let _ = writeln!(out, "Image: {}", preview.summary());
    }
    if let Some(status) = status_text(&screen.status) {
        let _ = writeln!(out, "{}", status);
    }

    match &screen.results {
        ResultsPanel::Empty => {
            let _ = writeln!(out, "Upload an image to see results.");
        }
        ResultsPanel::Processing => {
            let _ = writeln!(out, "Processing...");
        }
        ResultsPanel::Result(view) => {
            let bar = view
                .confidence_fraction
                .map(confidence_bar)
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "{} {}  {} {}",
                view.icon.glyph(),
                view.label,
                view.confidence_label(),
                bar
            );
            let _ = writeln!(out, "All Predictions:");
            if view.has_detailed_predictions() {
                for row in &view.predictions {
                    let marker = if row.highest { "★" } else { " " };
                    let _ = writeln!(
                        out,
                        "  {} {} {:<12} {:>6}%",
                        marker,
                        row.icon.glyph(),
                        row.class,
                        row.percentage
                    );
                }
            } else {
                let _ = writeln!(out, "  {}", NO_DETAILED_PREDICTIONS);
            }
            let _ = writeln!(out, "Recycling Recommendations:");
            for recommendation in &view.recommendations {
                let _ = writeln!(out, "  - {}", recommendation);
            }
        }
        ResultsPanel::Failure { hints } => {
            let _ = writeln!(out, "Failed to classify image. Please check:");
            for hint in hints {
                let _ = writeln!(out, "  - {}", hint);
            }
        }
    }

    let _ = writeln!(
        out,
        "Statistics: {} classified · average {} · most common {}",
        screen.statistics.total,
        screen.statistics.average_confidence,
        screen.statistics.most_common_class
    );
    if let Some(notice) = &screen.notice {
        let _ = writeln!(out, "! {}", notice);
    }
    out
}

pub struct DisplayConsole {
    last_screen: Option<Screen>,
    input_started: AtomicBool,
}

impl DisplayConsole {
    pub fn new() -> Self {
        Self {
            last_screen: None,
            input_started: AtomicBool::new(false),
        }
    }
}

impl Default for DisplayConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for DisplayConsole {
    fn present(&mut self, screen: &Screen) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.last_screen.as_ref() == Some(screen) {
            return Ok(());
        }
        let mut stdout = std::io::stdout().lock();
        write!(stdout, "\n{}> ", render_text(screen))?;
        stdout.flush()?;
        self.last_screen = Some(screen.clone());
        Ok(())
    }

    fn celebrate(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut stdout = std::io::stdout().lock();
        write!(stdout, "\n🎉 🎉 🎉  Excellent confidence!  🎉 🎉 🎉\n> ")?;
        stdout.flush()?;
        Ok(())
    }

    fn events(&self) -> Receiver<InputEvent> {
        let (sender, receiver) = channel();
        if self.input_started.swap(true, Ordering::SeqCst) {
            return receiver;
        }

        std::thread::spawn(move || {
            println!("{}", HELP);
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                match parse_command(&line) {
                    Command::Input(event) => {
                        let quit = event == InputEvent::Quit;
                        if sender.send(event).is_err() || quit {
                            return;
                        }
                    }
                    Command::Help => println!("{}", HELP),
                    Command::Empty => {}
                    Command::Unknown(text) => println!("Unknown command: {}\n{}", text, HELP),
                }
            }
            // End of input behaves like quit.
            let _ = sender.send(InputEvent::Quit);
        });

        receiver
    }
}
