use crate::classify_app::render::Screen;
use std::error::Error;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

/// User gestures, whatever front end produced them.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    FileChosen(PathBuf),
    ApiUrlChanged(String),
    TestConnection,
    ClearImage,
    Quit,
}

pub trait Display: Send + Sync {
    /// Show the full screen; called after every state change.
    fn present(&mut self, screen: &Screen) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Short celebration after a high-confidence result.
    fn celebrate(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Input stream. Only the first call receives events.
    fn events(&self) -> Receiver<InputEvent>;
}
