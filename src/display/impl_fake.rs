use crate::classify_app::render::Screen;
use crate::display::interface::{Display, InputEvent};
use std::error::Error;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Records screens and lets tests type input.
pub struct DisplayFake {
    screens: Arc<Mutex<Vec<Screen>>>,
    celebrations: Arc<Mutex<usize>>,
    input_sender: Sender<InputEvent>,
    input_receiver: Mutex<Option<Receiver<InputEvent>>>,
}

/// Test-side handle onto a [`DisplayFake`] after it is moved into the app.
#[derive(Clone)]
pub struct DisplayFakeHandle {
    screens: Arc<Mutex<Vec<Screen>>>,
    celebrations: Arc<Mutex<usize>>,
    input_sender: Sender<InputEvent>,
}

impl DisplayFake {
    pub fn new() -> Self {
        let (input_sender, input_receiver) = channel();
        Self {
            screens: Arc::new(Mutex::new(Vec::new())),
            celebrations: Arc::new(Mutex::new(0)),
            input_sender,
            input_receiver: Mutex::new(Some(input_receiver)),
        }
    }

    pub fn handle(&self) -> DisplayFakeHandle {
        DisplayFakeHandle {
            screens: Arc::clone(&self.screens),
            celebrations: Arc::clone(&self.celebrations),
            input_sender: self.input_sender.clone(),
        }
    }
}

impl Default for DisplayFake {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayFakeHandle {
    pub fn send(&self, event: InputEvent) {
        let _ = self.input_sender.send(event);
    }

    pub fn screens(&self) -> Vec<Screen> {
        self.screens.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn last_screen(&self) -> Option<Screen> {
        self.screens().last().cloned()
    }

    pub fn celebrations(&self) -> usize {
        self.celebrations.lock().map(|c| *c).unwrap_or(0)
    }

    /// Polls until `predicate` holds for the latest screen or `timeout` elapses.
    pub fn wait_for<F>(&self, timeout: std::time::Duration, predicate: F) -> Option<Screen>
    where
        F: Fn(&Screen) -> bool,
    {
        let deadline = std::time::Instant::now() + timeout;
        while std::time::Instant::now() < deadline {
            if let Some(screen) = self.last_screen() {
                if predicate(&screen) {
                    return Some(screen);
                }
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        None
    }
}

impl Display for DisplayFake {
    fn present(&mut self, screen: &Screen) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.screens
            .lock()
            .map_err(|_| "screens lock poisoned")?
            .push(screen.clone());
        Ok(())
    }

    fn celebrate(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        *self
            .celebrations
            .lock()
            .map_err(|_| "celebrations lock poisoned")? += 1;
        Ok(())
    }

    fn events(&self) -> Receiver<InputEvent> {
        match self.input_receiver.lock().ok().and_then(|mut r| r.take()) {
            Some(receiver) => receiver,
            None => channel().1,
        }
    }
}
