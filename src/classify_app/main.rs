use super::core::Event;
use crate::config::Config;
use crate::display::interface::Display;
use crate::history::store::HistoryStore;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct ClassifyApp {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    pub history: Arc<Mutex<HistoryStore>>,
    pub display: Arc<Mutex<dyn Display + Send + Sync>>,
    pub event_sender: Sender<Event>,
    pub event_receiver: Arc<Mutex<Receiver<Event>>>,
}

impl ClassifyApp {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        history: Arc<Mutex<HistoryStore>>,
        display: Arc<Mutex<dyn Display + Send + Sync>>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();

        Self {
            config,
            logger: logger.with_namespace("app"),
            image_classifier,
            history,
            display,
            event_sender,
            event_receiver: Arc::new(Mutex::new(event_receiver)),
        }
    }
}
