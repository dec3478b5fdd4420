use super::core::{Effect, Event};
use super::main::ClassifyApp;
use super::preview::read_preview;

impl ClassifyApp {
    pub fn run_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::SubscribeToInput => {
                let events = match self.display.lock() {
                    Ok(display) => display.events(),
                    Err(_) => {
                        let _ = self.logger.error("display lock poisoned, no input");
                        return;
                    }
                };
                // Ends once the front end drops its sender or the app stops listening.
                while let Ok(event) = events.recv() {
                    if self.event_sender.send(Event::Input(event)).is_err() {
                        break;
                    }
                }
            }
            Effect::LoadHistory => {
                let records = match self.history.lock() {
                    Ok(history) => history.records(),
                    Err(_) => Vec::new(),
                };
                let _ = self.event_sender.send(Event::HistoryLoaded(records));
            }
            Effect::ReadPreview { path } => {
                let preview = read_preview(&path);
                let _ = self.event_sender.send(Event::PreviewDone(preview));
            }
            Effect::Classify { base_url, image } => {
                let result = self.image_classifier.classify(&base_url, &image);
                if let Err(e) = &result {
                    let _ = self.logger.warn(&format!("classification failed: {}", e));
                }
                let _ = self.event_sender.send(Event::ClassifyDone(result));
            }
            Effect::RecordHistory { record } => {
                let records = match self.history.lock() {
                    Ok(mut history) => {
                        if let Err(e) = history.append(record) {
                            let _ = self.logger.error(&e.to_string());
                        }
                        history.records()
                    }
                    Err(_) => {
                        let _ = self.logger.error("history lock poisoned, record dropped");
                        Vec::new()
                    }
                };
                let _ = self.event_sender.send(Event::HistoryRecorded(records));
            }
            Effect::Celebrate { confidence } => {
                let _ = self
                    .logger
                    .info(&format!("celebrating confidence {:.3}", confidence));
                if let Ok(mut display) = self.display.lock() {
                    if let Err(e) = display.celebrate() {
                        let _ = self.logger.warn(&format!("celebration failed: {}", e));
                    }
                }
            }
            Effect::ProbeConnection { base_url } => {
                let result = self.image_classifier.check_connection(&base_url);
                let _ = self.event_sender.send(Event::ProbeDone {
                    url: base_url,
                    result,
                });
            }
        }
    }
}
