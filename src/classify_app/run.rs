use super::core::{init, transition, Effect, Event, Model};
use super::main::ClassifyApp;
use crate::display::interface::InputEvent;
use std::error::Error;

impl ClassifyApp {
    /// Runs until the user quits and returns the final model.
    pub fn run(&self) -> Result<Model, Box<dyn Error + Send + Sync>> {
        let (mut current_model, effects) = init(&self.config);

        self.render(&current_model)?;
        self.run_effects(effects);

        let receiver = self
            .event_receiver
            .lock()
            .map_err(|_| "event receiver lock poisoned")?;

        loop {
            let event = receiver.recv()?;

            if matches!(event, Event::Input(InputEvent::Quit)) {
                let _ = self.logger.info("quit requested");
                return Ok(current_model);
            }

            let _ = self.logger.info(&format!(
                "\nold model:\n\t{:?}\n\nevent:\n\t{:?}",
                current_model, event,
            ));

            let (new_model, effects) = transition(&self.config, current_model, event);

            let _ = self.logger.info(&format!(
                "\nnew model:\n\t{:?}\n\neffects:\n\t{:?}",
                new_model, effects
            ));

            current_model = new_model;

            self.render(&current_model)?;

            self.run_effects(effects);
        }
    }

    fn run_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let self_clone = self.clone();
            std::thread::spawn(move || self_clone.run_effect(effect));
        }
    }
}
