pub mod core;
pub mod main;
pub mod preview;
pub mod render;
pub mod run;
pub mod run_effect;

#[cfg(test)]
pub(crate) mod tests;
