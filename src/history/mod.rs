pub mod record;
pub mod statistics;
pub mod store;
