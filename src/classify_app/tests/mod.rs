pub mod fixture;
mod run_test;
