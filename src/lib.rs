pub mod app;
pub mod cli;
pub mod config;
pub mod detail;
pub mod dictionary;
pub mod loader;
pub mod model;
pub mod output;
pub mod query;
pub mod recommender;
pub mod runner;
pub mod utils;
pub mod views;

pub use loader::{DatasetSource, LoadError};
pub use model::{Dataset, JournalRecord};
pub use query::{query, Query, SortKey};

#[cfg(test)]
mod tests;
