pub mod analyzer;
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod models;
pub mod service;
pub mod state;
pub mod store;

pub use error::{AppError, ParseFailure};
pub use models::{FilterSpec, Properties, Record};
