pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod documents;
pub mod error;
pub mod models;
pub mod query;
pub mod services;
pub mod store;
pub mod types;
pub mod view;

#[cfg(test)]
pub mod testing;

pub use api::{ApiClient, SessionEvent};
pub use error::ClientError;
pub use services::Dragofactu;
