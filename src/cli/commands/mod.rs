pub mod admin;
pub mod audit;
pub mod auth;
pub mod dashboard;
pub mod documents;
pub mod prefs;
pub mod reminders;
pub mod reports;
pub mod resource;
pub mod settings;
pub mod transfer;
pub mod workers;
