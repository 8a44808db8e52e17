pub mod app_state;
pub mod classifier;
pub mod config;
pub mod extractor;
pub mod factcheck;
pub mod fetcher;
pub mod health;
pub mod language;
pub mod routes;
pub mod scorer;
pub mod verification;
