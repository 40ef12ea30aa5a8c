pub mod config;
pub mod logging;

pub mod catalog;
pub mod classify;
pub mod correlator;
pub mod engine;
pub mod exchange;
pub mod har;
pub mod manifest;
pub mod media;
pub mod provider;
pub mod url_model;
