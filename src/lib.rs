pub mod app;
pub mod boundary;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod server;
pub mod spreadsheet;
