//! lifewatch: watch matching processes come and go

pub mod app;
pub mod config;
pub mod history;
pub mod local_logger;
pub mod monitor;
mod prelude;
pub mod process;
pub mod query;
pub mod render;
