//! Tagdraw Core Library
//!
//! Tag-filtered random question selection over a question bank, and
//! portable import of selector configurations between environments.

pub mod bank;
pub mod category;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod grading;
pub mod import;
pub mod kinds;
pub mod logging;
pub mod model;
pub mod naming;
pub mod pool;
pub mod select;
pub mod service;
pub mod store;
pub mod tags;
