//! CLI commands for tagdraw

pub mod category;
pub mod dispatch;
pub mod draw;
pub mod export;
pub mod format;
pub mod import;
pub mod init;
pub mod kinds;
pub mod pack;
pub mod question;
pub mod selector;
pub mod tags;
