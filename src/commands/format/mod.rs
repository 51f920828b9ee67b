//! Shared output formatting helpers for commands

pub mod status;

pub use crate::output_by_format_result;
pub use status::{print_json, print_json_status};
