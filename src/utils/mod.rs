//! Utility modules
//!
//! Contains tolerant JSON parsing and string helpers.

pub mod json_repair;
pub mod string;

pub use json_repair::{recover_json, strip_code_fences};
pub use string::truncate_with_suffix;
