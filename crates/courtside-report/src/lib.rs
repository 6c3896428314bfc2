//! courtside-report — Operator-facing rendering of batch reports.
//!
//! Consumes core batch snapshots and renders them; never mutates them.

pub mod json;
pub mod markdown;

pub use json::{submission_rows, write_json};
pub use markdown::{generate_markdown, write_markdown};
