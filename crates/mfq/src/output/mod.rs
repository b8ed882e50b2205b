//! Output formatting utilities for the mfq CLI.
//!
//! - [`filter`] - Rendered filter and dialect table formatting

mod filter;

pub use filter::{format_names_json, format_names_table, format_rendered_json, format_rendered_table};
