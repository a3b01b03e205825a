//! Output formatting utilities for the rowfilter CLI.
//!
//! - [`table`] - Filtered table output (text grid, JSON)
//! - [`conditions`] - Condition menu output
//! - [`helpers`] - Common formatting utilities

mod conditions;
pub mod helpers;
mod table;

pub use conditions::{format_menu_json, format_menu_table};
pub use table::{format_table_json, format_table_text};
