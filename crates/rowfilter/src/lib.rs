//! Single-condition row filtering for typed tables.
//!
//! Given a [`Table`] and saved [`FilterParams`] (column, condition, value,
//! keep/drop, case sensitivity), this crate produces either a filtered table
//! or a message telling the user what to fix. It is meant to run as one step
//! of a larger pipeline; stacking filters is done by running several steps.
//!
//! # Modes
//!
//! - **Single column**: one [`Condition`] from the menu applied to one column.
//! - **Text search**: a query OR-ed across several text columns.
//!
//! # Parameters
//!
//! Conditions are stored as menu indices. Parameters saved before the regex
//! conditions existed are upgraded by [`migrate_params`], which every entry
//! point applies automatically.
//!
//! # Example
//!
//! ```
//! use rowfilter::{render, Column, Condition, FilterParams, RenderOutput, Table};
//!
//! let table = Table::new(vec![
//!     Column::text("name", vec![Some("fred"), Some("maggie"), None]),
//! ])
//! .unwrap();
//!
//! let params = FilterParams {
//!     column: "name".to_string(),
//!     condition: Condition::TextContains.menu_index(),
//!     value: "FRED".to_string(),
//!     ..Default::default()
//! };
//!
//! match render(&table, &params) {
//!     RenderOutput::Table(filtered) => assert_eq!(filtered.num_rows(), 1),
//!     RenderOutput::Error(message) => panic!("{message}"),
//! }
//! ```

pub mod coerce;
pub mod condition;
mod error;
pub mod mask;
pub mod params;
mod render;
pub mod search;
pub mod table;

pub use condition::{Condition, MenuItem, ValueKind};
pub use error::{ErrorKind, FilterError, FilterResult, TableError};
pub use params::{migrate_params, FilterParams, FilterSpec, Mode, Polarity, Selection};
pub use render::{apply_spec, filter_table, render, RenderOutput};
pub use table::{Column, ColumnData, ColumnType, Table};
