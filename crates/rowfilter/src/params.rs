//! Filter parameters: the saved wire form, its migration, and the typed spec.
//!
//! [`FilterParams`] is what a host persists. Older saved parameters carry a
//! separate `regex` flag and index into a menu without the regex group;
//! [`migrate_params`] rewrites them into the current form. [`FilterSpec`] is
//! the resolved, typed view the engine works from.

use serde::{Deserialize, Serialize};

use crate::condition::Condition;

/// First legacy menu slot shifted by the regex group (legacy "Text contains").
const LEGACY_TEXT_GROUP_START: usize = 2;

/// Last legacy menu slot that keeps its index when `regex` is false.
const LEGACY_TEXT_GROUP_END: usize = 5;

/// Number of slots the regex group (three conditions and a separator) inserted.
const REGEX_GROUP_WIDTH: usize = 4;

/// Saved filter parameters, as exchanged with the host.
///
/// Every field is optional on the wire and falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    /// Column to filter on; empty means not chosen yet.
    pub column: String,

    /// Menu index of the condition.
    pub condition: usize,

    /// Comparand, as typed by the user.
    pub value: String,

    /// 0 keeps matching rows, 1 drops them.
    pub keep: u8,

    /// Whether text comparisons are case sensitive.
    pub casesensitive: bool,

    /// Regex flag. In legacy parameters this sits beside `condition`; in
    /// current parameters it only accompanies `colnames`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<bool>,

    /// Comma-separated columns for multi-column text search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colnames: Option<String>,
}

impl FilterParams {
    /// Returns true if these parameters use the legacy schema.
    ///
    /// Legacy parameters have a top-level `regex` flag and no `colnames`;
    /// text search was added after the regex conditions, so a `regex` key next
    /// to `colnames` is the search flag.
    pub fn is_legacy(&self) -> bool {
        self.regex.is_some() && self.colnames.is_none()
    }
}

/// Upgrades legacy parameters to the current schema.
///
/// Current parameters are returned unchanged, so this is idempotent.
///
/// # Example
///
/// ```
/// use rowfilter::{migrate_params, FilterParams};
///
/// let legacy = FilterParams {
///     column: "A".to_string(),
///     condition: 2, // "Text contains"
///     value: "f.*d".to_string(),
///     regex: Some(true),
///     ..Default::default()
/// };
///
/// let current = migrate_params(legacy);
/// assert_eq!(current.condition, 6); // "Text contains regex"
/// assert_eq!(current.regex, None);
/// ```
pub fn migrate_params(mut params: FilterParams) -> FilterParams {
    if !params.is_legacy() {
        return params;
    }

    let regex = params.regex.take().unwrap_or(false);
    let condition = migrate_condition_index(params.condition, regex);
    if condition != params.condition {
        tracing::debug!(
            from = params.condition,
            to = condition,
            regex,
            "Migrated legacy filter condition"
        );
    }
    params.condition = condition;
    params
}

/// Maps a legacy menu index to the current menu.
fn migrate_condition_index(condition: usize, regex: bool) -> usize {
    match condition {
        LEGACY_TEXT_GROUP_START..=LEGACY_TEXT_GROUP_END if regex => {
            condition + REGEX_GROUP_WIDTH
        }
        // Saturating keeps an out-of-range index out of range.
        c if c > LEGACY_TEXT_GROUP_END => c.saturating_add(REGEX_GROUP_WIDTH),
        c => c,
    }
}

/// Whether matching rows are kept or dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Polarity {
    #[default]
    Keep,
    Drop,
}

impl Polarity {
    /// Reads the `keep` menu value: 1 is drop, anything else keep.
    pub fn from_menu_index(index: u8) -> Self {
        match index {
            1 => Polarity::Drop,
            _ => Polarity::Keep,
        }
    }

    /// Returns the `keep` menu value.
    pub fn menu_index(self) -> u8 {
        match self {
            Polarity::Keep => 0,
            Polarity::Drop => 1,
        }
    }

    /// Returns true if a row with this mask bit stays in the output.
    pub fn retains(self, matched: bool) -> bool {
        match self {
            Polarity::Keep => matched,
            Polarity::Drop => !matched,
        }
    }
}

/// The condition slot chosen in single-column mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Condition(Condition),
    /// A separator or out-of-range menu index.
    Invalid(usize),
}

/// Which filter mode the parameters describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// One condition applied to one column.
    Column { column: String, selection: Selection },
    /// Free-text search OR-ed across columns.
    Search { columns: Vec<String>, regex: bool },
}

/// Typed filter specification resolved from [`FilterParams`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub mode: Mode,
    pub value: String,
    pub polarity: Polarity,
    pub case_sensitive: bool,
}

impl FilterSpec {
    /// Resolves parameters into a spec, migrating legacy parameters first.
    ///
    /// Search mode is chosen when `colnames` lists a column or the condition
    /// is "Filter by text".
    pub fn from_params(params: &FilterParams) -> Self {
        let params = migrate_params(params.clone());
        let selection = match Condition::from_menu_index(params.condition) {
            Some(condition) => Selection::Condition(condition),
            None => Selection::Invalid(params.condition),
        };
        let columns = params
            .colnames
            .as_deref()
            .map(parse_colnames)
            .unwrap_or_default();

        let mode =
            if !columns.is_empty() || selection == Selection::Condition(Condition::FilterByText) {
                Mode::Search {
                    columns,
                    regex: params.regex.unwrap_or(false),
                }
            } else {
                Mode::Column {
                    column: params.column,
                    selection,
                }
            };

        Self {
            mode,
            value: params.value,
            polarity: Polarity::from_menu_index(params.keep),
            case_sensitive: params.casesensitive,
        }
    }
}

/// Splits a comma-separated column list, dropping blank entries.
fn parse_colnames(colnames: &str) -> Vec<String> {
    colnames
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
