//! The condition menu.
//!
//! Conditions are identified on the wire by their position in a flat menu
//! that also contains separator slots. [`Condition::menu_index`] is the
//! single source of truth for those positions. It is an exhaustive match, so
//! a new condition cannot be added without giving it a slot;
//! [`Condition::from_menu_index`] and [`Condition::menu`] are derived from it.
//!
//! Inserting or reordering entries changes the meaning of saved parameters
//! and needs a matching rule in [`crate::params::migrate_params`].

use std::fmt;

use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// A single slot in the condition menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Condition(Condition),
    Separator,
}

/// Number of slots in the current menu, separators included.
pub const MENU_LEN: usize = 24;

/// What kind of comparand a condition needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    None,
    Text,
    Number,
    Date,
}

/// A filter condition from the menu.
///
/// Parses from and names itself as kebab-case (`"text-contains"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Condition {
    /// Placeholder shown before the user picks a condition.
    Select,
    TextContains,
    TextDoesNotContain,
    TextIsExactly,
    TextContainsRegex,
    TextDoesNotContainRegex,
    TextMatchesRegexExactly,
    CellIsEmpty,
    CellIsNotEmpty,
    Equals,
    GreaterThan,
    GreaterThanOrEquals,
    LessThan,
    LessThanOrEquals,
    DateIs,
    DateIsBefore,
    DateIsAfter,
    /// Free-text search across several columns.
    FilterByText,
}

impl Condition {
    /// Returns the full menu, separators included.
    pub fn menu() -> Vec<MenuItem> {
        (0..MENU_LEN)
            .map(|index| match Condition::from_menu_index(index) {
                Some(condition) => MenuItem::Condition(condition),
                None => MenuItem::Separator,
            })
            .collect()
    }

    /// Looks up the condition at a menu position.
    ///
    /// Returns `None` for separators and positions past the end of the menu.
    pub fn from_menu_index(index: usize) -> Option<Condition> {
        Condition::iter().find(|condition| condition.menu_index() == index)
    }

    /// Returns this condition's position in the menu.
    ///
    /// Gaps in the numbering are separator slots.
    pub fn menu_index(self) -> usize {
        match self {
            Condition::Select => 0,
            Condition::TextContains => 2,
            Condition::TextDoesNotContain => 3,
            Condition::TextIsExactly => 4,
            Condition::TextContainsRegex => 6,
            Condition::TextDoesNotContainRegex => 7,
            Condition::TextMatchesRegexExactly => 8,
            Condition::CellIsEmpty => 10,
            Condition::CellIsNotEmpty => 11,
            Condition::Equals => 13,
            Condition::GreaterThan => 14,
            Condition::GreaterThanOrEquals => 15,
            Condition::LessThan => 16,
            Condition::LessThanOrEquals => 17,
            Condition::DateIs => 19,
            Condition::DateIsBefore => 20,
            Condition::DateIsAfter => 21,
            Condition::FilterByText => 23,
        }
    }

    /// Returns the kebab-case name, e.g. `"date-is-before"`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Returns the label shown in the menu.
    pub fn label(self) -> &'static str {
        match self {
            Condition::Select => "Select",
            Condition::TextContains => "Text contains",
            Condition::TextDoesNotContain => "Text does not contain",
            Condition::TextIsExactly => "Text is exactly",
            Condition::TextContainsRegex => "Text contains regex",
            Condition::TextDoesNotContainRegex => "Text does not contain regex",
            Condition::TextMatchesRegexExactly => "Text matches regex exactly",
            Condition::CellIsEmpty => "Cell is empty",
            Condition::CellIsNotEmpty => "Cell is not empty",
            Condition::Equals => "Equals",
            Condition::GreaterThan => "Greater than",
            Condition::GreaterThanOrEquals => "Greater than or equals",
            Condition::LessThan => "Less than",
            Condition::LessThanOrEquals => "Less than or equals",
            Condition::DateIs => "Date is",
            Condition::DateIsBefore => "Date is before",
            Condition::DateIsAfter => "Date is after",
            Condition::FilterByText => "Filter by text",
        }
    }

    /// Returns the kind of comparand this condition compares against.
    pub fn value_kind(self) -> ValueKind {
        match self {
            Condition::Select | Condition::CellIsEmpty | Condition::CellIsNotEmpty => {
                ValueKind::None
            }
            Condition::TextContains
            | Condition::TextDoesNotContain
            | Condition::TextIsExactly
            | Condition::TextContainsRegex
            | Condition::TextDoesNotContainRegex
            | Condition::TextMatchesRegexExactly
            | Condition::FilterByText => ValueKind::Text,
            Condition::Equals
            | Condition::GreaterThan
            | Condition::GreaterThanOrEquals
            | Condition::LessThan
            | Condition::LessThanOrEquals => ValueKind::Number,
            Condition::DateIs | Condition::DateIsBefore | Condition::DateIsAfter => {
                ValueKind::Date
            }
        }
    }

    /// Returns true if the condition is meaningful with an empty comparand.
    ///
    /// Only the emptiness checks are.
    pub fn allows_empty_value(self) -> bool {
        matches!(self, Condition::CellIsEmpty | Condition::CellIsNotEmpty)
    }

    /// Returns true for the regex variants of the text conditions.
    pub fn is_regex(self) -> bool {
        matches!(
            self,
            Condition::TextContainsRegex
                | Condition::TextDoesNotContainRegex
                | Condition::TextMatchesRegexExactly
        )
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
