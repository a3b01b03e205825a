//! Error types for table construction and filter evaluation.

use thiserror::Error;

/// A specialized Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while evaluating a filter.
///
/// The `Display` output of each variant is the message shown to the user, so
/// wording changes here are user-visible.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The comparand is empty. Never surfaced: the table passes through unchanged.
    #[error("no value entered")]
    MissingValue,

    /// The column is not a text or categorical column.
    #[error("Column is not text. Please convert to text.")]
    NotText,

    /// The column could not be read as numbers.
    #[error("Column is not numbers. Please convert to numbers.")]
    NotNumeric,

    /// The comparand could not be read as a number.
    #[error("Value is not a number. Please enter a valid number.")]
    InvalidNumber {
        /// The value that failed to parse.
        value: String,
    },

    /// The column could not be read as dates.
    #[error("Column is not dates. Please convert to dates.")]
    NotDates,

    /// The comparand could not be read as a date.
    #[error("Value \"{value}\" is not a date. Please enter a date and time.")]
    InvalidDate {
        /// The value that failed to parse.
        value: String,
    },

    /// The comparand is blank for a date condition.
    #[error("Please enter a date and time.")]
    MissingDate,

    /// A referenced column is not in the table.
    #[error("Column \"{name}\" does not exist.")]
    UnknownColumn {
        /// The missing column name.
        name: String,
    },

    /// The condition index points at a menu separator or past the menu.
    #[error("Please choose a condition")]
    NoConditionSelected,

    /// The comparand is not a valid regular expression.
    #[error("Invalid regular expression \"{pattern}\": {reason}")]
    InvalidRegex {
        /// The pattern as entered.
        pattern: String,
        /// Why the regex engine rejected it.
        reason: String,
    },
}

/// Classification of a [`FilterError`].
///
/// Several variants share a class, e.g. a non-numeric column and a
/// non-numeric comparand are both [`ErrorKind::NotNumeric`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingValue,
    NotText,
    NotNumeric,
    NotDates,
    InvalidDate,
    MissingDate,
    UnknownColumn,
    NoConditionSelected,
    InvalidRegex,
}

impl FilterError {
    /// Creates an invalid number error.
    pub fn invalid_number(value: impl Into<String>) -> Self {
        FilterError::InvalidNumber {
            value: value.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(value: impl Into<String>) -> Self {
        FilterError::InvalidDate {
            value: value.into(),
        }
    }

    /// Creates an unknown column error.
    pub fn unknown_column(name: impl Into<String>) -> Self {
        FilterError::UnknownColumn { name: name.into() }
    }

    /// Creates an invalid regex error from the regex engine's rejection.
    pub fn invalid_regex(pattern: impl Into<String>, err: &regex::Error) -> Self {
        FilterError::InvalidRegex {
            pattern: pattern.into(),
            reason: err.to_string(),
        }
    }

    /// Returns the taxonomy class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::MissingValue => ErrorKind::MissingValue,
            FilterError::NotText => ErrorKind::NotText,
            FilterError::NotNumeric | FilterError::InvalidNumber { .. } => ErrorKind::NotNumeric,
            FilterError::NotDates => ErrorKind::NotDates,
            FilterError::InvalidDate { .. } => ErrorKind::InvalidDate,
            FilterError::MissingDate => ErrorKind::MissingDate,
            FilterError::UnknownColumn { .. } => ErrorKind::UnknownColumn,
            FilterError::NoConditionSelected => ErrorKind::NoConditionSelected,
            FilterError::InvalidRegex { .. } => ErrorKind::InvalidRegex,
        }
    }

    /// Returns true if the error means the form is unfinished rather than wrong.
    ///
    /// Recoverable errors yield the input table unchanged instead of a message.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FilterError::MissingValue)
    }
}

/// Errors that can occur when building a [`Table`](crate::Table).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableError {
    /// A column's length differs from the first column's.
    #[error("column '{name}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        /// The offending column.
        name: String,
        /// Row count of the first column.
        expected: usize,
        /// Row count of the offending column.
        actual: usize,
    },

    /// Two columns share a name.
    #[error("duplicate column name '{name}'")]
    DuplicateColumn {
        /// The repeated name.
        name: String,
    },

    /// A categorical code points past the category list.
    #[error("column '{name}' has category code {code} but only {categories} categories")]
    CategoryOutOfRange {
        /// The offending column.
        name: String,
        /// The out-of-range code.
        code: u32,
        /// Number of categories.
        categories: usize,
    },
}
