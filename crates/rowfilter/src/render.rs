//! Entry points: parameters in, filtered table or message out.

use std::borrow::Cow;

use crate::condition::Condition;
use crate::error::{FilterError, FilterResult};
use crate::mask::compute_mask;
use crate::params::{FilterParams, FilterSpec, Mode, Selection};
use crate::search::search_mask;
use crate::table::Table;

/// Result of [`render`]: a table, or a message for the user.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutput {
    Table(Table),
    Error(String),
}

impl RenderOutput {
    /// Returns the table, if rendering succeeded.
    pub fn table(&self) -> Option<&Table> {
        match self {
            RenderOutput::Table(table) => Some(table),
            RenderOutput::Error(_) => None,
        }
    }

    /// Returns the error message, if rendering failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            RenderOutput::Table(_) => None,
            RenderOutput::Error(message) => Some(message),
        }
    }
}

/// Filters `table` with `params`, reporting failures as a message string.
///
/// This is the host-facing boundary: legacy parameters are migrated, an
/// unfinished form passes the table through, and every error becomes its
/// user-facing message.
///
/// # Example
///
/// ```
/// use rowfilter::{render, Column, FilterParams, Table};
///
/// let table = Table::new(vec![Column::integer("b", vec![Some(2), Some(5), None])]).unwrap();
/// let params = FilterParams {
///     column: "b".to_string(),
///     condition: 14, // "Greater than"
///     value: "2".to_string(),
///     ..Default::default()
/// };
///
/// let filtered = render(&table, &params);
/// assert_eq!(filtered.table().unwrap().num_rows(), 1);
/// ```
pub fn render(table: &Table, params: &FilterParams) -> RenderOutput {
    match filter_table(table, params) {
        Ok(filtered) => RenderOutput::Table(filtered.into_owned()),
        Err(err) => {
            tracing::debug!(error = %err, kind = ?err.kind(), "Filter failed");
            RenderOutput::Error(err.to_string())
        }
    }
}

/// Filters `table` with `params`.
///
/// Returns the input borrowed when the parameters are unfinished, so callers
/// can tell a pass-through from a filtered copy.
///
/// # Errors
///
/// Returns any non-recoverable [`FilterError`] from resolution, coercion or
/// evaluation.
pub fn filter_table<'a>(table: &'a Table, params: &FilterParams) -> FilterResult<Cow<'a, Table>> {
    let spec = FilterSpec::from_params(params);
    match apply_spec(table, &spec) {
        Err(err) if err.is_recoverable() => {
            tracing::debug!(error = %err, "Filter incomplete, passing table through");
            Ok(Cow::Borrowed(table))
        }
        result => result,
    }
}

/// Applies a resolved spec to `table`.
///
/// # Errors
///
/// See [`filter_table`]. Unlike it, this may also return
/// [`FilterError::MissingValue`].
pub fn apply_spec<'a>(table: &'a Table, spec: &FilterSpec) -> FilterResult<Cow<'a, Table>> {
    let mask = match &spec.mode {
        Mode::Column { column, selection } => {
            if column.is_empty() {
                return Ok(Cow::Borrowed(table));
            }
            let condition = match *selection {
                Selection::Invalid(index) => {
                    tracing::debug!(index, "Condition index is not a condition");
                    return Err(FilterError::NoConditionSelected);
                }
                Selection::Condition(Condition::Select) => return Ok(Cow::Borrowed(table)),
                Selection::Condition(condition) => condition,
            };
            if spec.value.is_empty() && !condition.allows_empty_value() {
                return Ok(Cow::Borrowed(table));
            }

            let target = table
                .column(column)
                .ok_or_else(|| FilterError::unknown_column(column.as_str()))?;
            tracing::debug!(column = %column, %condition, "Evaluating condition");
            compute_mask(condition, target, &spec.value, spec.case_sensitive)?
        }
        Mode::Search { columns, regex } => {
            if columns.is_empty() || spec.value.is_empty() {
                return Ok(Cow::Borrowed(table));
            }
            tracing::debug!(columns = ?columns, regex, "Searching columns");
            search_mask(table, columns, &spec.value, spec.case_sensitive, *regex)?
        }
    };

    let retained: Vec<bool> = mask
        .into_iter()
        .map(|matched| spec.polarity.retains(matched))
        .collect();
    let filtered = table.filter(&retained);
    tracing::debug!(
        rows_in = table.num_rows(),
        rows_out = filtered.num_rows(),
        polarity = ?spec.polarity,
        "Filter applied"
    );

    Ok(Cow::Owned(filtered))
}
