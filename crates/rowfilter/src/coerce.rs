//! Column and comparand coercion.
//!
//! Each condition needs its column and comparand in a particular
//! representation: text, number or date. Coercion is all-or-nothing: one
//! unparseable cell fails the whole column, there is no per-row fallback.
//!
//! Numeric and date columns are never stringified for text conditions, and
//! numeric columns are never read as epoch timestamps for date conditions.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{FilterError, FilterResult};
use crate::table::{Column, ColumnData};

/// Date-and-time layouts tried, in order, after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts; these resolve to midnight.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%b %d %Y",
];

/// Reads a text or categorical column as optional string slices.
///
/// # Errors
///
/// Returns [`FilterError::NotText`] for every other column type.
pub fn text_cells(column: &Column) -> FilterResult<Vec<Option<&str>>> {
    match &column.data {
        ColumnData::Text { values } => Ok(values.iter().map(|v| v.as_deref()).collect()),
        ColumnData::Category { categories, codes } => Ok(codes
            .iter()
            .map(|code| code.and_then(|c| categories.get(c as usize)).map(String::as_str))
            .collect()),
        ColumnData::Integer { .. } | ColumnData::Float { .. } | ColumnData::Datetime { .. } => {
            Err(FilterError::NotText)
        }
    }
}

/// Reads a column as optional floats.
///
/// Integer and float columns convert directly (NaN becomes null). Text and
/// categorical columns must parse cell by cell; blank cells count as null.
///
/// # Errors
///
/// Returns [`FilterError::NotNumeric`] for datetime columns and for any text
/// cell that is not a number.
pub fn number_cells(column: &Column) -> FilterResult<Vec<Option<f64>>> {
    match &column.data {
        ColumnData::Integer { values } => Ok(values.iter().map(|v| v.map(|i| i as f64)).collect()),
        ColumnData::Float { values } => Ok(values
            .iter()
            .map(|v| v.filter(|f| !f.is_nan()))
            .collect()),
        ColumnData::Text { .. } | ColumnData::Category { .. } => text_cells(column)?
            .into_iter()
            .map(|cell| parse_cell(cell, |s| s.parse::<f64>().ok()).ok_or(FilterError::NotNumeric))
            .collect(),
        ColumnData::Datetime { .. } => Err(FilterError::NotNumeric),
    }
}

/// Parses a numeric comparand.
///
/// # Errors
///
/// Returns [`FilterError::InvalidNumber`] if the value is blank or not a number.
pub fn number_value(value: &str) -> FilterResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| FilterError::invalid_number(value))
}

/// Reads a column as optional datetimes.
///
/// # Errors
///
/// Returns [`FilterError::NotDates`] for integer and float columns and for any
/// text cell that is not a recognizable date.
pub fn date_cells(column: &Column) -> FilterResult<Vec<Option<NaiveDateTime>>> {
    match &column.data {
        ColumnData::Datetime { values } => Ok(values.clone()),
        ColumnData::Text { .. } | ColumnData::Category { .. } => text_cells(column)?
            .into_iter()
            .map(|cell| parse_cell(cell, parse_datetime).ok_or(FilterError::NotDates))
            .collect(),
        ColumnData::Integer { .. } | ColumnData::Float { .. } => Err(FilterError::NotDates),
    }
}

/// Parses a date comparand.
///
/// # Errors
///
/// Returns [`FilterError::MissingDate`] for a blank value and
/// [`FilterError::InvalidDate`] for one that is not a recognizable date.
pub fn date_value(value: &str) -> FilterResult<NaiveDateTime> {
    if value.trim().is_empty() {
        return Err(FilterError::MissingDate);
    }
    parse_datetime(value).ok_or_else(|| FilterError::invalid_date(value))
}

/// Parses a date or date-time string in any of the supported layouts.
///
/// Date-only strings resolve to midnight; RFC 3339 strings with an offset are
/// converted to UTC. Months, days and hours may omit the leading zero.
///
/// ```
/// use rowfilter::coerce::parse_datetime;
///
/// let dt = parse_datetime("2018-1-12 08:15").unwrap();
/// assert_eq!(dt.to_string(), "2018-01-12 08:15:00");
/// assert!(parse_datetime("gibberish").is_none());
/// ```
pub fn parse_datetime(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Parses one text cell. Null and blank cells become `Some(None)`; a cell the
/// parser rejects becomes `None`.
fn parse_cell<T>(cell: Option<&str>, parse: impl Fn(&str) -> Option<T>) -> Option<Option<T>> {
    match cell.map(str::trim) {
        None | Some("") => Some(None),
        Some(s) => parse(s).map(Some),
    }
}
