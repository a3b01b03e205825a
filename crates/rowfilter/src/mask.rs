//! Mask evaluation for single-column conditions.
//!
//! [`compute_mask`] maps every [`Condition`] to the rows it matches. Each arm
//! runs the same short chain: check the column type, check that a comparand
//! was entered, coerce the comparand, then compare cell by cell.
//!
//! Null cells never satisfy a comparison. The one exception is
//! "does not contain", which holds for nulls.

use regex::{Regex, RegexBuilder};

use crate::coerce;
use crate::condition::Condition;
use crate::error::{FilterError, FilterResult};
use crate::table::Column;

/// One boolean per row: true where the condition holds.
pub type Mask = Vec<bool>;

/// An ordering test shared by numeric and date conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Equal,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl Comparison {
    fn holds<T: PartialOrd>(self, cell: &T, value: &T) -> bool {
        match self {
            Comparison::Equal => cell == value,
            Comparison::Greater => cell > value,
            Comparison::GreaterOrEqual => cell >= value,
            Comparison::Less => cell < value,
            Comparison::LessOrEqual => cell <= value,
        }
    }
}

/// A compiled text test.
#[derive(Debug)]
pub(crate) enum TextPattern {
    /// Substring test. The needle is pre-lowered when case-insensitive.
    Substring { needle: String, case_sensitive: bool },
    /// Whole-cell equality. The target is pre-lowered when case-insensitive.
    Exact { target: String, case_sensitive: bool },
    Regex(Regex),
}

impl TextPattern {
    /// Plain substring search.
    pub(crate) fn substring(value: &str, case_sensitive: bool) -> Self {
        TextPattern::Substring {
            needle: fold_case(value, case_sensitive),
            case_sensitive,
        }
    }

    /// Whole-cell equality.
    pub(crate) fn exact(value: &str, case_sensitive: bool) -> Self {
        TextPattern::Exact {
            target: fold_case(value, case_sensitive),
            case_sensitive,
        }
    }

    /// Regex search; `anchored` requires the pattern to span the whole cell.
    pub(crate) fn regex(pattern: &str, case_sensitive: bool, anchored: bool) -> FilterResult<Self> {
        let source = if anchored {
            format!(r"\A(?:{pattern})\z")
        } else {
            pattern.to_string()
        };
        RegexBuilder::new(&source)
            .case_insensitive(!case_sensitive)
            .build()
            .map(TextPattern::Regex)
            .map_err(|err| FilterError::invalid_regex(pattern, &err))
    }

    pub(crate) fn is_match(&self, cell: &str) -> bool {
        match self {
            TextPattern::Substring {
                needle,
                case_sensitive,
            } => fold_case(cell, *case_sensitive).contains(needle.as_str()),
            TextPattern::Exact {
                target,
                case_sensitive,
            } => fold_case(cell, *case_sensitive) == *target,
            TextPattern::Regex(regex) => regex.is_match(cell),
        }
    }
}

/// Lower-cases `s` unless the comparison is case sensitive.
fn fold_case(s: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        s.to_string()
    } else {
        s.to_lowercase()
    }
}

/// Computes the rows of `column` that satisfy `condition` against `value`.
///
/// # Errors
///
/// Returns [`FilterError::MissingValue`] when a comparand is required but
/// empty, and the coercion errors of [`crate::coerce`] when the column or
/// comparand has the wrong type. An invalid regex yields
/// [`FilterError::InvalidRegex`].
pub fn compute_mask(
    condition: Condition,
    column: &Column,
    value: &str,
    case_sensitive: bool,
) -> FilterResult<Mask> {
    match condition {
        Condition::Select => Err(FilterError::MissingValue),

        Condition::TextContains => text_mask(column, condition, value, false, |v| {
            Ok(TextPattern::substring(v, case_sensitive))
        }),
        Condition::TextDoesNotContain => text_mask(column, condition, value, true, |v| {
            Ok(TextPattern::substring(v, case_sensitive))
        }),
        Condition::TextIsExactly => text_mask(column, condition, value, false, |v| {
            Ok(TextPattern::exact(v, case_sensitive))
        }),
        Condition::TextContainsRegex => text_mask(column, condition, value, false, |v| {
            TextPattern::regex(v, case_sensitive, false)
        }),
        Condition::TextDoesNotContainRegex => text_mask(column, condition, value, true, |v| {
            TextPattern::regex(v, case_sensitive, false)
        }),
        Condition::TextMatchesRegexExactly => text_mask(column, condition, value, false, |v| {
            TextPattern::regex(v, case_sensitive, true)
        }),
        // Single-column search: nulls read as empty text.
        Condition::FilterByText => {
            let cells = coerce::text_cells(column)?;
            require_value(condition, value)?;
            let pattern = TextPattern::substring(value, case_sensitive);
            Ok(cells
                .iter()
                .map(|cell| pattern.is_match(cell.unwrap_or("")))
                .collect())
        }

        Condition::CellIsEmpty => Ok((0..column.len()).map(|row| column.is_null(row)).collect()),
        Condition::CellIsNotEmpty => {
            Ok((0..column.len()).map(|row| !column.is_null(row)).collect())
        }

        Condition::Equals => number_mask(column, condition, value, Comparison::Equal),
        Condition::GreaterThan => number_mask(column, condition, value, Comparison::Greater),
        Condition::GreaterThanOrEquals => {
            number_mask(column, condition, value, Comparison::GreaterOrEqual)
        }
        Condition::LessThan => number_mask(column, condition, value, Comparison::Less),
        Condition::LessThanOrEquals => {
            number_mask(column, condition, value, Comparison::LessOrEqual)
        }

        Condition::DateIs => date_mask(column, condition, value, Comparison::Equal),
        Condition::DateIsBefore => date_mask(column, condition, value, Comparison::Less),
        Condition::DateIsAfter => date_mask(column, condition, value, Comparison::Greater),
    }
}

/// Fails with [`FilterError::MissingValue`] if the comparand is required but empty.
fn require_value(condition: Condition, value: &str) -> FilterResult<()> {
    if value.is_empty() && !condition.allows_empty_value() {
        return Err(FilterError::MissingValue);
    }
    Ok(())
}

/// Text conditions. `negate` flips matches and makes nulls match.
fn text_mask(
    column: &Column,
    condition: Condition,
    value: &str,
    negate: bool,
    compile: impl FnOnce(&str) -> FilterResult<TextPattern>,
) -> FilterResult<Mask> {
    let cells = coerce::text_cells(column)?;
    require_value(condition, value)?;
    let pattern = compile(value)?;

    Ok(cells
        .iter()
        .map(|cell| match cell {
            Some(text) => pattern.is_match(text) != negate,
            None => negate,
        })
        .collect())
}

fn number_mask(
    column: &Column,
    condition: Condition,
    value: &str,
    comparison: Comparison,
) -> FilterResult<Mask> {
    let cells = coerce::number_cells(column)?;
    require_value(condition, value)?;
    let value = coerce::number_value(value)?;

    Ok(cells
        .iter()
        .map(|cell| cell.is_some_and(|n| comparison.holds(&n, &value)))
        .collect())
}

fn date_mask(
    column: &Column,
    condition: Condition,
    value: &str,
    comparison: Comparison,
) -> FilterResult<Mask> {
    let cells = coerce::date_cells(column)?;
    require_value(condition, value)?;
    let value = coerce::date_value(value)?;

    Ok(cells
        .iter()
        .map(|cell| cell.is_some_and(|dt| comparison.holds(&dt, &value)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn names() -> Column {
        Column::text(
            "a",
            vec![
                Some("fred"),
                Some("frederson"),
                None,
                Some("maggie"),
                Some("Fredrick"),
            ],
        )
    }

    #[test]
    fn test_contains_case_insensitive() {
        let mask = compute_mask(Condition::TextContains, &names(), "FRED", false).unwrap();
        assert_eq!(mask, vec![true, true, false, false, true]);
    }

    #[test]
    fn test_does_not_contain_matches_nulls() {
        let mask = compute_mask(Condition::TextDoesNotContain, &names(), "fred", true).unwrap();
        assert_eq!(mask, vec![false, false, true, true, true]);
    }

    #[test]
    fn test_is_exactly_is_whole_cell() {
        let mask = compute_mask(Condition::TextIsExactly, &names(), "fred", true).unwrap();
        assert_eq!(mask, vec![true, false, false, false, false]);
    }

    #[test]
    fn test_regex_exactly_is_anchored() {
        let mask =
            compute_mask(Condition::TextMatchesRegexExactly, &names(), "fred|maggie", true)
                .unwrap();
        assert_eq!(mask, vec![true, false, false, true, false]);
    }

    #[test]
    fn test_regex_case_insensitive() {
        let mask = compute_mask(Condition::TextContainsRegex, &names(), "^FRED", false).unwrap();
        assert_eq!(mask, vec![true, true, false, false, true]);
    }

    #[test]
    fn test_invalid_regex() {
        let err = compute_mask(Condition::TextContainsRegex, &names(), "f(", true).unwrap_err();
        assert!(matches!(err, FilterError::InvalidRegex { pattern, .. } if pattern == "f("));
    }

    #[test]
    fn test_text_condition_checks_column_before_value() {
        let ints = Column::integer("b", vec![Some(1)]);
        assert_eq!(
            compute_mask(Condition::TextIsExactly, &ints, "", true),
            Err(FilterError::NotText)
        );
        assert_eq!(
            compute_mask(Condition::TextIsExactly, &names(), "", true),
            Err(FilterError::MissingValue)
        );
    }

    #[test]
    fn test_emptiness_works_on_any_type() {
        let floats = Column::float("c", vec![Some(3.0), None, Some(f64::NAN)]);
        assert_eq!(
            compute_mask(Condition::CellIsEmpty, &floats, "", false).unwrap(),
            vec![false, true, true]
        );
        assert_eq!(
            compute_mask(Condition::CellIsNotEmpty, &floats, "ignored", false).unwrap(),
            vec![true, false, false]
        );
    }

    #[test]
    fn test_numeric_comparisons_skip_nulls() {
        let ints = Column::integer("b", vec![Some(2), Some(5), None, Some(8)]);
        let cases = [
            (Condition::Equals, "5", vec![false, true, false, false]),
            (Condition::GreaterThan, "2", vec![false, true, false, true]),
            (Condition::GreaterThanOrEquals, "2", vec![true, true, false, true]),
            (Condition::LessThan, "5", vec![true, false, false, false]),
            (Condition::LessThanOrEquals, "5", vec![true, true, false, false]),
        ];
        for (condition, value, expected) in cases {
            assert_eq!(
                compute_mask(condition, &ints, value, false).unwrap(),
                expected,
                "{condition:?} {value}"
            );
        }
    }

    #[test]
    fn test_all_null_column_never_compares() {
        let nulls = Column::float("c", vec![None, None]);
        assert_eq!(
            compute_mask(Condition::GreaterThan, &nulls, "0", false).unwrap(),
            vec![false, false]
        );
    }

    #[test]
    fn test_date_comparisons() {
        let midnight = |y, m, d| {
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        let dates = Column::datetime(
            "t",
            vec![Some(midnight(2015, 7, 31)), None, Some(midnight(2018, 3, 12))],
        );

        assert_eq!(
            compute_mask(Condition::DateIs, &dates, "2015-07-31", false).unwrap(),
            vec![true, false, false]
        );
        assert_eq!(
            compute_mask(Condition::DateIsAfter, &dates, "2016-1-1", false).unwrap(),
            vec![false, false, true]
        );
    }

    #[test]
    fn test_select_is_unfinished() {
        assert_eq!(
            compute_mask(Condition::Select, &names(), "x", false),
            Err(FilterError::MissingValue)
        );
    }

    #[test]
    fn test_single_column_search_treats_null_as_empty() {
        let mask = compute_mask(Condition::FilterByText, &names(), "fred", false).unwrap();
        assert_eq!(mask, vec![true, true, false, false, true]);
    }
}
