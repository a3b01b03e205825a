//! Free-text search across several columns.

use crate::coerce;
use crate::error::{FilterError, FilterResult};
use crate::mask::{Mask, TextPattern};
use crate::table::{Column, Table};

/// Computes the rows where any of `columns` contains `query`.
///
/// Null cells read as empty text. All names are resolved before any column
/// is scanned, so an unknown name fails without partial work.
///
/// # Errors
///
/// Returns [`FilterError::UnknownColumn`] for the first name not in the
/// table, [`FilterError::NotText`] if a listed column is not text, and
/// [`FilterError::InvalidRegex`] for a bad pattern.
pub fn search_mask(
    table: &Table,
    columns: &[String],
    query: &str,
    case_sensitive: bool,
    regex: bool,
) -> FilterResult<Mask> {
    let resolved = columns
        .iter()
        .map(|name| {
            table
                .column(name)
                .ok_or_else(|| FilterError::unknown_column(name.as_str()))
        })
        .collect::<FilterResult<Vec<&Column>>>()?;

    let pattern = if regex {
        TextPattern::regex(query, case_sensitive, false)?
    } else {
        TextPattern::substring(query, case_sensitive)
    };

    let mut mask = vec![false; table.num_rows()];
    for column in resolved {
        let cells = coerce::text_cells(column)?;
        for (hit, cell) in mask.iter_mut().zip(cells) {
            if !*hit {
                *hit = pattern.is_match(cell.unwrap_or(""));
            }
        }
    }

    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shapes() -> Table {
        Table::new(vec![
            Column::text(
                "a",
                vec![Some("fred"), Some("frederson"), None, Some("maggie"), Some("Fredrick")],
            ),
            Column::integer("b", vec![Some(2), Some(5), None, Some(8), Some(5)]),
            Column::text(
                "d",
                vec![Some("round"), Some("square"), None, Some("Round"), Some("square")],
            ),
        ])
        .unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_or_across_columns() {
        let mask = search_mask(&shapes(), &names(&["a", "d"]), "round", false, false).unwrap();
        assert_eq!(mask, vec![true, false, false, true, false]);

        let mask = search_mask(&shapes(), &names(&["a", "d"]), "r", true, false).unwrap();
        assert_eq!(mask, vec![true, true, false, false, true]);
    }

    #[test]
    fn test_case_sensitive() {
        let mask = search_mask(&shapes(), &names(&["d"]), "Round", true, false).unwrap();
        assert_eq!(mask, vec![false, false, false, true, false]);
    }

    #[test]
    fn test_regex() {
        let mask = search_mask(&shapes(), &names(&["a", "d"]), "^(mag|squ)", false, true).unwrap();
        assert_eq!(mask, vec![false, true, false, true, true]);
    }

    #[test]
    fn test_unknown_column_reported_before_type_errors() {
        let err = search_mask(&shapes(), &names(&["b", "nope"]), "x", false, false).unwrap_err();
        assert_eq!(err, FilterError::unknown_column("nope"));
    }

    #[test]
    fn test_non_text_column() {
        let err = search_mask(&shapes(), &names(&["a", "b"]), "x", false, false).unwrap_err();
        assert_eq!(err, FilterError::NotText);
    }
}
