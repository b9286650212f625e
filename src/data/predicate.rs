use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::classify::{classify, ContentType};
use super::model::{CellValue, ColumnLabel, Row};

// ---------------------------------------------------------------------------
// Operation – emptiness direction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operation {
    /// Keep rows whose cells are all blank.
    Null,
    /// Keep rows with at least one non-blank cell.
    #[default]
    NotNull,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::Null, Operation::NotNull];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Null => "null",
            Operation::NotNull => "not-null",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `"null"` selects [`Operation::Null`]; any other text means not-null.
impl FromStr for Operation {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.trim() == "null" {
            Operation::Null
        } else {
            Operation::NotNull
        })
    }
}

// ---------------------------------------------------------------------------
// Row predicates
// ---------------------------------------------------------------------------

/// Every value in the row is empty text or null. A row without columns is
/// vacuously empty.
pub fn is_empty(row: &Row) -> bool {
    row.values().all(CellValue::is_blank)
}

/// Every value in the row individually matches `content_type`.
pub fn matches_type(row: &Row, content_type: ContentType) -> bool {
    row.values().all(|v| classify(v.as_str(), content_type))
}

/// Emptiness check AND content check over the whole row.
pub fn row_matches(row: &Row, operation: Operation, content_type: ContentType) -> bool {
    evaluate(row.values(), operation, content_type)
}

/// Same as [`row_matches`] but only looking at `columns`. A column missing
/// from the row counts as a blank cell.
pub fn row_matches_in(
    row: &Row,
    columns: &[ColumnLabel],
    operation: Operation,
    content_type: ContentType,
) -> bool {
    static BLANK: CellValue = CellValue::Null;
    let cells = columns.iter().map(|&l| row.get(l).unwrap_or(&BLANK));
    evaluate(cells, operation, content_type)
}

fn evaluate<'a, I>(mut cells: I, operation: Operation, content_type: ContentType) -> bool
where
    I: Iterator<Item = &'a CellValue> + Clone,
{
    let empty = cells.clone().all(CellValue::is_blank);
    let null_check = match operation {
        Operation::Null => empty,
        Operation::NotNull => !empty,
    };
    null_check && cells.all(|v| classify(v.as_str(), content_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> ColumnLabel {
        ColumnLabel::parse(s).unwrap()
    }

    #[test]
    fn emptiness() {
        let mut row = Row::new();
        row.insert(label("A"), "");
        row.insert(label("B"), CellValue::Null);
        assert!(is_empty(&row));

        assert!(!is_empty(&Row::from_values(["x"])));
        assert!(is_empty(&Row::new()));
    }

    #[test]
    fn type_check_is_all_of() {
        let row = Row::from_values(["30", "abc"]);
        assert!(!matches_type(&row, ContentType::Number));
        assert!(matches_type(&Row::from_values(["30", "41"]), ContentType::Number));
        assert!(matches_type(&Row::new(), ContentType::Link));
    }

    #[test]
    fn row_matches_is_conjunction() {
        let row = Row::from_values(["30"]);
        assert!(row_matches(&row, Operation::NotNull, ContentType::Number));
        assert!(!row_matches(&row, Operation::NotNull, ContentType::Word));
        assert!(!row_matches(&row, Operation::Null, ContentType::Number));
    }

    #[test]
    fn blank_row_only_passes_null_with_all() {
        let row = Row::from_values(["", ""]);
        assert!(row_matches(&row, Operation::Null, ContentType::All));
        // Blank cells never classify as numbers, so null + number is unsatisfiable.
        assert!(!row_matches(&row, Operation::Null, ContentType::Number));
        assert!(!row_matches(&row, Operation::NotNull, ContentType::All));
    }

    #[test]
    fn zero_column_row() {
        let row = Row::new();
        assert!(row_matches(&row, Operation::Null, ContentType::Word));
        assert!(!row_matches(&row, Operation::NotNull, ContentType::All));
    }

    #[test]
    fn restricted_to_columns() {
        let row = Row::from_values(["Alice", "30", "http://example.com"]);
        assert!(row_matches_in(&row, &[label("B")], Operation::NotNull, ContentType::Number));
        assert!(!row_matches_in(&row, &[label("A"), label("B")], Operation::NotNull, ContentType::Number));
        // Missing column reads as blank.
        assert!(row_matches_in(&row, &[label("Q")], Operation::Null, ContentType::All));
    }

    #[test]
    fn parse_operation() {
        assert_eq!("null".parse(), Ok(Operation::Null));
        assert_eq!("not-null".parse(), Ok(Operation::NotNull));
        assert_eq!("anything".parse(), Ok(Operation::NotNull));
    }
}
