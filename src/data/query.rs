use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::classify::ContentType;
use super::model::ColumnLabel;
use super::predicate::Operation;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("row range '{field}' must be a whole number, got '{input}'")]
    InvalidRowBound { field: &'static str, input: String },

    #[error("unknown filter scope '{0}' (expected rows-only or rows-and-columns)")]
    UnknownScope(String),
}

// ---------------------------------------------------------------------------
// RowRange – inclusive, 1-based
// ---------------------------------------------------------------------------

/// Inclusive 1-based row bounds. Bounds are not validated against any
/// dataset: `from > to` or bounds past the end simply select nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub from: i64,
    pub to: i64,
}

impl RowRange {
    pub fn new(from: i64, to: i64) -> Self {
        RowRange { from, to }
    }

    /// Parse user-typed bounds. Anything that is not a whole number is a
    /// validation error.
    pub fn parse(from: &str, to: &str) -> Result<Self, QueryError> {
        Ok(RowRange {
            from: parse_bound("from", from)?,
            to: parse_bound("to", to)?,
        })
    }

    /// Whether a 0-based row position falls inside the range.
    pub fn contains(&self, index: usize) -> bool {
        let Ok(i) = i64::try_from(index) else {
            return false;
        };
        i >= self.from.saturating_sub(1) && i <= self.to.saturating_sub(1)
    }
}

fn parse_bound(field: &'static str, input: &str) -> Result<i64, QueryError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| QueryError::InvalidRowBound {
            field,
            input: input.to_string(),
        })
}

impl fmt::Display for RowRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.from, self.to)
    }
}

// ---------------------------------------------------------------------------
// FilterScope
// ---------------------------------------------------------------------------

/// Whether the range columns take part in the row decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterScope {
    /// Range columns only drive highlighting; predicates see every cell.
    #[default]
    RowsOnly,
    /// Predicates only see cells in the range columns.
    RowsAndColumns,
}

impl FilterScope {
    pub const ALL: [FilterScope; 2] = [FilterScope::RowsOnly, FilterScope::RowsAndColumns];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterScope::RowsOnly => "rows-only",
            FilterScope::RowsAndColumns => "rows-and-columns",
        }
    }
}

impl fmt::Display for FilterScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterScope {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "rows-only" | "rows" => Ok(FilterScope::RowsOnly),
            "rows-and-columns" | "both" => Ok(FilterScope::RowsAndColumns),
            other => Err(QueryError::UnknownScope(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterQuery – everything one "apply" needs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterQuery {
    /// Read from the form and logged; does not affect row inclusion.
    pub primary_column: Option<String>,
    /// Raw column tokens, e.g. `["A", " C"]`. Invalid tokens are kept here
    /// and skipped wherever labels are needed.
    pub range_columns: Vec<String>,
    pub row_range: RowRange,
    /// Read from the form and logged; only `operation` drives filtering.
    pub operation_type: Option<String>,
    pub operation: Operation,
    pub content_type: ContentType,
    pub scope: FilterScope,
}

impl FilterQuery {
    pub fn new(row_range: RowRange, operation: Operation, content_type: ContentType) -> Self {
        FilterQuery {
            primary_column: None,
            range_columns: Vec::new(),
            row_range,
            operation_type: None,
            operation,
            content_type,
            scope: FilterScope::RowsOnly,
        }
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.range_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_scope(mut self, scope: FilterScope) -> Self {
        self.scope = scope;
        self
    }

    /// Labels parsed from `range_columns`, unknown tokens dropped.
    pub fn column_labels(&self) -> Vec<ColumnLabel> {
        self.range_columns
            .iter()
            .filter_map(|c| ColumnLabel::from_token(c))
            .collect()
    }
}

/// Split a comma-separated column list. Tokens are kept untrimmed; label
/// parsing trims them.
pub fn split_columns(input: &str) -> Vec<String> {
    input.split(',').map(str::to_string).collect()
}

// ---------------------------------------------------------------------------
// ApplyForm – raw text from the UI controls
// ---------------------------------------------------------------------------

/// What the user typed, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyForm {
    pub primary_column: String,
    pub range_columns: String,
    pub row_from: String,
    pub row_to: String,
    pub operation_type: String,
    pub operation: Operation,
    pub content_type: ContentType,
    pub scope: FilterScope,
}

impl Default for ApplyForm {
    fn default() -> Self {
        Self {
            primary_column: String::new(),
            range_columns: "A".to_string(),
            row_from: "1".to_string(),
            row_to: "1".to_string(),
            operation_type: String::new(),
            operation: Operation::NotNull,
            content_type: ContentType::All,
            scope: FilterScope::RowsOnly,
        }
    }
}

impl ApplyForm {
    /// Validate the form into a query. Only the row bounds can fail.
    pub fn to_query(&self) -> Result<FilterQuery, QueryError> {
        let row_range = RowRange::parse(&self.row_from, &self.row_to)?;
        Ok(FilterQuery {
            primary_column: non_blank(&self.primary_column),
            range_columns: split_columns(&self.range_columns),
            row_range,
            operation_type: non_blank(&self.operation_type),
            operation: self.operation,
            content_type: self.content_type,
            scope: self.scope,
        })
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_contains_is_one_based_inclusive() {
        let r = RowRange::new(2, 3);
        assert!(!r.contains(0));
        assert!(r.contains(1));
        assert!(r.contains(2));
        assert!(!r.contains(3));
    }

    #[test]
    fn inverted_range_contains_nothing() {
        let r = RowRange::new(4, 2);
        assert!((0..10).all(|i| !r.contains(i)));
    }

    #[test]
    fn zero_from_reaches_first_row() {
        assert!(RowRange::new(0, 1).contains(0));
    }

    #[test]
    fn non_numeric_bound_is_rejected() {
        assert_eq!(
            RowRange::parse("abc", "3"),
            Err(QueryError::InvalidRowBound {
                field: "from",
                input: "abc".to_string()
            })
        );
        assert!(RowRange::parse("1", "").is_err());
        assert!(RowRange::parse("1", "2.5").is_err());
        assert_eq!(RowRange::parse(" 1 ", "5"), Ok(RowRange::new(1, 5)));
    }

    #[test]
    fn form_to_query() {
        let form = ApplyForm {
            primary_column: "  ".to_string(),
            range_columns: "A, C".to_string(),
            row_from: "2".to_string(),
            row_to: "3".to_string(),
            operation_type: "count".to_string(),
            operation: Operation::Null,
            content_type: ContentType::Number,
            scope: FilterScope::RowsOnly,
        };
        let q = form.to_query().unwrap();
        assert_eq!(q.primary_column, None);
        assert_eq!(q.operation_type.as_deref(), Some("count"));
        assert_eq!(q.range_columns, ["A", " C"]);
        assert_eq!(q.column_labels().len(), 2);
        assert_eq!(q.row_range, RowRange::new(2, 3));
    }

    #[test]
    fn form_with_bad_bound_fails() {
        let form = ApplyForm {
            row_to: "ten".to_string(),
            ..ApplyForm::default()
        };
        assert!(matches!(
            form.to_query(),
            Err(QueryError::InvalidRowBound { field: "to", .. })
        ));
    }

    #[test]
    fn scope_parse() {
        assert_eq!("rows-only".parse(), Ok(FilterScope::RowsOnly));
        assert_eq!("rows-and-columns".parse(), Ok(FilterScope::RowsAndColumns));
        assert!("columns".parse::<FilterScope>().is_err());
    }
}
