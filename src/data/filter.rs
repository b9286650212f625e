use super::model::{ColumnLabel, Dataset};
use super::predicate::{row_matches, row_matches_in};
use super::query::{FilterQuery, FilterScope};

/// Return positions of rows that pass the query.
///
/// A row passes when:
/// * its 0-based position in `dataset` lies inside the query's row range, and
/// * the emptiness check and the content check both hold.
///
/// With [`FilterScope::RowsOnly`] the checks look at the whole row and the
/// range columns play no part. With [`FilterScope::RowsAndColumns`] the
/// checks only look at the range columns.
pub fn filtered_indices(dataset: &Dataset, query: &FilterQuery) -> Vec<usize> {
    let columns: Option<Vec<ColumnLabel>> = match query.scope {
        FilterScope::RowsOnly => None,
        FilterScope::RowsAndColumns => Some(query.column_labels()),
    };

    dataset
        .rows()
        .iter()
        .enumerate()
        .filter(|(i, row)| {
            if !query.row_range.contains(*i) {
                return false;
            }
            match &columns {
                None => row_matches(row, query.operation, query.content_type),
                Some(cols) => row_matches_in(row, cols, query.operation, query.content_type),
            }
        })
        .map(|(i, _)| i)
        .collect()
}

/// Filtered copy of `dataset`: original order, every column kept.
pub fn filter(dataset: &Dataset, query: &FilterQuery) -> Dataset {
    dataset.select(&filtered_indices(dataset, query))
}
